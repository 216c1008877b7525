// src/logic/geometry.rs
//! 当たり判定に使う軸並行バウンディングボックス (AABB)。

use serde::{Deserialize, Serialize};

/// 画面上の矩形。`x`, `y` は左上の角だよ。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// 中心と幅・高さから矩形を作る。オブジェクトもゾーンもアンカーが中心なのでこっちが基本。
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Bounds {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// 両方の軸で投影が重なってたら `true`。
    /// 辺が接してるだけでも重なり扱い (境界を含む比較)。
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(self.x > other.right()
            || self.right() < other.x
            || self.y > other.bottom()
            || self.bottom() < other.y)
    }

    /// 点が矩形の中 (境界含む) にあるか。
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}
