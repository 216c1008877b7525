// src/components/position.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// 2D の位置 (x, y) を表すコンポーネントだよ！📍
///
/// オブジェクトは画像の中心がアンカーなので、ここに入るのも中心座標。
/// ゾーンの中心と同じ座標系 (キャンバスの CSS ピクセル) で持つ。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Position { x, y }
    }

    /// 中心どうしのユークリッド距離。
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Component for Position {}
