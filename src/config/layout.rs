// src/config/layout.rs
//! 画面レイアウトの定数と、画面サイズから座標を出す小さな関数たち。
//! 置き場所 (ゾーン) とオブジェクトの並べ方、マップ、送信ボタンなど。

use serde::{Deserialize, Serialize};

use crate::components::Position;
use crate::logic::geometry::Bounds;

// --- ゾーン ---
pub const DEFAULT_ZONE_SIZE: f32 = 110.0; // サイズ未指定ゾーンの一辺
pub const ZONE_SIZE_FRACTION: f32 = 0.12; // 標準レイアウトでは min(幅, 高さ) の 12%
pub const ZONE_BORDER_WIDTH: f32 = 7.0;

// --- 左側の置き場 (ステージング) ---
pub const STAGING_COLUMNS: usize = 3;
pub const STAGING_START_X: f32 = 280.0;
pub const STAGING_GAP_FRACTION: f32 = 0.16; // min(幅, 高さ) に対する間隔
pub const OBJECT_SCALE_DIVISOR: f32 = 1500.0; // 縮小率 = 間隔 / 1500

// --- 説明文 ---
pub const INSTRUCTIONS_X: f32 = 56.0;
pub const INSTRUCTIONS_Y: f32 = 56.0;
pub const INSTRUCTIONS_FONT: &str = "400 20px Inter, sans-serif";
pub const SCORE_FONT: &str = "600 20px Inter, sans-serif";
pub const INSTRUCTIONS_LINE_HEIGHT: f32 = 28.0;
pub const INSTRUCTIONS_TEXT: &str = "Drag and drop the objects on the left to the yellow targets on the map.\nThe yellow Targets represent the possible locations of the objects in the maze. \nPlace the objects in the location you remember seeing them in the maze.";
pub const STAGING_TOP_MARGIN: f32 = 150.0; // 説明文の下からの余白

// --- マップ画像 ---
pub const MAP_CENTER_X_FRACTION: f32 = 0.7;
pub const MAP_CENTER_Y_FRACTION: f32 = 0.5;
pub const MAP_HEIGHT_FRACTION: f32 = 0.9; // 画面の高さの 90% に合わせる

// --- 送信ボタン ---
pub const SUBMIT_BUTTON_X: f32 = 65.0;
pub const SUBMIT_BUTTON_BOTTOM_OFFSET: f32 = 120.0;
pub const SUBMIT_BUTTON_WIDTH: f32 = 200.0;
pub const SUBMIT_BUTTON_HEIGHT: f32 = 60.0;
pub const SUBMIT_BUTTON_RADIUS: f64 = 10.0;
pub const SUBMIT_BUTTON_FONT: &str = "600 24px Inter, sans-serif";

// --- 色 ---
pub const BACKGROUND_COLOR: &str = "#dadada";
pub const TEXT_COLOR: &str = "#000000";
pub const ZONE_BORDER_COLOR: &str = "#FFD700"; // 黄色
pub const ZONE_HIGHLIGHT_BORDER_COLOR: &str = "#FFA500"; // オレンジ
pub const ZONE_FILL_COLOR: &str = "#FFFFFF";
pub const ZONE_FILL_ALPHA: f64 = 0.1;
pub const ZONE_HIGHLIGHT_FILL_ALPHA: f64 = 0.3;
pub const ZONE_CORRECT_COLOR: &str = "#00FF00";
pub const ZONE_INCORRECT_COLOR: &str = "#FF0000";
pub const ZONE_RESULT_ALPHA: f64 = 0.5;
pub const ZONE_RESULT_BORDER_WIDTH: f64 = 3.0;
pub const SUBMIT_BUTTON_COLOR: &str = "#4caf50";
pub const SUBMIT_BUTTON_TEXT_COLOR: &str = "#ffffff";

// --- アセット ---
pub const ASSET_DIR: &str = "/assets";
pub const MAP_IMAGE: &str = "/assets/map.png";

// --- ページ側の要素 ---
pub const PARTICIPANT_INPUT_ID: &str = "participant-id"; // 参加者 ID の入力欄 (送信モードだけ)

/// キャンバスの大きさ (CSS ピクセル)。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32) -> Self {
        Screen { width, height }
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// 標準レイアウトのゾーンの一辺。
    pub fn zone_size(&self) -> f32 {
        self.min_side() * ZONE_SIZE_FRACTION
    }

    /// ステージングの格子の間隔 (縦横共通)。
    pub fn staging_gap(&self) -> f32 {
        self.min_side() * STAGING_GAP_FRACTION
    }

    /// オブジェクト画像の縮小率。
    pub fn object_scale(&self) -> f32 {
        self.staging_gap() / OBJECT_SCALE_DIVISOR
    }

    /// マニフェストの `index` 番目のオブジェクトの初期位置。3 列の格子に並べる。
    /// 読み込み完了の順番じゃなくて、マニフェストの順番で決まるのがポイント！
    pub fn staging_position(&self, index: usize) -> Position {
        let gap = self.staging_gap();
        let instructions_height = INSTRUCTIONS_TEXT.lines().count() as f32 * INSTRUCTIONS_LINE_HEIGHT;
        let start_y = INSTRUCTIONS_Y + instructions_height + STAGING_TOP_MARGIN;
        Position {
            x: STAGING_START_X + (index % STAGING_COLUMNS) as f32 * gap,
            y: start_y + (index / STAGING_COLUMNS) as f32 * gap,
        }
    }

    /// 送信ボタンの範囲 (左下に固定)。
    pub fn submit_button_bounds(&self) -> Bounds {
        Bounds {
            x: SUBMIT_BUTTON_X,
            y: self.height - SUBMIT_BUTTON_BOTTOM_OFFSET,
            width: SUBMIT_BUTTON_WIDTH,
            height: SUBMIT_BUTTON_HEIGHT,
        }
    }

    /// マップ画像の描画範囲。画面の高さの 90% に合わせて縮小し、右寄りに置く。
    pub fn map_bounds(&self, image_width: f32, image_height: f32) -> Bounds {
        let scale = if image_height > 0.0 {
            self.height / image_height * MAP_HEIGHT_FRACTION
        } else {
            1.0
        };
        Bounds::from_center(
            self.width * MAP_CENTER_X_FRACTION,
            self.height * MAP_CENTER_Y_FRACTION,
            image_width * scale,
            image_height * scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_grid_has_three_columns() {
        let screen = Screen::new(1000.0, 800.0);
        let gap = 800.0 * STAGING_GAP_FRACTION;
        let first = screen.staging_position(0);
        let fourth = screen.staging_position(3);
        let fifth = screen.staging_position(4);

        assert_eq!(first.x, STAGING_START_X);
        assert_eq!(fourth.x, STAGING_START_X, "4 個目は次の行の先頭");
        assert!((fourth.y - first.y - gap).abs() < 1e-3);
        assert!((fifth.x - STAGING_START_X - gap).abs() < 1e-3);
    }

    #[test]
    fn submit_button_sits_near_bottom() {
        let screen = Screen::new(1200.0, 900.0);
        let button = screen.submit_button_bounds();
        assert_eq!(button.y, 780.0);
        assert!(button.contains_point(100.0, 800.0));
    }

    #[test]
    fn map_fills_ninety_percent_of_height() {
        let screen = Screen::new(1000.0, 500.0);
        let map = screen.map_bounds(2000.0, 1000.0);
        assert!((map.height - 450.0).abs() < 1e-3);
        assert!((map.x + map.width / 2.0 - 700.0).abs() < 1e-3);
    }
}
