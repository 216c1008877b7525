// src/components/draggable.rs

use serde::{Deserialize, Serialize};

use crate::components::position::Position;
use crate::components::target_zone::ZoneId;
use crate::ecs::component::Component;
use crate::logic::geometry::Bounds;

/// ドラッグできるオブジェクト (バスケットボールとか、ランプとか) の情報だよ！🏀
///
/// 画像が読み込めた時点で World に登録されるので、幅と高さは
/// 描画されるサイズ (縮小後) がここに入ってる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draggable {
    /// 結果ペイロードのキーになる名前 (例: "basketball")。
    pub name: String,
    /// 正解のゾーン ID。
    pub correct_zone_id: ZoneId,
    pub width: f32,
    pub height: f32,
}

impl Draggable {
    /// 中心が `center` にあるときの描画範囲。
    pub fn bounds_at(&self, center: &Position) -> Bounds {
        Bounds::from_center(center.x, center.y, self.width, self.height)
    }
}

impl Component for Draggable {}

/// 描画の重なり順。大きいほど手前！
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DrawOrder(pub u32);

impl Component for DrawOrder {}
