// src/components/dragging_info.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// ドラッグ中のオブジェクトにだけ付いてるコンポーネントだよ！🖱️
/// これが付いてる = ドラッグ中。離したら外す。
///
/// オフセットは「オブジェクトの中心 − 掴んだポインタの位置」。
/// これを足し戻すことで、掴んだ場所がずれずに付いてくる。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct DraggingInfo {
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Component for DraggingInfo {}
