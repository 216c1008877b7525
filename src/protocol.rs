// src/protocol.rs

// 外に出ていくデータの形 (プロトコル) を定義するファイルだよ！💌
// 結果ペイロードはネットワーク送信用、スナップショットは JS 側のデバッグや描画用。
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::{ZoneId, ZoneVisual};
use crate::systems::Evaluation;

/// セッション終了時に外部へ送る結果。キーはオブジェクト名 (ゾーン ID じゃない)、値は 0 か 1。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    pub participant_id: String,
    pub objects: BTreeMap<String, u8>,
    pub total_correct: usize,
    pub total_objects: usize,
}

impl ResultPayload {
    pub fn from_evaluation(participant_id: impl Into<String>, evaluation: &Evaluation) -> Self {
        ResultPayload {
            participant_id: participant_id.into(),
            objects: evaluation.per_entity.clone(),
            total_correct: evaluation.correct_count,
            total_objects: evaluation.total_count,
        }
    }
}

/// 今の画面の状態をまるごと表すデータ。`get_state_json` で JS に渡す。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub objects: Vec<ObjectData>,
    pub zones: Vec<ZoneData>,
    pub submit_visible: bool,
    pub status_message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub dragging: bool,
    /// 今入ってるゾーン (入ってなければ null)
    pub zone_id: Option<ZoneId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneData {
    pub id: ZoneId,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub occupant: Option<String>,
    pub visual: ZoneVisual,
}
