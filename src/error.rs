// src/error.rs
//! エラー型まとめ。wasm の境界で `JsValue` に変換するよ。

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::components::ZoneId;

/// マニフェストがおかしい時のエラー。セッションは始められない。
#[derive(Debug, Error, PartialEq)]
pub enum ManifestError {
    #[error("manifest has no objects")]
    NoEntities,

    #[error("manifest has no target zones")]
    NoZones,

    #[error("object name {0:?} appears more than once")]
    DuplicateEntity(String),

    #[error("zone id {0} appears more than once")]
    DuplicateZone(ZoneId),

    #[error("object {name:?} expects zone {zone_id}, which is not in the layout")]
    UnknownCorrectZone { name: String, zone_id: ZoneId },

    #[error("zone {0} has a non-positive size")]
    InvalidZoneSize(ZoneId),

    #[error("failed to parse manifest: {0}")]
    Parse(String),
}

/// セッション操作のエラー。どれも状態は変えずに返す。
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("object {0:?} is not part of the manifest")]
    UnknownEntity(String),

    #[error("object {0:?} is already registered")]
    AlreadyRegistered(String),

    #[error("image {0:?} could not be loaded")]
    AssetUnavailable(String),

    #[error("all objects must be placed before submitting")]
    NotComplete,

    #[error("please enter your participant ID before submitting")]
    MissingParticipantId,

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("results have already been submitted")]
    AlreadySubmitted,

    #[error("session has already been evaluated")]
    AlreadyEvaluated,
}

/// 結果送信のエラー (ネットワーク側)。
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no submission endpoint configured")]
    NoEndpoint,

    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("network request failed: {0}")]
    Network(String),

    #[error("server rejected results with status {0}")]
    Status(u16),
}

impl From<ManifestError> for JsValue {
    fn from(e: ManifestError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

impl From<SessionError> for JsValue {
    fn from(e: SessionError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

impl From<SubmitError> for JsValue {
    fn from(e: SubmitError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
