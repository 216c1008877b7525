// src/network.rs

// このファイルは、結果を外部のサーバーに送る係だよ！📡
// ブラウザの fetch API を `web_sys` 経由で呼んで、返ってきた Promise を
// `wasm_bindgen_futures::JsFuture` で await する。
//
// 送りっぱなし (fire-and-forget) なので、リトライもタイムアウトもここではやらない。
// やり直しはユーザーがボタンを押し直したときだけ (Session 側の門番が管理する)。
use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::error::SubmitError;
use crate::protocol::ResultPayload;

/// 送信先を覚えておく構造体。
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSubmitter {
    endpoint: String,
}

impl ResultSubmitter {
    /// 空の URL は受け付けない。
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SubmitError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(SubmitError::NoEndpoint);
        }
        Ok(ResultSubmitter { endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// リクエストのボディ (JSON 文字列) を作る。
    pub fn request_body(payload: &ResultPayload) -> Result<String, SubmitError> {
        Ok(serde_json::to_string(payload)?)
    }

    /// POST で送る。2xx 以外のステータスも失敗扱い。
    pub async fn submit(&self, payload: &ResultPayload) -> Result<(), SubmitError> {
        let body = Self::request_body(payload)?;
        debug!("ResultSubmitter: POST {} ({} bytes)", self.endpoint, body.len());

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&self.endpoint, &opts).map_err(network_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(network_error)?;

        let window = web_sys::window().ok_or_else(|| SubmitError::Network("no window".into()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network_error)?;
        let response: Response = response.dyn_into().map_err(network_error)?;

        if !response.ok() {
            return Err(SubmitError::Status(response.status()));
        }
        info!(
            "ResultSubmitter: results for {:?} accepted ({})",
            payload.participant_id,
            response.status()
        );
        Ok(())
    }
}

/// JS 側のエラー (TypeError とか) を文字列にして包む。
fn network_error(value: JsValue) -> SubmitError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    SubmitError::Network(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn blank_endpoint_is_rejected() {
        assert!(matches!(ResultSubmitter::new("  "), Err(SubmitError::NoEndpoint)));
        let submitter = ResultSubmitter::new("https://example.invalid/results").unwrap();
        assert_eq!(submitter.endpoint(), "https://example.invalid/results");
    }

    #[test]
    fn body_is_the_payload_json() {
        let payload = ResultPayload {
            participant_id: "P-9".into(),
            objects: BTreeMap::from([("vase".to_string(), 1u8)]),
            total_correct: 1,
            total_objects: 1,
        };
        let body = ResultSubmitter::request_body(&payload).unwrap();
        assert_eq!(
            body,
            r#"{"participantId":"P-9","objects":{"vase":1},"totalCorrect":1,"totalObjects":1}"#
        );
    }
}
