//! Gets the current session state and converts it to JSON.

use std::sync::{Arc, Mutex};

use log::{debug, error};
use wasm_bindgen::JsValue;

use crate::app::session::Session;

/// セッションの状態 (`SessionSnapshot`) を JSON 文字列にして返します。
/// (MapRecallApp::get_state_json のロジック)
pub fn get_session_state_json(session_arc: &Arc<Mutex<Session>>) -> Result<JsValue, JsValue> {
    let session = match session_arc.try_lock() {
        Ok(s) => s,
        Err(e) => {
            let error_msg = format!("Failed to lock session for getting state: {}", e);
            error!("{}", error_msg);
            return Err(JsValue::from_str(&error_msg));
        }
    };

    let snapshot = session.snapshot();
    debug!(
        "Collected state for {} objects and {} zones.",
        snapshot.objects.len(),
        snapshot.zones.len()
    );

    match serde_json::to_string(&snapshot) {
        Ok(json_string) => Ok(JsValue::from_str(&json_string)),
        Err(e) => {
            let error_msg = format!("Failed to serialize session state: {}", e);
            error!("{}", error_msg);
            Err(JsValue::from_str(&error_msg))
        }
    }
}
