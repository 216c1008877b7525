// src/app/submit_handler.rs
//! 送信ボタンが押されたときの処理 (ブラウザ側)。
//!
//! 参加者 ID の入力欄を読んで Session::submit に渡し、送信モードなら
//! fetch をバックグラウンドで走らせる。エラーは window.alert で見せる。

use log::{error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

use crate::app::context::{lock, AppContext};
use crate::app::session::SubmitOutcome;
use crate::config::layout::PARTICIPANT_INPUT_ID;
use crate::config::ScoringMode;
use crate::error::SessionError;
use crate::network::ResultSubmitter;

pub(crate) fn handle_submit(ctx: &AppContext) {
    let participant_id = read_participant_id();
    let outcome = lock(&ctx.session).submit(participant_id.as_deref());

    match outcome {
        Ok(SubmitOutcome::Scored(evaluation)) => {
            info!(
                "Submit: scored {} / {}",
                evaluation.correct_count, evaluation.total_count
            );
        }
        Ok(SubmitOutcome::Dispatch(payload)) => {
            let endpoint = match &lock(&ctx.session).manifest().scoring {
                ScoringMode::Submitted { endpoint } => endpoint.clone(),
                ScoringMode::Public => String::new(),
            };
            let ctx = ctx.clone();
            spawn_local(async move {
                let result = match ResultSubmitter::new(endpoint) {
                    Ok(submitter) => submitter.submit(&payload).await,
                    Err(e) => Err(e),
                };
                if let Err(e) = &result {
                    error!("Submit: {}", e);
                    alert(&format!("Failed to submit your results ({}). Please try again.", e));
                }
                lock(&ctx.session).submission_finished(&result);
                ctx.redraw();
            });
        }
        Err(e @ SessionError::MissingParticipantId) => alert(&e.to_string()),
        Err(e) => warn!("Submit: ignored ({})", e),
    }
    ctx.redraw();
}

/// ページの参加者 ID 入力欄。なければ `None` (公開モードのページには置かない)。
fn read_participant_id() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let input = document
        .get_element_by_id(PARTICIPANT_INPUT_ID)?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    Some(input.value())
}

pub(crate) fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            error!("alert failed: {:?}", e);
        }
    }
}
