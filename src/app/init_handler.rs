// src/app/init_handler.rs
//! MapRecallApp の初期化まわり: キャンバスの準備とマニフェストの決定。

use log::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::{Manifest, Screen};
use crate::error::ManifestError;

/// id でキャンバスを探して、ウィンドウいっぱいの大きさにする。
pub(crate) fn initialize_canvas(canvas_id: &str) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d, Screen), JsValue> {
    let window = web_sys::window().ok_or("Failed to get window")?;
    let document = window.document().ok_or("Failed to get document")?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("Canvas element #{} not found", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()?;

    let width = window.inner_width()?.as_f64().unwrap_or(canvas.width() as f64);
    let height = window.inner_height()?.as_f64().unwrap_or(canvas.height() as f64);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let context = canvas
        .get_context("2d")?
        .ok_or("Failed to get 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()?;

    info!("App::Init: canvas #{} is {}x{}", canvas_id, width, height);
    Ok((canvas, context, Screen::new(width as f32, height as f32)))
}

/// JSON があればそれを読む。なければ画面サイズに合わせた標準マップ。
pub(crate) fn resolve_manifest(manifest_json: Option<&str>, screen: Screen) -> Result<Manifest, ManifestError> {
    match manifest_json {
        Some(json) => Manifest::from_json(json),
        None => {
            info!("App::Init: no manifest given, using the standard museum map");
            Ok(Manifest::standard(screen))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_standard_map() {
        let screen = Screen::new(1200.0, 900.0);
        let manifest = resolve_manifest(None, screen).unwrap();
        assert_eq!(manifest.entities.len(), 12);
        assert_eq!(manifest, Manifest::standard(screen));
    }

    #[test]
    fn bad_json_is_an_error() {
        let screen = Screen::new(1200.0, 900.0);
        assert!(matches!(
            resolve_manifest(Some("{\"entities\": []"), screen),
            Err(ManifestError::Parse(_))
        ));
    }
}
