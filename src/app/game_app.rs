// src/app/game_app.rs

use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::Event;

use crate::app::asset_loader;
use crate::app::browser_event_manager;
use crate::app::context::{lock, AppContext};
use crate::app::init_handler;
use crate::app::renderer::Renderer;
use crate::app::session::Session;
use crate::app::state_getter;
use crate::app::submit_handler;

// --- セッション全体を JS から操作するための構造体 ---
#[wasm_bindgen]
pub struct MapRecallApp {
    ctx: AppContext,
    // 付けっぱなしのリスナー。Drop で外す。
    canvas_mousedown_closure: Option<Closure<dyn FnMut(Event)>>,
    window_beforeunload_closure: Option<Closure<dyn FnMut(Event)>>,
}

#[wasm_bindgen]
impl MapRecallApp {
    /// `canvas_id` のキャンバスに描く。`manifest_json` を省略すると標準の美術館マップ。
    ///
    /// マニフェストがおかしい、キャンバスが見つからない、などはここでエラーになる。
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, manifest_json: Option<String>) -> Result<MapRecallApp, JsValue> {
        info!("MapRecallApp: 初期化中...");
        let (canvas, context, screen) = init_handler::initialize_canvas(canvas_id)?;
        let manifest = init_handler::resolve_manifest(manifest_json.as_deref(), screen)?;
        let session = Session::new(manifest, screen)?;
        let renderer = Renderer::new(context, screen);

        let ctx = AppContext::new(session, renderer, canvas);
        let canvas_mousedown_closure = browser_event_manager::attach_canvas_listener(&ctx)?;
        let window_beforeunload_closure = browser_event_manager::attach_beforeunload_listener(&ctx)?;

        ctx.redraw();
        info!("MapRecallApp: 初期化完了。画像の読み込みは start() で始まるよ");
        Ok(MapRecallApp {
            ctx,
            canvas_mousedown_closure: Some(canvas_mousedown_closure),
            window_beforeunload_closure: Some(window_beforeunload_closure),
        })
    }

    /// 画像の読み込みを始める (バックグラウンド)。一枚でも失敗したらアラートを出して止まる。
    pub fn start(&self) {
        let ctx = self.ctx.clone();
        spawn_local(async move {
            if let Err(e) = asset_loader::load_session_assets(&ctx).await {
                error!("MapRecallApp: setup failed: {}", e);
                submit_handler::alert(&format!("Could not start the session: {}", e));
            }
        });
    }

    /// 全部のオブジェクトの画像が揃ったか。
    pub fn is_ready(&self) -> bool {
        lock(&self.ctx.session).is_ready()
    }

    /// 送信ボタンと同じ処理を JS から呼ぶ用。
    pub fn submit(&self) {
        submit_handler::handle_submit(&self.ctx);
    }

    /// 送信中かどうか (JS 側でページ遷移を止めたいとき用)。
    pub fn can_leave(&self) -> bool {
        lock(&self.ctx.session).can_leave()
    }

    /// 今の状態を JSON で。デバッグ用。
    pub fn get_state_json(&self) -> Result<JsValue, JsValue> {
        state_getter::get_session_state_json(&self.ctx.session)
    }

    /// 手動で描き直す。
    pub fn render(&self) {
        self.ctx.redraw();
    }
}

impl Drop for MapRecallApp {
    fn drop(&mut self) {
        info!("MapRecallApp: 破棄中。リスナーを外します...");
        if let Err(e) = browser_event_manager::detach_drag_listeners(&self.ctx) {
            error!("MapRecallApp: failed to detach drag listeners: {:?}", e);
        }
        if let Some(closure) = self.canvas_mousedown_closure.take() {
            if let Err(e) = browser_event_manager::remove_listener(&self.ctx.canvas, "mousedown", &closure) {
                error!("MapRecallApp: failed to remove mousedown: {:?}", e);
            }
        }
        if let (Some(closure), Some(window)) = (self.window_beforeunload_closure.take(), web_sys::window()) {
            if let Err(e) = browser_event_manager::remove_listener(&window, "beforeunload", &closure) {
                error!("MapRecallApp: failed to remove beforeunload: {:?}", e);
            }
        }
    }
}
