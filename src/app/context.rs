// src/app/context.rs

// ブラウザのコールバックたちが共有するものをひとまとめにした構造体だよ。
// クロージャに渡すときは AppContext を clone するだけ (中身は Arc なので同じものを指す)。

use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, warn};
use wasm_bindgen::closure::Closure;
use web_sys::{Event, HtmlCanvasElement, MouseEvent};

use crate::app::renderer::Renderer;
use crate::app::session::Session;

/// window に付けたり外したりするリスナーの置き場。付いてない間は `None`。
pub(crate) type ListenerSlot = Arc<Mutex<Option<Closure<dyn FnMut(Event)>>>>;

#[derive(Clone)]
pub(crate) struct AppContext {
    pub session: Arc<Mutex<Session>>,
    pub renderer: Arc<Mutex<Renderer>>,
    pub canvas: HtmlCanvasElement,
    /// ドラッグ中だけ window に付くリスナー
    pub mousemove_listener: ListenerSlot,
    pub mouseup_listener: ListenerSlot,
}

impl AppContext {
    pub fn new(session: Session, renderer: Renderer, canvas: HtmlCanvasElement) -> Self {
        AppContext {
            session: Arc::new(Mutex::new(session)),
            renderer: Arc::new(Mutex::new(renderer)),
            canvas,
            mousemove_listener: Arc::new(Mutex::new(None)),
            mouseup_listener: Arc::new(Mutex::new(None)),
        }
    }

    /// 今の Session を描き直す。
    pub fn redraw(&self) {
        let session = lock(&self.session);
        if let Err(e) = lock(&self.renderer).render(&session) {
            error!("AppContext: render failed: {:?}", e);
        }
    }

    /// マウスイベントの座標を、キャンバスの左上基準に直す。
    pub fn canvas_point(&self, event: &MouseEvent) -> (f32, f32) {
        let rect = self.canvas.get_bounding_client_rect();
        (
            (event.client_x() as f64 - rect.left()) as f32,
            (event.client_y() as f64 - rect.top()) as f32,
        )
    }
}

/// Mutex をロックする。毒が入ってても (前にパニックしてても) 中身を取り出して続ける。
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("AppContext: mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}
