// src/app/browser_event_manager.rs
//! ブラウザのイベントリスナーの付け外し。
//!
//! - canvas の mousedown: ずっと付けっぱなし
//! - window の mousemove / mouseup: ドラッグ中だけ。window に付けるので、
//!   キャンバスの外でボタンを離してもちゃんとドロップになる
//! - window の beforeunload: 送信中はページを離れようとしたら止める

use log::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, BeforeUnloadEvent, Event, MouseEvent};

use crate::app::context::{lock, AppContext};
use crate::app::session::PointerDown;
use crate::app::submit_handler;

/// canvas に mousedown を付ける。戻り値のクロージャは持ち主 (MapRecallApp) が保持すること。
pub(crate) fn attach_canvas_listener(ctx: &AppContext) -> Result<Closure<dyn FnMut(Event)>, JsValue> {
    let ctx_clone = ctx.clone();
    let closure = Closure::wrap(Box::new(move |event: Event| {
        let Ok(mouse_event) = event.dyn_into::<MouseEvent>() else {
            error!("mousedown: not a MouseEvent");
            return;
        };
        let (x, y) = ctx_clone.canvas_point(&mouse_event);

        // ロックは pointer_down の間だけ
        let result = lock(&ctx_clone.session).pointer_down(x, y);
        match result {
            PointerDown::Grabbed(entity) => {
                debug!("mousedown: grabbed {}", entity);
                if let Err(e) = attach_drag_listeners(&ctx_clone) {
                    error!("Failed to attach drag listeners: {:?}", e);
                }
            }
            PointerDown::SubmitRequested => submit_handler::handle_submit(&ctx_clone),
            PointerDown::Nothing => {}
        }
        ctx_clone.redraw();
    }) as Box<dyn FnMut(Event)>);

    ctx.canvas
        .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

/// ドラッグ開始時に window に mousemove と mouseup を付ける。
pub(crate) fn attach_drag_listeners(ctx: &AppContext) -> Result<(), JsValue> {
    let window = window().ok_or("Failed to get window")?;

    // 前のが残ってたら先に外す
    detach_drag_listeners(ctx)?;

    // --- MouseMove ---
    {
        let ctx_clone = ctx.clone();
        let mousemove = Closure::wrap(Box::new(move |event: Event| {
            if let Ok(mouse_event) = event.dyn_into::<MouseEvent>() {
                let (x, y) = ctx_clone.canvas_point(&mouse_event);
                let moved = lock(&ctx_clone.session).pointer_move(x, y);
                if moved {
                    ctx_clone.redraw();
                }
            } else {
                error!("mousemove: not a MouseEvent");
            }
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
        *lock(&ctx.mousemove_listener) = Some(mousemove);
    }

    // --- MouseUp ---
    {
        let ctx_clone = ctx.clone();
        let mouseup = Closure::wrap(Box::new(move |event: Event| {
            if let Ok(mouse_event) = event.dyn_into::<MouseEvent>() {
                let (x, y) = ctx_clone.canvas_point(&mouse_event);
                let outcome = {
                    let mut session = lock(&ctx_clone.session);
                    session.pointer_move(x, y);
                    session.pointer_up()
                };
                debug!("mouseup: {:?}", outcome);
            } else {
                error!("mouseup: not a MouseEvent");
            }
            if let Err(e) = detach_drag_listeners(&ctx_clone) {
                error!("Error detaching listeners in mouseup: {:?}", e);
            }
            ctx_clone.redraw();
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
        *lock(&ctx.mouseup_listener) = Some(mouseup);
    }

    Ok(())
}

/// window から mousemove と mouseup を外す。付いてなければ何もしない。
pub(crate) fn detach_drag_listeners(ctx: &AppContext) -> Result<(), JsValue> {
    let window = window().ok_or("Failed to get window")?;

    if let Some(closure) = lock(&ctx.mousemove_listener).take() {
        window.remove_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
    }
    if let Some(closure) = lock(&ctx.mouseup_listener).take() {
        window.remove_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
    }
    Ok(())
}

/// 送信中にタブを閉じようとしたら確認ダイアログを出してもらう。
pub(crate) fn attach_beforeunload_listener(ctx: &AppContext) -> Result<Closure<dyn FnMut(Event)>, JsValue> {
    let window = window().ok_or("Failed to get window")?;
    let ctx_clone = ctx.clone();
    let closure = Closure::wrap(Box::new(move |event: Event| {
        if lock(&ctx_clone.session).can_leave() {
            return;
        }
        event.prevent_default();
        if let Some(unload) = event.dyn_ref::<BeforeUnloadEvent>() {
            unload.set_return_value("Your results are still being submitted.");
        }
    }) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

/// 付けっぱなしのリスナーを外す (MapRecallApp の Drop から)。
pub(crate) fn remove_listener(
    target: &web_sys::EventTarget,
    event_type: &str,
    closure: &Closure<dyn FnMut(Event)>,
) -> Result<(), JsValue> {
    target.remove_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
}
