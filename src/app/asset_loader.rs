// src/app/asset_loader.rs

// 画像の読み込みだよ！🖼️
// HtmlImageElement の onload / onerror を futures の oneshot チャンネルにつないで、
// async で待てるようにしてる。
//
// オブジェクトの画像は全部いっぺんに読み込み始めて、届いた順に Session に登録する。
// 置き場はマニフェストの順番で決まるので、届く順番はバラバラでも大丈夫。
// 一枚でも読めなかったらそこで止める (セッションは始められない)。

use std::sync::{Arc, Mutex};

use futures::channel::oneshot;
use futures::stream::{FuturesUnordered, StreamExt};
use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlImageElement};

use crate::app::context::{lock, AppContext};
use crate::error::SessionError;

/// `src` の画像を読み込む。
pub async fn load_image(src: &str) -> Result<HtmlImageElement, SessionError> {
    let unavailable = || SessionError::AssetUnavailable(src.to_string());
    let image = HtmlImageElement::new().map_err(|_| unavailable())?;

    let (sender, receiver) = oneshot::channel::<bool>();
    // onload と onerror のどっちが先に来ても一回だけ送る
    let sender = Arc::new(Mutex::new(Some(sender)));
    let notify = |loaded: bool| {
        let sender = Arc::clone(&sender);
        Closure::wrap(Box::new(move |_event: Event| {
            if let Some(tx) = lock(&sender).take() {
                let _ = tx.send(loaded);
            }
        }) as Box<dyn FnMut(Event)>)
    };
    let on_load = notify(true);
    let on_error = notify(false);

    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    image.set_src(src);

    let loaded = receiver.await.unwrap_or(false);
    image.set_onload(None);
    image.set_onerror(None);

    if loaded {
        Ok(image)
    } else {
        error!("AssetLoader: failed to load {}", src);
        Err(unavailable())
    }
}

/// マップとオブジェクトの画像を全部読み込んで、Session に登録していく。
pub(crate) async fn load_session_assets(ctx: &AppContext) -> Result<(), SessionError> {
    let (manifest, screen) = {
        let session = lock(&ctx.session);
        (session.manifest().clone(), session.screen())
    };

    let map = load_image(&manifest.map_image_path()).await?;
    lock(&ctx.renderer).set_map_image(map);
    ctx.redraw();

    let mut pending: FuturesUnordered<_> = manifest
        .entities
        .iter()
        .map(|descriptor| {
            let name = descriptor.name.clone();
            let path = descriptor.image_path();
            async move {
                let image = load_image(&path).await;
                (name, image)
            }
        })
        .collect();

    let scale = screen.object_scale();
    while let Some((name, image)) = pending.next().await {
        let image = image?;
        let width = image.natural_width() as f32 * scale;
        let height = image.natural_height() as f32 * scale;
        lock(&ctx.session).register_entity(&name, width, height)?;
        lock(&ctx.renderer).add_object_image(name, image);
        ctx.redraw();
    }

    info!("AssetLoader: all {} objects are on the board", manifest.entities.len());
    Ok(())
}
