// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！ これでコードを整理してるんだ。
pub mod app; // ブラウザとのつなぎ込み + セッション本体
pub mod components; // ECS のコンポーネント (オブジェクト、ゾーン、位置…)
pub mod config; // マニフェストとレイアウト定数
pub mod ecs; // 手作りの ECS (World, Entity, Component)
pub mod error;
pub mod logger;
pub mod logic; // 当たり判定などの計算
pub mod network; // 結果の送信 (fetch)
pub mod protocol; // 外に出ていくデータの形
pub mod systems; // ドラッグ、配置、採点

// よく使う型はここから直接使えるようにしておく
pub use app::{MapRecallApp, Session, SubmitOutcome};
pub use config::{Manifest, MatchStrategy, ScoringMode, Screen};
pub use error::{ManifestError, SessionError, SubmitError};

// JavaScript の console.log を Rust から呼び出すための準備 (extern ブロック)。
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    log("Panic hook and console logger set!");
}
