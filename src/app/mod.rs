// src/app/mod.rs
//! MapRecallApp の中身を役割ごとに分割して置くモジュールだよ！
//!
//! `session` と `submit_gate` はブラウザに依存しない。それ以外は web_sys を触る係。

pub mod asset_loader;
pub mod browser_event_manager;
pub(crate) mod context;
pub mod game_app;
pub mod init_handler;
pub mod renderer;
pub mod session;
pub mod state_getter;
pub mod submit_gate;
pub mod submit_handler;

pub use game_app::MapRecallApp;
pub use session::{PointerDown, Session, SubmitOutcome};
