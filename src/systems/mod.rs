// src/systems/mod.rs
//! 配置エンジンのロジック本体: ドラッグ、配置の仲介、採点。

pub mod drag_system;
pub mod evaluation_system;
pub mod placement_system;

pub use drag_system::DragListener;
pub use evaluation_system::{Evaluation, SessionEvaluator};
pub use placement_system::{DropOutcome, PlacementController};
