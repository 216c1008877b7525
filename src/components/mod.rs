// src/components/mod.rs

// components モジュールに属するサブモジュールたち！
pub mod draggable;
pub mod dragging_info;
pub mod position;
pub mod target_zone;

pub use draggable::{Draggable, DrawOrder};
pub use dragging_info::DraggingInfo;
pub use position::Position;
pub use target_zone::{TargetZone, ZoneId, ZoneVisual};
