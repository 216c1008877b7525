// src/config/mod.rs

pub mod layout;
pub mod manifest;

pub use layout::Screen;
pub use manifest::{EntityDescriptor, Manifest, MatchStrategy, ScoringMode, ZoneDescriptor};
