// src/logic/mod.rs
//! World に依存しない (または読むだけの) 判定ロジック。

pub mod geometry;

pub use geometry::Bounds;
pub use hit_test::find_entity_at;
