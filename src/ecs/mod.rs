// src/ecs/mod.rs
//! ECS (Entity-Component) core used by the placement engine.

pub mod component;
pub mod entity;
pub mod world;

#[cfg(test)]
mod world_tests;

// Re-export key types for easier use via `crate::ecs::X`
pub use component::Component;
pub use entity::Entity;
pub use world::World;
