//! Physics Module
//!
//! Axis-aligned box geometry and swept collision resolution. Entity motion
//! builds on these; nothing here knows about levels or entities.

pub mod aabb;
pub mod collision_data;
pub mod collision_operations;

pub use aabb::AABB;
pub use collision_data::{CollisionFlags, SweepResult};
pub use collision_operations::{collision_flags, sweep_aabb};
