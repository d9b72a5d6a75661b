//! Entities
//!
//! Pose, size and motion state for anything that moves through a level,
//! with the per-tick collision-resolved move in `motion_operations`.

pub mod entity_data;
pub mod entity_operations;
pub mod motion_operations;

pub use entity_data::{EntityData, StepSoundEvent};
pub use motion_operations::move_entity;
