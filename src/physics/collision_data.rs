//! Collision Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in collision_operations.rs

use super::aabb::AABB;
use cgmath::Vector3;

/// A displacement resolved against one obstacle set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult {
    /// Box after the resolved displacement
    pub aabb: AABB,
    /// Displacement actually applied, per axis
    pub displacement: Vector3<f32>,
}

/// Contact state derived from a requested and a resolved displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionFlags {
    /// Downward motion was stopped
    pub on_ground: bool,
    /// Motion along x or z was stopped
    pub horizontal_collision: bool,
    /// Any axis was stopped
    pub collision: bool,
}
