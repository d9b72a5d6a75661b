//! Entity Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in entity_operations.rs and motion_operations.rs

use crate::physics::AABB;
use crate::world::core::StepSoundKind;
use cgmath::{Point3, Vector2, Vector3};

/// Pose and motion state of one entity.
///
/// `rotation.x` is pitch and `rotation.y` is yaw, both in degrees. `aabb` is
/// derived from `position` and the size fields whenever the position is set
/// directly; during motion the box moves first and the position follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityData {
    pub position: Point3<f32>,
    pub old_position: Point3<f32>,
    pub rotation: Vector2<f32>,
    pub old_rotation: Vector2<f32>,
    /// Velocity-like per-tick displacement
    pub delta: Vector3<f32>,
    pub aabb: AABB,

    pub on_ground: bool,
    pub horizontal_collision: bool,
    pub collision: bool,

    pub width: f32,
    pub height: f32,
    /// Feet-to-position distance used when deriving `position.y` from the box
    pub height_offset: f32,
    /// Highest ledge the entity can step onto without jumping
    pub foot_size: f32,
    /// Vertical offset that smooths the camera after a step-up; decays each move
    pub y_slide_offset: f32,

    pub walk_distance: f32,
    pub old_walk_distance: f32,
    pub fall_distance: f32,
    /// Walk distance at which the next step sound is due
    pub next_step: i32,

    pub slide: bool,
    pub no_physics: bool,
    pub make_step_sound: bool,
    pub removed: bool,
}

/// A footstep produced by a move, for the audio layer to play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSoundEvent {
    pub kind: StepSoundKind,
    pub volume: f32,
    pub pitch: f32,
    pub position: Point3<f32>,
}
