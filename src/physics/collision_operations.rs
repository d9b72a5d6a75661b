//! Collision Operations - Pure DOP Functions
//!
//! Swept-box resolution against a static obstacle set. Axes are resolved in
//! the fixed order Y, X, Z and the box is moved after each one, so a box
//! resting on the ground slides along it instead of snagging on seams.

use super::aabb::{aabb_clip_x_collide, aabb_clip_y_collide, aabb_clip_z_collide, aabb_translate, AABB};
use super::collision_data::{CollisionFlags, SweepResult};
use cgmath::{Vector3, Zero};

/// Move `aabb` by as much of `requested` as `obstacles` allow.
///
/// With `slide` off, the first axis that gets shortened cancels the whole
/// remaining displacement.
pub fn sweep_aabb(aabb: &AABB, requested: Vector3<f32>, obstacles: &[AABB], slide: bool) -> SweepResult {
    let mut moving = *aabb;
    let mut a = requested;

    a.y = obstacles
        .iter()
        .fold(a.y, |dy, cube| aabb_clip_y_collide(cube, &moving, dy));
    aabb_translate(&mut moving, Vector3::new(0.0, a.y, 0.0));
    if !slide && requested.y != a.y {
        a = Vector3::zero();
    }

    a.x = obstacles
        .iter()
        .fold(a.x, |dx, cube| aabb_clip_x_collide(cube, &moving, dx));
    aabb_translate(&mut moving, Vector3::new(a.x, 0.0, 0.0));
    if !slide && requested.x != a.x {
        a = Vector3::zero();
    }

    a.z = obstacles
        .iter()
        .fold(a.z, |dz, cube| aabb_clip_z_collide(cube, &moving, dz));
    aabb_translate(&mut moving, Vector3::new(0.0, 0.0, a.z));
    if !slide && requested.z != a.z {
        a = Vector3::zero();
    }

    SweepResult {
        aabb: moving,
        displacement: a,
    }
}

/// Whether the resolved horizontal motion falls short of the request
#[inline]
pub fn horizontal_reduced(requested: Vector3<f32>, resolved: Vector3<f32>) -> bool {
    requested.x != resolved.x || requested.z != resolved.z
}

/// Squared horizontal length, used to pick between a blocked and a stepped attempt
#[inline]
pub fn horizontal_length_squared(v: Vector3<f32>) -> f32 {
    v.x * v.x + v.z * v.z
}

pub fn collision_flags(requested: Vector3<f32>, resolved: Vector3<f32>) -> CollisionFlags {
    let horizontal_collision = horizontal_reduced(requested, resolved);
    let vertical_reduced = requested.y != resolved.y;
    CollisionFlags {
        on_ground: vertical_reduced && requested.y < 0.0,
        horizontal_collision,
        collision: horizontal_collision || vertical_reduced,
    }
}
