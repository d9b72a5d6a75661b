//! Motion Operations - Pure DOP Functions
//!
//! One call per tick resolves the entity's requested displacement against
//! the level's solid cubes and updates pose, contact flags and the
//! walk/fall accumulators.

use super::entity_data::{EntityData, StepSoundEvent};
use crate::constants::physics::{
    NEGLIGIBLE_DISPLACEMENT, SLIDE_OFFSET_DECAY, STEP_PROBE_DEPTH, STEP_SLIDE_INCREMENT,
    STEP_SLIDE_THRESHOLD, STEP_VOLUME_SCALE, WALK_DISTANCE_SCALE,
};
use crate::physics::aabb::{aabb_expand, aabb_translate};
use crate::physics::collision_operations::{
    collision_flags, horizontal_length_squared, horizontal_reduced, sweep_aabb,
};
use crate::world::core::{registry_operations, StepSoundKind, VoxelPos};
use crate::world::level_operations;
use crate::world::LevelData;
use cgmath::{InnerSpace, Point3, Vector2, Vector3};

#[inline]
fn is_negligible(a: Vector3<f32>) -> bool {
    a.x.abs() < NEGLIGIBLE_DISPLACEMENT
        && a.y.abs() < NEGLIGIBLE_DISPLACEMENT
        && a.z.abs() < NEGLIGIBLE_DISPLACEMENT
}

/// Position derived from the box: horizontal center, feet plus height offset
/// minus the current slide offset
fn sync_position_to_aabb(entity: &mut EntityData) {
    entity.position.x = (entity.aabb.min.x + entity.aabb.max.x) / 2.0;
    entity.position.z = (entity.aabb.min.z + entity.aabb.max.z) / 2.0;
    entity.position.y = entity.aabb.min.y + entity.height_offset - entity.y_slide_offset;
}

/// Move without any collision checks
fn move_unclipped(entity: &mut EntityData, a: Vector3<f32>) {
    aabb_translate(&mut entity.aabb, a);
    sync_position_to_aabb(entity);
}

/// Move the entity by `a` for one tick.
///
/// Without a level, or with `no_physics` set, the box is translated as-is.
/// Otherwise motion is clipped against the level, a step-up is attempted when
/// walking into a ledge no taller than `foot_size`, and a footstep is returned
/// whenever the walk distance crosses the next step threshold.
pub fn move_entity(entity: &mut EntityData, level: Option<&LevelData>, a: Vector3<f32>) -> Option<StepSoundEvent> {
    if is_negligible(a) {
        return None;
    }

    let level = match level {
        Some(level) if !entity.no_physics => level,
        _ => {
            move_unclipped(entity, a);
            return None;
        }
    };

    let start_xz = Vector2::new(entity.position.x, entity.position.z);
    let start_aabb = entity.aabb;

    let candidates = level_operations::get_cubes(level, &aabb_expand(&start_aabb, a));
    let blocked = sweep_aabb(&start_aabb, a, &candidates, entity.slide);
    let mut resolved = blocked.displacement;
    entity.aabb = blocked.aabb;

    let grounded = entity.on_ground || (a.y != resolved.y && a.y < 0.0);
    if entity.foot_size > 0.0
        && grounded
        && entity.y_slide_offset < STEP_SLIDE_THRESHOLD
        && horizontal_reduced(a, resolved)
    {
        let step_request = Vector3::new(a.x, entity.foot_size, a.z);
        let step_candidates = level_operations::get_cubes(level, &aabb_expand(&start_aabb, step_request));
        let stepped = sweep_aabb(&start_aabb, step_request, &step_candidates, entity.slide);

        if horizontal_length_squared(stepped.displacement) > horizontal_length_squared(resolved) {
            resolved = stepped.displacement;
            entity.aabb = stepped.aabb;
            entity.y_slide_offset += STEP_SLIDE_INCREMENT;
        }
    }

    let flags = collision_flags(a, resolved);
    entity.on_ground = flags.on_ground;
    entity.horizontal_collision = flags.horizontal_collision;
    entity.collision = flags.collision;

    if entity.on_ground {
        if entity.fall_distance > 0.0 {
            entity.fall_distance = 0.0;
        }
    } else if resolved.y < 0.0 {
        entity.fall_distance -= resolved.y;
    }

    if a.x != resolved.x {
        entity.delta.x = 0.0;
    }
    if a.y != resolved.y {
        entity.delta.y = 0.0;
    }
    if a.z != resolved.z {
        entity.delta.z = 0.0;
    }

    sync_position_to_aabb(entity);
    let walked = Vector2::new(entity.position.x, entity.position.z) - start_xz;
    entity.walk_distance += walked.magnitude() * WALK_DISTANCE_SCALE;

    let step = if entity.make_step_sound {
        footstep(entity, level)
    } else {
        None
    };

    entity.y_slide_offset *= SLIDE_OFFSET_DECAY;
    step
}

/// Advance the step counter and produce a footstep when one is due
fn footstep(entity: &mut EntityData, level: &LevelData) -> Option<StepSoundEvent> {
    let feet = Point3::new(
        entity.position.x,
        entity.position.y - entity.height_offset - STEP_PROBE_DEPTH,
        entity.position.z,
    );
    let cell = VoxelPos::containing(feet);
    let block = level_operations::get_tile(level, cell.x, cell.y, cell.z);

    if entity.walk_distance <= entity.next_step as f32 || !block.is_occupied() {
        return None;
    }
    entity.next_step += 1;

    let sound = registry_operations::step_sound(&level.registry, block);
    if sound.kind == StepSoundKind::None {
        return None;
    }
    Some(StepSoundEvent {
        kind: sound.kind,
        volume: sound.volume * STEP_VOLUME_SCALE,
        pitch: sound.pitch,
        position: entity.position,
    })
}
