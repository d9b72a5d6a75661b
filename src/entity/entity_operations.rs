//! Entity Operations - Pure DOP Functions
//!
//! Pose bookkeeping and environment probes. Per-tick collision-resolved
//! motion lives in motion_operations.rs.

use super::entity_data::EntityData;
use crate::config::EntityConfig;
use crate::constants::entity::{PITCH_LIMIT_DEGREES, RENDER_DISTANCE_FACTOR, TURN_SCALE};
use crate::constants::physics::LIQUID_PROBE_INSET;
use crate::physics::aabb::{
    aabb_from_center_half_extents, aabb_grow, aabb_intersects, aabb_size, aabb_translated, create_aabb,
};
use crate::world::core::{registry_operations, LiquidType, VoxelPos};
use crate::world::level_operations;
use crate::world::LevelData;
use cgmath::{InnerSpace, MetricSpace, Point3, Vector2, Vector3, Zero};

/// New entity at the origin, sized and flagged from `config`
pub fn create_entity(config: &EntityConfig) -> EntityData {
    let origin = Point3::new(0.0, 0.0, 0.0);
    let mut entity = EntityData {
        position: origin,
        old_position: origin,
        rotation: Vector2::zero(),
        old_rotation: Vector2::zero(),
        delta: Vector3::zero(),
        aabb: create_aabb(origin, origin),
        on_ground: false,
        horizontal_collision: false,
        collision: false,
        width: config.width,
        height: config.height,
        height_offset: config.height_offset,
        foot_size: config.foot_size,
        y_slide_offset: 0.0,
        walk_distance: 0.0,
        old_walk_distance: 0.0,
        fall_distance: 0.0,
        next_step: 1,
        slide: config.slide,
        no_physics: false,
        make_step_sound: config.make_step_sound,
        removed: false,
    };
    set_position(&mut entity, origin);
    entity
}

/// Change the box size. Takes effect at the next `set_position`.
pub fn set_size(entity: &mut EntityData, width: f32, height: f32) {
    entity.width = width;
    entity.height = height;
}

/// Place the entity with its box centered on `position`
pub fn set_position(entity: &mut EntityData, position: Point3<f32>) {
    entity.position = position;
    entity.aabb = aabb_from_center_half_extents(
        position,
        Vector3::new(entity.width / 2.0, entity.height / 2.0, entity.width / 2.0),
    );
}

/// Move to the level spawn, rising one block at a time until the box is clear
pub fn reset_position(entity: &mut EntityData, level: &LevelData) {
    let spawn = level.spawn;
    let x = spawn.x as f32 + 0.5;
    let z = spawn.z as f32 + 0.5;
    let ceiling = level.grid.height as f32 + entity.height + 1.0;

    let mut y = spawn.y as f32 + 0.5;
    loop {
        set_position(entity, Point3::new(x, y, z));
        if level_operations::get_cubes(level, &entity.aabb).is_empty() || y > ceiling {
            break;
        }
        y += 1.0;
    }

    log::debug!(
        "[ENTITY] Reset to spawn {:?}, settled at y = {}",
        spawn,
        entity.position.y
    );

    entity.delta = Vector3::zero();
    entity.rotation = Vector2::new(0.0, level.spawn_rotation);
}

pub fn remove_entity(entity: &mut EntityData) {
    entity.removed = true;
}

fn apply_turn(entity: &mut EntityData, yaw: f32, pitch: f32) {
    entity.rotation.y += yaw * TURN_SCALE;
    entity.rotation.x -= pitch * TURN_SCALE;
    entity.rotation.x = entity.rotation.x.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
}

/// Mouse-look turn. The previous rotation moves by the same amount so the
/// turn is not smeared by interpolation.
pub fn turn(entity: &mut EntityData, yaw: f32, pitch: f32) {
    let before = entity.rotation;
    apply_turn(entity, yaw, pitch);
    entity.old_rotation += entity.rotation - before;
}

/// Turn without touching the previous rotation
pub fn interpolate_turn(entity: &mut EntityData, yaw: f32, pitch: f32) {
    apply_turn(entity, yaw, pitch);
}

/// Snapshot the state the renderer interpolates from
pub fn tick_entity(entity: &mut EntityData) {
    entity.old_walk_distance = entity.walk_distance;
    entity.old_position = entity.position;
    entity.old_rotation = entity.rotation;
}

/// Whether the box, moved by `offset`, touches no solid cube and no liquid
pub fn is_free(entity: &EntityData, level: &LevelData, offset: Vector3<f32>) -> bool {
    let probe = aabb_translated(&entity.aabb, offset);
    level_operations::get_cubes(level, &probe).is_empty() && !level_operations::contains_any_liquid(level, &probe)
}

/// `is_free` for the box grown by `scale` on every side
pub fn is_free_scaled(entity: &EntityData, level: &LevelData, offset: Vector3<f32>, scale: f32) -> bool {
    let grown = aabb_grow(&entity.aabb, Vector3::new(scale, scale, scale));
    let probe = aabb_translated(&grown, offset);
    level_operations::get_cubes(level, &probe).is_empty() && !level_operations::contains_any_liquid(level, &probe)
}

pub fn is_in_water(entity: &EntityData, level: &LevelData) -> bool {
    let probe = aabb_grow(&entity.aabb, Vector3::new(0.0, -LIQUID_PROBE_INSET, 0.0));
    level_operations::contains_liquid(level, &probe, LiquidType::Water)
}

pub fn is_in_lava(entity: &EntityData, level: &LevelData) -> bool {
    let inset = -LIQUID_PROBE_INSET;
    let probe = aabb_grow(&entity.aabb, Vector3::new(inset, inset, inset));
    level_operations::contains_liquid(level, &probe, LiquidType::Lava)
}

/// Whether the cell at the entity's position holds water
pub fn is_under_water(entity: &EntityData, level: &LevelData) -> bool {
    let cell = VoxelPos::containing(entity.position);
    let block = level_operations::get_tile(level, cell.x, cell.y, cell.z);
    block.is_occupied() && registry_operations::liquid_type(&level.registry, block) == LiquidType::Water
}

/// Accelerate along the input direction `(x, z)`, rotated by the entity's yaw.
/// Inputs shorter than 0.01 are ignored; shorter than 1 are not amplified.
pub fn move_relative(entity: &mut EntityData, x: f32, z: f32, speed: f32) {
    let input = Vector2::new(x, z);
    let length = input.magnitude();
    if length < 0.01 {
        return;
    }

    let scaled = input * (speed / length.max(1.0));
    let (sin, cos) = entity.rotation.y.to_radians().sin_cos();
    entity.delta.x += scaled.x * cos - scaled.y * sin;
    entity.delta.z += scaled.y * cos + scaled.x * sin;
}

/// Teleport, recording the current position as the previous one
pub fn move_to(entity: &mut EntityData, position: Point3<f32>, rotation: Vector2<f32>) {
    entity.old_position = entity.position;
    entity.rotation = rotation;
    set_position(entity, position);
}

pub fn distance_to(a: &EntityData, b: &EntityData) -> f32 {
    a.position.distance(b.position)
}

pub fn distance_to_point(entity: &EntityData, point: Point3<f32>) -> f32 {
    entity.position.distance(point)
}

pub fn squared_distance_to(a: &EntityData, b: &EntityData) -> f32 {
    a.position.distance2(b.position)
}

pub fn push_towards(entity: &mut EntityData, push: Vector3<f32>) {
    entity.delta += push;
}

/// Strict overlap with the box `min..max`
pub fn intersects(entity: &EntityData, min: Point3<f32>, max: Point3<f32>) -> bool {
    aabb_intersects(&entity.aabb, &create_aabb(min, max))
}

pub fn should_render(entity: &EntityData, viewer: Point3<f32>) -> bool {
    should_render_at_squared_distance(entity, entity.position.distance2(viewer))
}

/// Larger entities stay visible further away: the cutoff is 64 average extents
pub fn should_render_at_squared_distance(entity: &EntityData, squared_distance: f32) -> bool {
    let limit = aabb_size(&entity.aabb) * RENDER_DISTANCE_FACTOR;
    squared_distance < limit * limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::world::core::BlockId;
    use crate::world::level_operations::{create_level, fill_blocks, set_block, set_spawn};

    fn test_level() -> LevelData {
        let mut config = SimConfig::default();
        config.level.width = 16;
        config.level.height = 16;
        config.level.depth = 16;
        create_level(&config).expect("level")
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_create_uses_config_defaults() {
        let entity = create_entity(&EntityConfig::default());
        assert_eq!(entity.width, 0.6);
        assert_eq!(entity.height, 1.8);
        assert_eq!(entity.next_step, 1);
        assert!(entity.slide);
        assert!(entity.make_step_sound);
        assert!(approx(entity.aabb.max.y - entity.aabb.min.y, 1.8));
    }

    #[test]
    fn test_set_position_centers_box() {
        let mut entity = create_entity(&EntityConfig::default());
        set_size(&mut entity, 1.0, 2.0);
        set_position(&mut entity, Point3::new(4.0, 5.0, 6.0));
        assert_eq!(entity.aabb.min, Point3::new(3.5, 4.0, 5.5));
        assert_eq!(entity.aabb.max, Point3::new(4.5, 6.0, 6.5));
    }

    #[test]
    fn test_turn_clamps_pitch_and_carries_old_rotation() {
        let mut entity = create_entity(&EntityConfig::default());
        turn(&mut entity, 100.0, -1000.0);
        assert!(approx(entity.rotation.y, 15.0));
        assert_eq!(entity.rotation.x, 90.0);
        assert_eq!(entity.old_rotation, entity.rotation);

        interpolate_turn(&mut entity, 10.0, 0.0);
        assert!(approx(entity.rotation.y, 16.5));
        assert!(approx(entity.old_rotation.y, 15.0));

        tick_entity(&mut entity);
        assert_eq!(entity.old_rotation, entity.rotation);
    }

    #[test]
    fn test_move_relative_rotates_by_yaw() {
        let mut entity = create_entity(&EntityConfig::default());
        move_relative(&mut entity, 0.0, 1.0, 0.1);
        assert!(approx(entity.delta.z, 0.1));
        assert!(approx(entity.delta.x, 0.0));

        let mut turned = create_entity(&EntityConfig::default());
        turned.rotation.y = 90.0;
        move_relative(&mut turned, 0.0, 1.0, 0.1);
        assert!(approx(turned.delta.x, -0.1));
        assert!(approx(turned.delta.z, 0.0));

        // Small inputs are not amplified, tiny ones are dropped
        let mut slow = create_entity(&EntityConfig::default());
        move_relative(&mut slow, 0.5, 0.0, 0.1);
        assert!(approx(slow.delta.x, 0.05));
        move_relative(&mut slow, 0.001, 0.0, 0.1);
        assert!(approx(slow.delta.x, 0.05));
    }

    #[test]
    fn test_reset_position_rises_out_of_blocks() {
        let mut level = test_level();
        fill_blocks(&mut level, VoxelPos::new(4, 0, 4), VoxelPos::new(4, 5, 4), BlockId::STONE);
        set_spawn(&mut level, VoxelPos::new(4, 0, 4), 45.0);

        let mut entity = create_entity(&EntityConfig::default());
        entity.delta = Vector3::new(1.0, 1.0, 1.0);
        entity.rotation.x = 30.0;
        reset_position(&mut entity, &level);

        assert!(approx(entity.position.x, 4.5));
        assert!(approx(entity.position.z, 4.5));
        assert!(approx(entity.position.y, 7.5));
        assert_eq!(entity.delta, Vector3::zero());
        assert_eq!(entity.rotation, Vector2::new(0.0, 45.0));
    }

    #[test]
    fn test_free_and_liquid_probes() {
        let mut level = test_level();
        set_block(&mut level, 2, 1, 2, BlockId::STONE);
        set_block(&mut level, 8, 1, 8, BlockId::STILL_WATER);
        set_block(&mut level, 8, 2, 8, BlockId::STILL_WATER);
        set_block(&mut level, 12, 1, 12, BlockId::LAVA);
        set_block(&mut level, 12, 2, 12, BlockId::LAVA);

        let mut entity = create_entity(&EntityConfig::default());
        set_position(&mut entity, Point3::new(2.5, 3.5, 4.5));
        assert!(is_free(&entity, &level, Vector3::zero()));
        assert!(!is_free(&entity, &level, Vector3::new(0.0, -1.5, -2.0)));
        assert!(!is_free_scaled(&entity, &level, Vector3::new(0.0, -1.5, -1.5), 0.5));

        set_position(&mut entity, Point3::new(8.5, 2.0, 8.5));
        assert!(is_in_water(&entity, &level));
        assert!(is_under_water(&entity, &level));
        assert!(!is_in_lava(&entity, &level));
        assert!(!is_free(&entity, &level, Vector3::zero()));

        set_position(&mut entity, Point3::new(12.5, 2.0, 12.5));
        assert!(is_in_lava(&entity, &level));
        assert!(!is_in_water(&entity, &level));
    }

    #[test]
    fn test_distances_and_render_cutoff() {
        let mut a = create_entity(&EntityConfig::default());
        let mut b = create_entity(&EntityConfig::default());
        set_position(&mut a, Point3::new(0.0, 0.0, 0.0));
        set_position(&mut b, Point3::new(3.0, 4.0, 0.0));
        assert!(approx(distance_to(&a, &b), 5.0));
        assert!(approx(squared_distance_to(&a, &b), 25.0));
        assert!(approx(distance_to_point(&a, Point3::new(0.0, 0.0, 2.0)), 2.0));

        // Average extent (0.6 + 1.8 + 0.6) / 3 = 1.0, cutoff 64
        assert!(should_render_at_squared_distance(&a, 63.9 * 63.9));
        assert!(!should_render_at_squared_distance(&a, 64.1 * 64.1));
        assert!(should_render(&a, Point3::new(10.0, 0.0, 0.0)));
        assert!(!should_render(&a, Point3::new(100.0, 0.0, 0.0)));
    }

    #[test]
    fn test_push_move_to_intersects_remove() {
        let mut entity = create_entity(&EntityConfig::default());
        push_towards(&mut entity, Vector3::new(0.5, 0.0, -0.5));
        assert_eq!(entity.delta, Vector3::new(0.5, 0.0, -0.5));

        move_to(&mut entity, Point3::new(1.0, 2.0, 3.0), Vector2::new(10.0, 20.0));
        assert_eq!(entity.old_position, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(entity.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(entity.rotation, Vector2::new(10.0, 20.0));

        assert!(intersects(&entity, Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0)));
        assert!(!intersects(&entity, Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0)));

        remove_entity(&mut entity);
        assert!(entity.removed);
    }
}
