//! Walks an entity across a small terraced level and prints its footsteps.
//!
//! Usage: `cargo run --example walk_on_terrain [config.toml]`

use anyhow::Result;
use cgmath::Vector3;
use hearth_voxel_sim::entity::entity_operations::{
    create_entity, is_in_water, move_relative, reset_position, tick_entity,
};
use hearth_voxel_sim::world::level_operations::{
    create_level, fill_blocks, flush_mirror, set_spawn,
};
use hearth_voxel_sim::{init_logging, move_entity, BlockId, ErrorContext, SimConfig, VoxelPos};

const GRAVITY: f32 = 0.08;
const TICKS: usize = 200;

fn main() -> Result<()> {
    init_logging();

    let mut config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(&path).with_context(|| format!("loading demo config {}", path))?,
        None => SimConfig::default(),
    };
    // Terraces are one block tall
    if config.entity.foot_size == 0.0 {
        config.entity.foot_size = 1.0;
    }
    config.validate()?;

    let mut level = create_level(&config)?;
    let (width, depth) = (level.grid.width, level.grid.depth);

    fill_blocks(&mut level, VoxelPos::new(0, 0, 0), VoxelPos::new(width - 1, 0, depth - 1), BlockId::GRASS);
    for step in 1..4 {
        let start = width / 2 + step * 4;
        fill_blocks(
            &mut level,
            VoxelPos::new(start, 1, 0),
            VoxelPos::new(width - 1, step, depth - 1),
            BlockId::STONE,
        );
    }
    fill_blocks(&mut level, VoxelPos::new(2, 1, 2), VoxelPos::new(4, 1, 4), BlockId::STILL_WATER);
    flush_mirror(&mut level).context("uploading terrain to the mirror")?;

    set_spawn(&mut level, VoxelPos::new(width / 2, 1, depth / 2), 270.0);
    let mut entity = create_entity(&config.entity);
    reset_position(&mut entity, &level);
    log::info!("Spawned at {:?}", entity.position);

    let mut footsteps = 0;
    for tick in 0..TICKS {
        tick_entity(&mut entity);

        let speed = if entity.on_ground { 0.1 } else { 0.02 };
        move_relative(&mut entity, 0.0, 1.0, speed);
        entity.delta.y -= GRAVITY;

        let delta = entity.delta;
        if let Some(step) = move_entity(&mut entity, Some(&level), delta) {
            footsteps += 1;
            log::info!(
                "tick {:>3}: {:?} step (volume {:.2}, pitch {:.2}) at {:.2?}",
                tick,
                step.kind,
                step.volume,
                step.pitch,
                step.position
            );
        }

        entity.delta = Vector3::new(entity.delta.x * 0.91, entity.delta.y * 0.98, entity.delta.z * 0.91);
        if entity.on_ground {
            entity.delta.x *= 0.6;
            entity.delta.z *= 0.6;
        }
    }

    log::info!(
        "Finished at {:?} after walking {:.1} blocks, {} footsteps, in water: {}",
        entity.position,
        entity.walk_distance / 0.6,
        footsteps,
        is_in_water(&entity, &level)
    );
    Ok(())
}
