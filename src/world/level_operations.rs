//! Level Operations - Pure DOP Functions
//!
//! Every edit goes to the grid first and then to the octree, which forwards
//! changed mask bytes to the attached mirror.

use super::level_data::LevelData;
use crate::config::SimConfig;
use crate::error::EngineResult;
use crate::physics::aabb::{aabb_clip, aabb_expand, aabb_intersects_inner, create_aabb, unit_cube, AABB};
use crate::world::compute::occupancy_octree_operations as octree_ops;
use crate::world::core::{registry_operations, BlockId, LiquidType, RaycastHit, VoxelPos};
use crate::world::mirror::OctreeMirrorSink;
use crate::world::storage::voxel_grid_operations as grid_ops;
use cgmath::Point3;

/// Allocate an empty level sized by `config`. When the mirror is enabled a
/// GPU mirror is created and attached; failures are returned, not logged away.
pub fn create_level(config: &SimConfig) -> EngineResult<LevelData> {
    let level_config = &config.level;
    let grid = grid_ops::create_voxel_grid(level_config.width, level_config.height, level_config.depth)?;
    let octree = octree_ops::create_octree(grid.width, grid.height, grid.depth)?;

    let mut level = LevelData {
        spawn: VoxelPos::new(grid.width / 2, grid.height, grid.depth / 2),
        grid,
        octree,
        registry: registry_operations::create_block_registry(),
        spawn_rotation: 0.0,
        solid_world_border: level_config.solid_world_border,
        mirror: None,
    };

    log::info!(
        "[LEVEL] Created {}x{}x{} level, spawn at {:?}",
        level.grid.width,
        level.grid.height,
        level.grid.depth,
        level.spawn
    );

    if config.mirror.enabled {
        let mirror = create_device_mirror(&level)?;
        attach_mirror(&mut level, mirror)?;
    }

    Ok(level)
}

#[cfg(feature = "gpu")]
fn create_device_mirror(level: &LevelData) -> EngineResult<Box<dyn OctreeMirrorSink>> {
    use crate::world::mirror::{create_gpu_mirror, create_mirror_context};

    let context = create_mirror_context()?;
    Ok(Box::new(create_gpu_mirror(&context, &level.octree)?))
}

#[cfg(not(feature = "gpu"))]
fn create_device_mirror(_level: &LevelData) -> EngineResult<Box<dyn OctreeMirrorSink>> {
    Err(crate::error::EngineError::InvalidConfig {
        field: "mirror.enabled".to_string(),
        value: "true".to_string(),
        reason: "built without the `gpu` feature".to_string(),
    })
}

/// Attach a mirror and bring it up to date with a full resync.
/// Any previously attached mirror is returned.
pub fn attach_mirror(
    level: &mut LevelData,
    mut sink: Box<dyn OctreeMirrorSink>,
) -> EngineResult<Option<Box<dyn OctreeMirrorSink>>> {
    sink.resync(&level.octree.masks)?;
    log::info!(
        "[LEVEL] Mirror attached ({} mask bytes)",
        level.octree.masks.len()
    );
    Ok(level.mirror.replace(sink))
}

pub fn detach_mirror(level: &mut LevelData) -> Option<Box<dyn OctreeMirrorSink>> {
    let detached = level.mirror.take();
    if detached.is_some() {
        log::info!("[LEVEL] Mirror detached");
    }
    detached
}

/// Push pending octree edits to the attached mirror, if any
pub fn flush_mirror(level: &mut LevelData) -> EngineResult<()> {
    match level.mirror.as_mut() {
        Some(mirror) => mirror.flush(&level.octree.masks),
        None => Ok(()),
    }
}

/// Store a block. Returns false when out of range or unchanged.
pub fn set_block(level: &mut LevelData, x: i32, y: i32, z: i32, block: BlockId) -> bool {
    match grid_ops::set_block(&mut level.grid, x, y, z, block) {
        Some(previous) if previous != block => {
            let sink = level
                .mirror
                .as_mut()
                .map(|m| m.as_mut() as &mut dyn OctreeMirrorSink);
            octree_ops::octree_set(&mut level.octree, x, y, z, block.is_occupied(), sink);
            true
        }
        _ => false,
    }
}

/// Fill the inclusive box `min..=max`, clipped to the level
pub fn fill_blocks(level: &mut LevelData, min: VoxelPos, max: VoxelPos, block: BlockId) -> usize {
    let mut changed = 0;
    for y in min.y.max(0)..=max.y.min(level.grid.height - 1) {
        for z in min.z.max(0)..=max.z.min(level.grid.depth - 1) {
            for x in min.x.max(0)..=max.x.min(level.grid.width - 1) {
                if set_block(level, x, y, z, block) {
                    changed += 1;
                }
            }
        }
    }
    changed
}

/// Block lookup that short-circuits through the octree
pub fn get_block(level: &LevelData, x: i32, y: i32, z: i32) -> BlockId {
    octree_ops::octree_get(&level.octree, &level.grid, x, y, z)
}

/// Direct grid lookup
pub fn get_tile(level: &LevelData, x: i32, y: i32, z: i32) -> BlockId {
    grid_ops::get_block(&level.grid, x, y, z)
}

pub fn is_solid_tile(level: &LevelData, x: i32, y: i32, z: i32) -> bool {
    let block = get_block(level, x, y, z);
    block.is_occupied() && registry_operations::is_solid(&level.registry, block)
}

pub fn set_spawn(level: &mut LevelData, spawn: VoxelPos, rotation: f32) {
    level.spawn = spawn;
    level.spawn_rotation = rotation;
}

/// Integer cell range `[lo, hi)` covered by a box, per axis, limited to the
/// grid plus the one-cell border shell around it
fn covered_cells(level: &LevelData, aabb: &AABB) -> ([i32; 3], [i32; 3]) {
    let dims = [level.grid.width, level.grid.height, level.grid.depth];
    let min = [aabb.min.x, aabb.min.y, aabb.min.z];
    let max = [aabb.max.x, aabb.max.y, aabb.max.z];

    let mut lo = [0i32; 3];
    let mut hi = [0i32; 3];
    for axis in 0..3 {
        // `as` saturates, so the clamp keeps far-away boxes in range
        lo[axis] = (min[axis].floor() as i32).clamp(-1, dims[axis] + 1);
        hi[axis] = ((max[axis] + 1.0).floor() as i32).clamp(-1, dims[axis] + 1);
    }
    (lo, hi)
}

/// Whether a cell outside the grid acts as a wall. Cells above the top never do.
#[inline]
fn is_border_cell(level: &LevelData, x: i32, y: i32, z: i32) -> bool {
    x < 0 || y < 0 || z < 0 || x >= level.grid.width || z >= level.grid.depth
}

/// Every solid unit cube touching `aabb` (inclusive overlap), plus bedrock
/// walls for border cells when the level has a solid border.
pub fn get_cubes(level: &LevelData, aabb: &AABB) -> Vec<AABB> {
    let (lo, hi) = covered_cells(level, aabb);
    let mut cubes = Vec::new();

    let interior_empty =
        octree_ops::octree_region_is_empty(&level.octree, lo, [hi[0] - 1, hi[1] - 1, hi[2] - 1]);
    if interior_empty && !level.solid_world_border {
        return cubes;
    }

    for x in lo[0]..hi[0] {
        for y in lo[1]..hi[1] {
            for z in lo[2]..hi[2] {
                let solid = if grid_ops::in_bounds(&level.grid, x, y, z) {
                    !interior_empty && is_solid_tile(level, x, y, z)
                } else {
                    level.solid_world_border && is_border_cell(level, x, y, z)
                };
                if !solid {
                    continue;
                }

                let cube = unit_cube(x, y, z);
                if aabb_intersects_inner(aabb, &cube) {
                    cubes.push(cube);
                }
            }
        }
    }
    cubes
}

/// First solid cube hit along the segment `from -> to`, with the cell it belongs to
pub fn clip_segment(level: &LevelData, from: Point3<f32>, to: Point3<f32>) -> Option<(VoxelPos, RaycastHit)> {
    let swept = aabb_expand(&create_aabb(from, from), to - from);
    get_cubes(level, &swept)
        .iter()
        .filter_map(|cube| aabb_clip(cube, from, to).map(|hit| (VoxelPos::containing(cube.min), hit)))
        .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance))
}

/// Whether any in-bounds cell covered by `aabb` holds a liquid
pub fn contains_any_liquid(level: &LevelData, aabb: &AABB) -> bool {
    scan_liquid(level, aabb, |liquid| liquid != LiquidType::None)
}

/// Whether any in-bounds cell covered by `aabb` holds the given liquid
pub fn contains_liquid(level: &LevelData, aabb: &AABB, kind: LiquidType) -> bool {
    scan_liquid(level, aabb, |liquid| liquid == kind)
}

fn scan_liquid(level: &LevelData, aabb: &AABB, accept: impl Fn(LiquidType) -> bool) -> bool {
    let (lo, hi) = covered_cells(level, aabb);
    let lo = [lo[0].max(0), lo[1].max(0), lo[2].max(0)];
    let hi = [
        hi[0].min(level.grid.width),
        hi[1].min(level.grid.height),
        hi[2].min(level.grid.depth),
    ];

    if lo[0] >= hi[0] || lo[1] >= hi[1] || lo[2] >= hi[2] {
        return false;
    }
    if octree_ops::octree_region_is_empty(&level.octree, lo, [hi[0] - 1, hi[1] - 1, hi[2] - 1]) {
        return false;
    }

    for x in lo[0]..hi[0] {
        for y in lo[1]..hi[1] {
            for z in lo[2]..hi[2] {
                let block = get_block(level, x, y, z);
                if block.is_occupied() && accept(registry_operations::liquid_type(&level.registry, block)) {
                    return true;
                }
            }
        }
    }
    false
}
