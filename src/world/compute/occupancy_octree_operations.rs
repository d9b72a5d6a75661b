//! Occupancy Octree Operations - Pure DOP Functions
//!
//! Edits walk a single root-to-leaf path and keep every ancestor bit in sync
//! bottom-up, so a one-voxel change costs `tree_depth` byte updates at most.

use super::occupancy_octree_data::OccupancyOctreeData;
use crate::constants::octree::{MAX_DEPTH, OCTANTS_PER_NODE};
use crate::error::{EngineError, EngineResult};
use crate::world::core::BlockId;
use crate::world::mirror::OctreeMirrorSink;
use crate::world::storage::voxel_grid_operations;
use crate::world::storage::VoxelGridData;

/// Total node count of a tree with `tree_depth` levels: `(8^d - 1) / 7`
pub fn mask_count_for_depth(tree_depth: u32) -> usize {
    (OCTANTS_PER_NODE.pow(tree_depth) - 1) / 7
}

/// Levels needed to cover `max_dimension` voxels per axis, at least one
pub fn depth_for_dimension(max_dimension: i32) -> u32 {
    let mut depth = 1;
    while (1i64 << depth) < max_dimension as i64 {
        depth += 1;
    }
    depth
}

/// Allocate an all-clear octree for a grid of the given extents
pub fn create_octree(width: i32, height: i32, depth: i32) -> EngineResult<OccupancyOctreeData> {
    if width <= 0 || height <= 0 || depth <= 0 {
        return Err(EngineError::InvalidDimensions {
            width,
            height,
            depth,
        });
    }

    let tree_depth = depth_for_dimension(width.max(height).max(depth));
    if tree_depth > MAX_DEPTH {
        return Err(EngineError::InvalidDimensions {
            width,
            height,
            depth,
        });
    }

    let level_offsets = (0..tree_depth).map(mask_count_for_depth).collect();
    let masks = vec![0u8; mask_count_for_depth(tree_depth)];

    log::info!(
        "[OCTREE] Created occupancy octree for {}x{}x{}: depth {}, {} mask bytes",
        width,
        height,
        depth,
        tree_depth,
        masks.len()
    );

    Ok(OccupancyOctreeData {
        tree_depth,
        masks,
        level_offsets,
        dims: [width, height, depth],
    })
}

#[inline]
pub fn octree_in_bounds(octree: &OccupancyOctreeData, x: i32, y: i32, z: i32) -> bool {
    let [w, h, d] = octree.dims;
    x >= 0 && y >= 0 && z >= 0 && x < w && y < h && z < d
}

/// Octant of `(x, y, z)` within the cell at `origin` whose half size is `mid`.
/// Advances `origin` to the chosen child cell.
#[inline]
fn descend(origin: &mut [i32; 3], mid: i32, x: i32, y: i32, z: i32) -> usize {
    let mut octant = 0;
    if x >= origin[0] + mid {
        octant |= 1;
        origin[0] += mid;
    }
    if y >= origin[1] + mid {
        octant |= 2;
        origin[1] += mid;
    }
    if z >= origin[2] + mid {
        octant |= 4;
        origin[2] += mid;
    }
    octant
}

/// Record the occupancy of one voxel.
///
/// Every byte that changes is reported to `sink`. Out-of-range coordinates
/// are ignored.
pub fn octree_set(
    octree: &mut OccupancyOctreeData,
    x: i32,
    y: i32,
    z: i32,
    occupied: bool,
    mut sink: Option<&mut dyn OctreeMirrorSink>,
) {
    if !octree_in_bounds(octree, x, y, z) {
        return;
    }

    let mut path = [(0usize, 0u8); MAX_DEPTH as usize];
    let mut origin = [0i32; 3];
    let mut mid = 1i32 << (octree.tree_depth - 1);
    let mut offset = 0usize;

    for level in 0..octree.tree_depth as usize {
        let node = octree.level_offsets[level] + offset;
        let octant = descend(&mut origin, mid, x, y, z);
        let bit = 1u8 << octant;

        if occupied {
            if octree.masks[node] & bit == 0 {
                octree.masks[node] |= bit;
                if let Some(sink) = sink.as_deref_mut() {
                    sink.on_mask_changed(node, octree.masks[node]);
                }
            }
        } else {
            if octree.masks[node] & bit == 0 {
                return;
            }
            path[level] = (node, bit);
        }

        offset = offset * OCTANTS_PER_NODE + octant;
        mid >>= 1;
    }

    if occupied {
        return;
    }

    for &(node, bit) in path[..octree.tree_depth as usize].iter().rev() {
        octree.masks[node] &= !bit;
        if let Some(sink) = sink.as_deref_mut() {
            sink.on_mask_changed(node, octree.masks[node]);
        }
        if octree.masks[node] != 0 {
            break;
        }
    }
}

/// Whether every bit along the path to `(x, y, z)` is set
pub fn octree_is_occupied(octree: &OccupancyOctreeData, x: i32, y: i32, z: i32) -> bool {
    if !octree_in_bounds(octree, x, y, z) {
        return false;
    }

    let mut origin = [0i32; 3];
    let mut mid = 1i32 << (octree.tree_depth - 1);
    let mut offset = 0usize;

    for level in 0..octree.tree_depth as usize {
        let node = octree.level_offsets[level] + offset;
        let octant = descend(&mut origin, mid, x, y, z);
        if octree.masks[node] & (1 << octant) == 0 {
            return false;
        }
        offset = offset * OCTANTS_PER_NODE + octant;
        mid >>= 1;
    }
    true
}

/// Block at `(x, y, z)`: air as soon as the tree shows an empty octant,
/// otherwise whatever the grid holds.
pub fn octree_get(
    octree: &OccupancyOctreeData,
    grid: &VoxelGridData,
    x: i32,
    y: i32,
    z: i32,
) -> BlockId {
    if !octree_is_occupied(octree, x, y, z) {
        return BlockId::AIR;
    }
    voxel_grid_operations::get_block(grid, x, y, z)
}

/// True iff no occupied voxel lies in the inclusive range `min..=max`
pub fn octree_region_is_empty(octree: &OccupancyOctreeData, min: [i32; 3], max: [i32; 3]) -> bool {
    let mut lo = [0i32; 3];
    let mut hi = [0i32; 3];
    for axis in 0..3 {
        lo[axis] = min[axis].max(0);
        hi[axis] = max[axis].min(octree.dims[axis] - 1);
        if lo[axis] > hi[axis] {
            return true;
        }
    }

    !region_has_occupant(octree, 0, 0, [0; 3], 1 << octree.tree_depth, &lo, &hi)
}

fn region_has_occupant(
    octree: &OccupancyOctreeData,
    level: usize,
    offset: usize,
    origin: [i32; 3],
    size: i32,
    lo: &[i32; 3],
    hi: &[i32; 3],
) -> bool {
    let mask = octree.masks[octree.level_offsets[level] + offset];
    if mask == 0 {
        return false;
    }

    let half = size / 2;
    for octant in 0..OCTANTS_PER_NODE {
        if mask & (1 << octant) == 0 {
            continue;
        }

        let child = [
            origin[0] + if octant & 1 != 0 { half } else { 0 },
            origin[1] + if octant & 2 != 0 { half } else { 0 },
            origin[2] + if octant & 4 != 0 { half } else { 0 },
        ];
        let overlaps = (0..3).all(|axis| child[axis] <= hi[axis] && child[axis] + half - 1 >= lo[axis]);
        if !overlaps {
            continue;
        }

        if level + 1 == octree.tree_depth as usize {
            return true;
        }
        let child_offset = offset * OCTANTS_PER_NODE + octant;
        if region_has_occupant(octree, level + 1, child_offset, child, half, lo, hi) {
            return true;
        }
    }
    false
}
