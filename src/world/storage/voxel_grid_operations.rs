//! Voxel Grid Operations - Pure DOP Functions
//!
//! Out-of-range coordinates are never an error: reads return air and writes
//! are ignored.

use super::voxel_grid_data::VoxelGridData;
use crate::error::{EngineError, EngineResult};
use crate::world::core::BlockId;

/// Create a grid filled with air
pub fn create_voxel_grid(width: i32, height: i32, depth: i32) -> EngineResult<VoxelGridData> {
    if width <= 0 || height <= 0 || depth <= 0 {
        return Err(EngineError::InvalidDimensions {
            width,
            height,
            depth,
        });
    }
    let total = width as usize * height as usize * depth as usize;
    Ok(VoxelGridData {
        width,
        height,
        depth,
        blocks: vec![BlockId::AIR; total],
    })
}

#[inline]
pub fn in_bounds(data: &VoxelGridData, x: i32, y: i32, z: i32) -> bool {
    x >= 0 && y >= 0 && z >= 0 && x < data.width && y < data.height && z < data.depth
}

/// Flat index of an in-bounds cell
#[inline]
pub fn index_of(data: &VoxelGridData, x: i32, y: i32, z: i32) -> Option<usize> {
    if !in_bounds(data, x, y, z) {
        return None;
    }
    Some(((y * data.depth + z) * data.width + x) as usize)
}

/// Block at position, air when out of range
#[inline]
pub fn get_block(data: &VoxelGridData, x: i32, y: i32, z: i32) -> BlockId {
    index_of(data, x, y, z)
        .map(|i| data.blocks[i])
        .unwrap_or(BlockId::AIR)
}

/// Store a block; returns the previous type, or `None` when out of range
pub fn set_block(data: &mut VoxelGridData, x: i32, y: i32, z: i32, block: BlockId) -> Option<BlockId> {
    let index = index_of(data, x, y, z)?;
    Some(std::mem::replace(&mut data.blocks[index], block))
}
