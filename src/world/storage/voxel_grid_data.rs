//! Voxel Grid Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in voxel_grid_operations.rs

use crate::world::core::BlockId;

/// Dense block-type array over a bounded region.
///
/// `width` spans x, `height` spans y (up), `depth` spans z. The grid is the
/// sole authority on what type a leaf holds.
#[derive(Clone, Debug)]
pub struct VoxelGridData {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
    /// Indexed by `(y * depth + z) * width + x`
    pub blocks: Vec<BlockId>,
}
