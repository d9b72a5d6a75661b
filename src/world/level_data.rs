//! Level Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in level_operations.rs

use crate::world::compute::OccupancyOctreeData;
use crate::world::core::{BlockRegistryData, VoxelPos};
use crate::world::mirror::OctreeMirrorSink;
use crate::world::storage::VoxelGridData;

/// One loaded level: the authoritative grid, its occupancy octree, block
/// properties and the optional device mirror the octree reports edits to.
pub struct LevelData {
    pub grid: VoxelGridData,
    pub octree: OccupancyOctreeData,
    pub registry: BlockRegistryData,
    pub spawn: VoxelPos,
    /// Yaw given to entities reset to spawn (degrees)
    pub spawn_rotation: f32,
    /// Cells beside and below the grid collide like bedrock
    pub solid_world_border: bool,
    pub mirror: Option<Box<dyn OctreeMirrorSink>>,
}
