//! Voxel World Module
//!
//! # Architecture Overview
//!
//! - **Core**: Block ids and properties, voxel positions, box faces, the registry
//! - **Storage**: The dense block grid, sole authority on leaf types
//! - **Compute**: The occupancy octree accelerating emptiness queries
//! - **Mirror**: Optional device-side copy of the octree masks
//! - **Level**: Owner of all of the above, queried by entity motion

pub mod compute;
pub mod core;
pub mod level_data;
pub mod level_operations;
pub mod mirror;
pub mod storage;

pub use self::core::{
    BlockFace, BlockId, BlockProperties, BlockRegistryData, LiquidType, RaycastHit, StepSound,
    StepSoundKind, VoxelPos,
};
pub use compute::OccupancyOctreeData;
pub use level_data::LevelData;
pub use mirror::{OctreeMirrorSink, PendingMaskEdits};
pub use storage::VoxelGridData;
