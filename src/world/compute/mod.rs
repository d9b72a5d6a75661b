//! Occupancy acceleration structures
//!
//! The occupancy octree answers "is anything here" for single voxels and
//! whole regions without touching the block grid.

pub mod occupancy_octree_data;
pub mod occupancy_octree_operations;

pub use occupancy_octree_data::OccupancyOctreeData;
