//! Host-side voxel storage
//!
//! The dense block grid is the authoritative store of leaf types; the
//! occupancy octree in `world::compute` only mirrors which cells are non-empty.

pub mod voxel_grid_data;
pub mod voxel_grid_operations;

pub use voxel_grid_data::VoxelGridData;
