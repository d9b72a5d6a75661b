//! Occupancy Octree Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in occupancy_octree_operations.rs

/// Bitmask tree mirroring grid occupancy at power-of-two scales.
///
/// One byte per node, bit `q` set iff octant `q` holds at least one occupied
/// leaf. Nodes of level `i` start at `level_offsets[i] == (8^i - 1) / 7`; the
/// root is byte 0 and the last level's bits address single voxels.
#[derive(Clone, Debug)]
pub struct OccupancyOctreeData {
    /// Number of node levels; the root cell spans `2^tree_depth` voxels per axis
    pub tree_depth: u32,
    pub masks: Vec<u8>,
    pub level_offsets: Vec<usize>,
    /// Grid extents (x, y, z) the tree covers
    pub dims: [i32; 3],
}
