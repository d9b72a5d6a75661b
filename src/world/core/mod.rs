//! Core world data types and fundamental structures
//!
//! Block identifiers and properties, voxel positions, box faces and the block
//! registry. Everything else in the world module builds on these.

mod block;
mod position;
mod ray;
pub mod registry_data;
pub mod registry_operations;

pub use block::{BlockId, BlockProperties, LiquidType, StepSound, StepSoundKind};
pub use position::VoxelPos;
pub use ray::{BlockFace, RaycastHit};
pub use registry_data::{BlockRegistration, BlockRegistryData};
