// Hearth Voxel Sim - Data-Oriented Programming (DOP) Architecture
//
// Simulation core of a voxel game client: a dense block grid, an occupancy
// octree over it, and swept-box entity motion resolved against the level.
// - Plain data structs live in *_data modules
// - Transformations are free functions in *_operations modules
// - The optional GPU mirror is an injected sink owned by the level

// Constants module
pub mod constants;

pub mod config;
pub mod error;

pub mod entity;
pub mod physics;
pub mod world;

pub use config::{EntityConfig, LevelConfig, MirrorConfig, SimConfig};
pub use entity::{move_entity, EntityData, StepSoundEvent};
pub use error::{EngineError, EngineResult, ErrorContext, OptionExt};
pub use physics::AABB;
pub use world::{BlockId, LevelData, OctreeMirrorSink, VoxelPos};

// Re-export wgpu for callers that bind the mirrored octree buffers
#[cfg(feature = "gpu")]
pub use wgpu;

/// Initialize `env_logger` with an `info` default filter.
///
/// `RUST_LOG` overrides the default. Calling this more than once is harmless.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
