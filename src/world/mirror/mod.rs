//! Device-side mirroring of the occupancy octree
//!
//! The octree reports each rewritten mask byte to an `OctreeMirrorSink`. The
//! level owns at most one sink and flushes it explicitly.

pub mod mirror_sink;

#[cfg(feature = "gpu")]
pub mod gpu_mirror;

pub use mirror_sink::{MaskUpdate, OctreeMirrorSink, PendingMaskEdits};

#[cfg(feature = "gpu")]
pub use gpu_mirror::{create_gpu_mirror, create_mirror_context, GpuMirrorContext, GpuOctreeMirror};
