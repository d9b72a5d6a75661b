//! GPU octree mirror
//!
//! Keeps a storage-buffer copy of the octree masks for device-side traversal.
//! Edits are tracked as dirty 4-byte words (the copy alignment) and uploaded in
//! contiguous runs on `flush`, which then blocks until the queue is idle.

use super::mirror_sink::OctreeMirrorSink;
use crate::error::{EngineError, EngineResult, OptionExt};
use crate::world::compute::OccupancyOctreeData;
use bytemuck::{Pod, Zeroable};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use wgpu::util::DeviceExt;

/// Bytes per dirty-tracking word
const WORD_SIZE: usize = 4;

static_assertions::const_assert_eq!(wgpu::COPY_BUFFER_ALIGNMENT, WORD_SIZE as u64);

/// Octree parameters as seen by shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct OctreeParamsUniform {
    pub tree_depth: u32,
    pub mask_count: u32,
    pub dims: [u32; 3],
    pub _padding: [u32; 3],
}

static_assertions::const_assert_eq!(std::mem::size_of::<OctreeParamsUniform>(), 32);

/// Device and queue the mirror uploads through
pub struct GpuMirrorContext {
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
}

/// Request a headless adapter and device
pub fn create_mirror_context() -> EngineResult<GpuMirrorContext> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        force_fallback_adapter: false,
        compatible_surface: None,
    }))
    .ok_or_engine(|| EngineError::DeviceNotFound)?;

    log::info!("[MIRROR] Using adapter: {:?}", adapter.get_info().name);

    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("Octree Mirror Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
        },
        None,
    ))
    .map_err(|e| EngineError::DeviceRequestFailed {
        error: e.to_string(),
    })?;

    Ok(GpuMirrorContext {
        device: Arc::new(device),
        queue: Arc::new(queue),
    })
}

pub struct GpuOctreeMirror {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    mask_buffer: wgpu::Buffer,
    params_buffer: wgpu::Buffer,
    mask_count: usize,
    dirty_words: FxHashSet<usize>,
}

/// Mask byte count padded up to whole words
fn padded_size(mask_count: usize) -> u64 {
    (mask_count.div_ceil(WORD_SIZE) * WORD_SIZE).max(WORD_SIZE) as u64
}

/// Allocate device buffers sized for `octree`. Contents are uploaded by the
/// first `resync`.
pub fn create_gpu_mirror(
    context: &GpuMirrorContext,
    octree: &OccupancyOctreeData,
) -> EngineResult<GpuOctreeMirror> {
    let mask_count = octree.masks.len();
    let size = padded_size(mask_count);

    let max_binding = context.device.limits().max_storage_buffer_binding_size as u64;
    if size > max_binding {
        return Err(EngineError::BufferCreationFailed {
            size,
            usage: "STORAGE | COPY_DST".to_string(),
        });
    }

    let mask_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Octree Mask Buffer"),
        size,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let [w, h, d] = octree.dims;
    let params = OctreeParamsUniform {
        tree_depth: octree.tree_depth,
        mask_count: mask_count as u32,
        dims: [w as u32, h as u32, d as u32],
        _padding: [0; 3],
    };
    let params_buffer = context
        .device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Octree Params Buffer"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

    log::info!(
        "[MIRROR] Created GPU octree mirror: {} mask bytes ({} byte buffer)",
        mask_count,
        size
    );

    Ok(GpuOctreeMirror {
        device: Arc::clone(&context.device),
        queue: Arc::clone(&context.queue),
        mask_buffer,
        params_buffer,
        mask_count,
        dirty_words: FxHashSet::default(),
    })
}

impl GpuOctreeMirror {
    pub fn mask_buffer(&self) -> &wgpu::Buffer {
        &self.mask_buffer
    }

    pub fn params_buffer(&self) -> &wgpu::Buffer {
        &self.params_buffer
    }

    pub fn pending_words(&self) -> usize {
        self.dirty_words.len()
    }

    fn check_size(&self, masks: &[u8]) -> EngineResult<()> {
        if masks.len() != self.mask_count {
            return Err(EngineError::MirrorSizeMismatch {
                expected: self.mask_count,
                found: masks.len(),
            });
        }
        Ok(())
    }

    /// Submit queued writes and wait for the device to finish them
    fn fence(&self) {
        self.queue.submit(std::iter::empty());
        let result = self.device.poll(wgpu::Maintain::Wait);
        if !result.is_queue_empty() {
            log::debug!("[MIRROR] Queue still has submissions after the flush fence");
        }
    }
}

/// Word-aligned copy of `masks[first..last]` (in words), zero-padded at the end
fn word_run_bytes(masks: &[u8], first_word: usize, last_word: usize) -> Vec<u8> {
    let start = first_word * WORD_SIZE;
    let end = (last_word + 1) * WORD_SIZE;
    let mut bytes = vec![0u8; end - start];
    let available = masks.len().min(end).saturating_sub(start);
    bytes[..available].copy_from_slice(&masks[start..start + available]);
    bytes
}

/// Group sorted word indices into inclusive contiguous runs
fn contiguous_runs(sorted_words: &[usize]) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for &word in sorted_words {
        match runs.last_mut() {
            Some((_, last)) if *last + 1 == word => *last = word,
            _ => runs.push((word, word)),
        }
    }
    runs
}

impl OctreeMirrorSink for GpuOctreeMirror {
    fn on_mask_changed(&mut self, index: usize, _value: u8) {
        self.dirty_words.insert(index / WORD_SIZE);
    }

    fn resync(&mut self, masks: &[u8]) -> EngineResult<()> {
        self.check_size(masks)?;
        let words = padded_size(self.mask_count) as usize / WORD_SIZE;
        let bytes = word_run_bytes(masks, 0, words - 1);
        self.queue.write_buffer(&self.mask_buffer, 0, &bytes);
        self.dirty_words.clear();
        self.fence();
        log::debug!("[MIRROR] Full resync of {} mask bytes", masks.len());
        Ok(())
    }

    fn flush(&mut self, masks: &[u8]) -> EngineResult<()> {
        self.check_size(masks)?;
        if self.dirty_words.is_empty() {
            return Ok(());
        }

        let mut words: Vec<usize> = self.dirty_words.drain().collect();
        words.sort_unstable();
        let runs = contiguous_runs(&words);

        for &(first, last) in &runs {
            let bytes = word_run_bytes(masks, first, last);
            self.queue
                .write_buffer(&self.mask_buffer, (first * WORD_SIZE) as u64, &bytes);
        }
        self.fence();

        log::debug!(
            "[MIRROR] Flushed {} dirty words in {} writes",
            words.len(),
            runs.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_size_rounds_to_words() {
        assert_eq!(padded_size(1), 4);
        assert_eq!(padded_size(9), 12);
        assert_eq!(padded_size(37449), 37452);
    }

    #[test]
    fn test_contiguous_runs() {
        assert_eq!(contiguous_runs(&[]), vec![]);
        assert_eq!(
            contiguous_runs(&[0, 1, 2, 5, 7, 8]),
            vec![(0, 2), (5, 5), (7, 8)]
        );
    }

    #[test]
    fn test_word_run_bytes_pads_tail() {
        let masks = [1u8, 2, 3, 4, 5, 6];
        assert_eq!(word_run_bytes(&masks, 0, 0), vec![1, 2, 3, 4]);
        assert_eq!(word_run_bytes(&masks, 1, 1), vec![5, 6, 0, 0]);
        assert_eq!(word_run_bytes(&masks, 0, 1), vec![1, 2, 3, 4, 5, 6, 0, 0]);
    }

    #[test]
    fn test_flush_fences_and_clears_dirty_words() {
        use crate::world::compute::occupancy_octree_operations::{create_octree, octree_set};

        // Headless CI machines may have no adapter at all
        let context = match create_mirror_context() {
            Ok(context) => context,
            Err(EngineError::DeviceNotFound) => return,
            Err(e) => panic!("unexpected device error: {}", e),
        };
        let mut octree = create_octree(16, 16, 16).expect("octree");
        let mut mirror = create_gpu_mirror(&context, &octree).expect("mirror");
        mirror.resync(&octree.masks).expect("resync");

        octree_set(&mut octree, 3, 9, 14, true, Some(&mut mirror));
        octree_set(&mut octree, 4, 9, 14, true, Some(&mut mirror));
        assert!(mirror.pending_words() > 0);

        mirror.flush(&octree.masks).expect("flush");
        assert_eq!(mirror.pending_words(), 0);

        assert!(matches!(
            mirror.flush(&octree.masks[1..]),
            Err(EngineError::MirrorSizeMismatch { .. })
        ));
    }
}
