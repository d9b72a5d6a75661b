//! Octree mirror sink
//!
//! A sink receives every byte the occupancy octree rewrites, as
//! `(byte index, new byte value)`. The octree never owns a sink; the level
//! passes its attached sink into each edit.

use crate::error::{EngineError, EngineResult};
use rustc_hash::FxHashMap;

/// A single rewritten mask byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskUpdate {
    pub index: usize,
    pub value: u8,
}

/// Consumer of incremental octree mask edits
pub trait OctreeMirrorSink {
    /// Called once per mask byte the octree changes
    fn on_mask_changed(&mut self, index: usize, value: u8);

    /// Replace the mirrored contents with a full copy of `masks`
    fn resync(&mut self, masks: &[u8]) -> EngineResult<()> {
        let _ = masks;
        Ok(())
    }

    /// Push pending edits. Must not return before the edits are visible to
    /// the consumer.
    fn flush(&mut self, masks: &[u8]) -> EngineResult<()> {
        let _ = masks;
        Ok(())
    }
}

/// In-memory sink that coalesces edits; the last value written to an index wins.
#[derive(Debug, Default, Clone)]
pub struct PendingMaskEdits {
    edits: FxHashMap<usize, u8>,
    mirror_len: Option<usize>,
    /// Edits received since creation, including overwritten ones
    pub received: usize,
}

impl PendingMaskEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.edits.get(&index).copied()
    }

    /// Take every pending edit in ascending index order
    pub fn drain_sorted(&mut self) -> Vec<MaskUpdate> {
        let mut updates: Vec<MaskUpdate> = self
            .edits
            .drain()
            .map(|(index, value)| MaskUpdate { index, value })
            .collect();
        updates.sort_unstable_by_key(|u| u.index);
        updates
    }
}

impl OctreeMirrorSink for PendingMaskEdits {
    fn on_mask_changed(&mut self, index: usize, value: u8) {
        self.received += 1;
        self.edits.insert(index, value);
    }

    fn resync(&mut self, masks: &[u8]) -> EngineResult<()> {
        self.edits.clear();
        self.mirror_len = Some(masks.len());
        for (index, value) in masks.iter().enumerate() {
            if *value != 0 {
                self.edits.insert(index, *value);
            }
        }
        Ok(())
    }

    fn flush(&mut self, masks: &[u8]) -> EngineResult<()> {
        if let Some(expected) = self.mirror_len {
            if expected != masks.len() {
                return Err(EngineError::MirrorSizeMismatch {
                    expected,
                    found: masks.len(),
                });
            }
        }
        self.edits.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut pending = PendingMaskEdits::new();
        pending.on_mask_changed(9, 0b0000_0001);
        pending.on_mask_changed(2, 0b1000_0000);
        pending.on_mask_changed(9, 0);
        assert_eq!(pending.received, 3);
        assert_eq!(
            pending.drain_sorted(),
            vec![
                MaskUpdate { index: 2, value: 0b1000_0000 },
                MaskUpdate { index: 9, value: 0 },
            ]
        );
        assert!(pending.is_empty());
    }

    #[test]
    fn test_resync_then_flush_checks_size() {
        let mut pending = PendingMaskEdits::new();
        pending.resync(&[0, 3, 0, 1]).expect("resync");
        assert_eq!(pending.len(), 2);
        assert_eq!(pending.get(1), Some(3));

        pending.flush(&[0, 3, 0, 1]).expect("same size flush");
        assert!(pending.is_empty());
        assert!(matches!(
            pending.flush(&[0; 9]),
            Err(EngineError::MirrorSizeMismatch { expected: 4, found: 9 })
        ));
    }
}
