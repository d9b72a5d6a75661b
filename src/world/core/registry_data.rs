//! Block Registry Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in registry_operations.rs

use super::{BlockId, BlockProperties};

/// Block registration data
#[derive(Debug, Clone)]
pub struct BlockRegistration {
    pub id: BlockId,
    pub properties: BlockProperties,
}

/// Registry data that stores all block types
#[derive(Debug, Clone)]
pub struct BlockRegistryData {
    /// Properties indexed directly by the block byte; `None` = unregistered
    pub blocks: Vec<Option<BlockProperties>>,
    /// All registered blocks, in registration order
    pub registrations: Vec<BlockRegistration>,
}
