//! Block Registry Operations - Pure DOP Functions
//!
//! All functions take registry data and return results. No methods, no self.

use super::registry_data::{BlockRegistration, BlockRegistryData};
use super::{BlockId, BlockProperties, LiquidType, StepSound};

/// Create an empty registry with only air known
pub fn create_empty_registry() -> BlockRegistryData {
    let mut data = BlockRegistryData {
        blocks: vec![None; 256],
        registrations: Vec::new(),
    };
    register_block(
        &mut data,
        BlockId::AIR,
        BlockProperties::passable("air", StepSound::NONE),
    );
    data
}

/// Create a registry holding the built-in block set
pub fn create_block_registry() -> BlockRegistryData {
    let mut data = create_empty_registry();

    let builtin = [
        (BlockId::STONE, BlockProperties::solid("stone", StepSound::STONE)),
        (BlockId::GRASS, BlockProperties::solid("grass", StepSound::GRASS)),
        (BlockId::DIRT, BlockProperties::solid("dirt", StepSound::GRAVEL)),
        (BlockId::COBBLESTONE, BlockProperties::solid("cobblestone", StepSound::STONE)),
        (BlockId::PLANKS, BlockProperties::solid("planks", StepSound::WOOD)),
        (BlockId::SAPLING, BlockProperties::passable("sapling", StepSound::GRASS)),
        (BlockId::BEDROCK, BlockProperties::solid("bedrock", StepSound::STONE)),
        (BlockId::WATER, BlockProperties::liquid("water", LiquidType::Water)),
        (BlockId::STILL_WATER, BlockProperties::liquid("still_water", LiquidType::Water)),
        (BlockId::LAVA, BlockProperties::liquid("lava", LiquidType::Lava)),
        (BlockId::STILL_LAVA, BlockProperties::liquid("still_lava", LiquidType::Lava)),
        (BlockId::SAND, BlockProperties::solid("sand", StepSound::GRAVEL)),
        (BlockId::GRAVEL, BlockProperties::solid("gravel", StepSound::GRAVEL)),
        (BlockId::GOLD_ORE, BlockProperties::solid("gold_ore", StepSound::STONE)),
        (BlockId::IRON_ORE, BlockProperties::solid("iron_ore", StepSound::STONE)),
        (BlockId::COAL_ORE, BlockProperties::solid("coal_ore", StepSound::STONE)),
        (BlockId::LOG, BlockProperties::solid("log", StepSound::WOOD)),
        (BlockId::LEAVES, BlockProperties::solid("leaves", StepSound::GRASS)),
        (BlockId::SPONGE, BlockProperties::solid("sponge", StepSound::CLOTH)),
        (BlockId::GLASS, BlockProperties::solid("glass", StepSound::METAL)),
        (BlockId::WHITE_CLOTH, BlockProperties::solid("white_cloth", StepSound::CLOTH)),
        (BlockId::DANDELION, BlockProperties::passable("dandelion", StepSound::GRASS)),
        (BlockId::ROSE, BlockProperties::passable("rose", StepSound::GRASS)),
        (BlockId::BROWN_MUSHROOM, BlockProperties::passable("brown_mushroom", StepSound::GRASS)),
        (BlockId::RED_MUSHROOM, BlockProperties::passable("red_mushroom", StepSound::GRASS)),
        (BlockId::GOLD_BLOCK, BlockProperties::solid("gold_block", StepSound::METAL)),
        (BlockId::IRON_BLOCK, BlockProperties::solid("iron_block", StepSound::METAL)),
        (BlockId::BRICK, BlockProperties::solid("brick", StepSound::STONE)),
        (BlockId::BOOKSHELF, BlockProperties::solid("bookshelf", StepSound::WOOD)),
        (BlockId::MOSSY_COBBLESTONE, BlockProperties::solid("mossy_cobblestone", StepSound::STONE)),
        (BlockId::OBSIDIAN, BlockProperties::solid("obsidian", StepSound::STONE)),
    ];

    for (id, properties) in builtin {
        register_block(&mut data, id, properties);
    }

    log::debug!(
        "Block registry created with {} block types",
        data.registrations.len()
    );
    data
}

/// Register (or replace) the properties of a block type
pub fn register_block(data: &mut BlockRegistryData, id: BlockId, properties: BlockProperties) {
    if let Some(previous) = &data.blocks[id.0 as usize] {
        log::warn!(
            "Block {} re-registered: '{}' replaces '{}'",
            id.0,
            properties.name,
            previous.name
        );
        data.registrations.retain(|r| r.id != id);
    }

    data.registrations.push(BlockRegistration {
        id,
        properties: properties.clone(),
    });
    data.blocks[id.0 as usize] = Some(properties);
}

/// Get block properties by ID
pub fn get_properties(data: &BlockRegistryData, id: BlockId) -> Option<&BlockProperties> {
    data.blocks[id.0 as usize].as_ref()
}

/// Whether the block contributes a collision cube. Unregistered non-air
/// codes are treated as solid so unknown data never lets entities fall through.
pub fn is_solid(data: &BlockRegistryData, id: BlockId) -> bool {
    match get_properties(data, id) {
        Some(properties) => properties.solid,
        None => id.is_occupied(),
    }
}

pub fn liquid_type(data: &BlockRegistryData, id: BlockId) -> LiquidType {
    get_properties(data, id)
        .map(|p| p.liquid)
        .unwrap_or(LiquidType::None)
}

pub fn step_sound(data: &BlockRegistryData, id: BlockId) -> StepSound {
    get_properties(data, id)
        .map(|p| p.sound)
        .unwrap_or(StepSound::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::core::StepSoundKind;

    #[test]
    fn test_builtin_blocks() {
        let registry = create_block_registry();
        assert!(is_solid(&registry, BlockId::STONE));
        assert!(!is_solid(&registry, BlockId::AIR));
        assert!(!is_solid(&registry, BlockId::ROSE));
        assert_eq!(liquid_type(&registry, BlockId::STILL_WATER), LiquidType::Water);
        assert_eq!(liquid_type(&registry, BlockId::LAVA), LiquidType::Lava);
        assert_eq!(step_sound(&registry, BlockId::GRASS).kind, StepSoundKind::Grass);
        assert_eq!(get_properties(&registry, BlockId::OBSIDIAN).map(|p| p.name.as_str()), Some("obsidian"));
    }

    #[test]
    fn test_unregistered_block_is_solid() {
        let registry = create_block_registry();
        let unknown = BlockId(200);
        assert!(get_properties(&registry, unknown).is_none());
        assert!(is_solid(&registry, unknown));
        assert_eq!(step_sound(&registry, unknown), StepSound::NONE);
    }

    #[test]
    fn test_re_registering_replaces_properties() {
        let mut registry = create_block_registry();
        register_block(
            &mut registry,
            BlockId::SPONGE,
            BlockProperties::passable("soft_sponge", StepSound::CLOTH),
        );
        assert_eq!(
            get_properties(&registry, BlockId::SPONGE).map(|p| p.name.as_str()),
            Some("soft_sponge")
        );
        assert!(!is_solid(&registry, BlockId::SPONGE));
        let count = registry
            .registrations
            .iter()
            .filter(|r| r.id == BlockId::SPONGE)
            .count();
        assert_eq!(count, 1);
    }
}
