use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a block type, stored one byte per voxel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct BlockId(pub u8);

impl Default for BlockId {
    fn default() -> Self {
        BlockId::AIR
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BlockId::AIR => write!(f, "Air"),
            BlockId::STONE => write!(f, "Stone"),
            BlockId::GRASS => write!(f, "Grass"),
            BlockId::DIRT => write!(f, "Dirt"),
            BlockId::COBBLESTONE => write!(f, "Cobblestone"),
            BlockId::PLANKS => write!(f, "Planks"),
            BlockId::SAPLING => write!(f, "Sapling"),
            BlockId::BEDROCK => write!(f, "Bedrock"),
            BlockId::WATER => write!(f, "Water"),
            BlockId::STILL_WATER => write!(f, "Still Water"),
            BlockId::LAVA => write!(f, "Lava"),
            BlockId::STILL_LAVA => write!(f, "Still Lava"),
            BlockId::SAND => write!(f, "Sand"),
            BlockId::GRAVEL => write!(f, "Gravel"),
            BlockId::GOLD_ORE => write!(f, "Gold Ore"),
            BlockId::IRON_ORE => write!(f, "Iron Ore"),
            BlockId::COAL_ORE => write!(f, "Coal Ore"),
            BlockId::LOG => write!(f, "Log"),
            BlockId::LEAVES => write!(f, "Leaves"),
            BlockId::SPONGE => write!(f, "Sponge"),
            BlockId::GLASS => write!(f, "Glass"),
            BlockId::WHITE_CLOTH => write!(f, "White Cloth"),
            BlockId::DANDELION => write!(f, "Dandelion"),
            BlockId::ROSE => write!(f, "Rose"),
            BlockId::BROWN_MUSHROOM => write!(f, "Brown Mushroom"),
            BlockId::RED_MUSHROOM => write!(f, "Red Mushroom"),
            BlockId::GOLD_BLOCK => write!(f, "Gold Block"),
            BlockId::IRON_BLOCK => write!(f, "Iron Block"),
            BlockId::BRICK => write!(f, "Brick"),
            BlockId::BOOKSHELF => write!(f, "Bookshelf"),
            BlockId::MOSSY_COBBLESTONE => write!(f, "Mossy Cobblestone"),
            BlockId::OBSIDIAN => write!(f, "Obsidian"),
            _ => write!(f, "Block({})", self.0),
        }
    }
}

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
    pub const STONE: BlockId = BlockId(1);
    pub const GRASS: BlockId = BlockId(2);
    pub const DIRT: BlockId = BlockId(3);
    pub const COBBLESTONE: BlockId = BlockId(4);
    pub const PLANKS: BlockId = BlockId(5);
    pub const SAPLING: BlockId = BlockId(6);
    pub const BEDROCK: BlockId = BlockId(7);
    pub const WATER: BlockId = BlockId(8);
    pub const STILL_WATER: BlockId = BlockId(9);
    pub const LAVA: BlockId = BlockId(10);
    pub const STILL_LAVA: BlockId = BlockId(11);
    pub const SAND: BlockId = BlockId(12);
    pub const GRAVEL: BlockId = BlockId(13);
    pub const GOLD_ORE: BlockId = BlockId(14);
    pub const IRON_ORE: BlockId = BlockId(15);
    pub const COAL_ORE: BlockId = BlockId(16);
    pub const LOG: BlockId = BlockId(17);
    pub const LEAVES: BlockId = BlockId(18);
    pub const SPONGE: BlockId = BlockId(19);
    pub const GLASS: BlockId = BlockId(20);
    pub const WHITE_CLOTH: BlockId = BlockId(36);
    pub const DANDELION: BlockId = BlockId(37);
    pub const ROSE: BlockId = BlockId(38);
    pub const BROWN_MUSHROOM: BlockId = BlockId(39);
    pub const RED_MUSHROOM: BlockId = BlockId(40);
    pub const GOLD_BLOCK: BlockId = BlockId(41);
    pub const IRON_BLOCK: BlockId = BlockId(42);
    pub const BRICK: BlockId = BlockId(45);
    pub const BOOKSHELF: BlockId = BlockId(47);
    pub const MOSSY_COBBLESTONE: BlockId = BlockId(48);
    pub const OBSIDIAN: BlockId = BlockId(49);

    /// Create a new BlockId from a raw byte
    pub const fn new(id: u8) -> Self {
        BlockId(id)
    }

    /// True for every type except air
    pub const fn is_occupied(self) -> bool {
        self.0 != 0
    }
}

/// Which liquid, if any, a block represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LiquidType {
    #[default]
    None,
    Water,
    Lava,
}

/// Material family used to pick the footstep sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StepSoundKind {
    #[default]
    None,
    Grass,
    Cloth,
    Gravel,
    Stone,
    Metal,
    Wood,
}

/// Footstep sound of a block material
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepSound {
    pub kind: StepSoundKind,
    pub volume: f32,
    pub pitch: f32,
}

impl StepSound {
    pub const NONE: StepSound = StepSound::new(StepSoundKind::None, 0.0, 0.0);
    pub const GRASS: StepSound = StepSound::new(StepSoundKind::Grass, 0.6, 1.0);
    pub const CLOTH: StepSound = StepSound::new(StepSoundKind::Cloth, 0.7, 1.2);
    pub const GRAVEL: StepSound = StepSound::new(StepSoundKind::Gravel, 1.0, 1.0);
    pub const STONE: StepSound = StepSound::new(StepSoundKind::Stone, 1.0, 1.0);
    pub const METAL: StepSound = StepSound::new(StepSoundKind::Metal, 1.0, 2.0);
    pub const WOOD: StepSound = StepSound::new(StepSoundKind::Wood, 1.0, 1.0);

    pub const fn new(kind: StepSoundKind, volume: f32, pitch: f32) -> Self {
        Self { kind, volume, pitch }
    }
}

/// Static properties of a block type
#[derive(Debug, Clone, PartialEq)]
pub struct BlockProperties {
    pub name: String,
    /// Solid blocks contribute a unit collision cube
    pub solid: bool,
    pub liquid: LiquidType,
    pub sound: StepSound,
}

impl BlockProperties {
    pub fn solid(name: &str, sound: StepSound) -> Self {
        Self {
            name: name.to_string(),
            solid: true,
            liquid: LiquidType::None,
            sound,
        }
    }

    pub fn passable(name: &str, sound: StepSound) -> Self {
        Self {
            name: name.to_string(),
            solid: false,
            liquid: LiquidType::None,
            sound,
        }
    }

    pub fn liquid(name: &str, liquid: LiquidType) -> Self {
        Self {
            name: name.to_string(),
            solid: false,
            liquid,
            sound: StepSound::NONE,
        }
    }
}
