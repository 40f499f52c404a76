//! Definitions extensions hand to the registry alongside a name.
//!
//! The registry only cares about the name and the id it assigns; everything
//! else here is passed through to the host hooks that build the in-game
//! object.

use serde::Serialize;

/// Materials the host game ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltInMaterial {
    Air,
    Grass,
    Ground,
    Wood,
    #[default]
    Rock,
    Iron,
    Water,
    Lava,
    Leaves,
    Plants,
    Sponge,
    Cloth,
    Fire,
    Sand,
    Circuits,
    Glass,
    Tnt,
    Coral,
    Ice,
    Snow,
    BuiltSnow,
    Cactus,
    Clay,
    Pumpkin,
    Portal,
    Cake,
    Web,
    Piston,
    Chair,
    Quicksand,
    Ash,
    MoveableCircuit,
    LightBlock,
    SugarCane,
    Honeycomb,
    Obsidian,
    Magma,
    PotionFire,
}

/// Step sound sets the host game ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltInStepSounds {
    Powder,
    Wood,
    Gravel,
    Grass,
    #[default]
    Stone,
    Metal,
    Glass,
    Cloth,
    Sand,
    Bush,
    Snow,
    Slime,
}

/// Block shapes with built-in behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltInBlockType {
    Custom,
    #[default]
    Block,
    Glass,
    Workbench,
    Falling,
    /// Also registers a `_full` double-slab block.
    Slab,
    Stairs,
}

impl BuiltInBlockType {
    /// Suffix of the secondary block this type registers next to the main one.
    pub const fn secondary_suffix(self) -> Option<&'static str> {
        match self {
            BuiltInBlockType::Slab => Some("_full"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockBuilder {
    pub material: BuiltInMaterial,
    pub step_sounds: BuiltInStepSounds,
    pub block_type: BuiltInBlockType,
    pub hardness: f32,
    pub resistance: f32,
    pub light_level: u8,
    pub translation_key: Option<String>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            material: BuiltInMaterial::default(),
            step_sounds: BuiltInStepSounds::default(),
            block_type: BuiltInBlockType::default(),
            hardness: 1.5,
            resistance: 10.0,
            light_level: 0,
            translation_key: None,
        }
    }

    pub fn material(mut self, material: BuiltInMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn step_sounds(mut self, step_sounds: BuiltInStepSounds) -> Self {
        self.step_sounds = step_sounds;
        self
    }

    pub fn block_type(mut self, block_type: BuiltInBlockType) -> Self {
        self.block_type = block_type;
        self
    }

    pub fn hardness(mut self, hardness: f32) -> Self {
        self.hardness = hardness;
        self
    }

    pub fn resistance(mut self, resistance: f32) -> Self {
        self.resistance = resistance;
        self
    }

    /// Clamped to 0..=15.
    pub fn light_level(mut self, light_level: u8) -> Self {
        self.light_level = light_level.min(15);
        self
    }

    pub fn translation_key(mut self, key: impl Into<String>) -> Self {
        self.translation_key = Some(key.into());
        self
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemBuilder {
    pub max_stack_size: u8,
    /// 0 means the item takes no damage.
    pub max_damage: u16,
    pub translation_key: Option<String>,
}

impl ItemBuilder {
    pub fn new() -> Self {
        Self {
            max_stack_size: 64,
            max_damage: 0,
            translation_key: None,
        }
    }

    /// Clamped to 1..=64.
    pub fn max_stack_size(mut self, size: u8) -> Self {
        self.max_stack_size = size.clamp(1, 64);
        self
    }

    pub fn max_damage(mut self, damage: u16) -> Self {
        self.max_damage = damage;
        self
    }

    pub fn translation_key(mut self, key: impl Into<String>) -> Self {
        self.translation_key = Some(key.into());
        self
    }
}

impl Default for ItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
