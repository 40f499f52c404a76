//! Bundled demo extensions.
//!
//! Names are registered unqualified on purpose: the loader's extension
//! scope supplies the namespace.

use std::sync::Arc;

use anyhow::Context;
use ultimate_registry::builder::{
    BlockBuilder, BuiltInBlockType, BuiltInMaterial, BuiltInStepSounds, ItemBuilder,
};
use ultimate_registry::hooks::{RegisteredEntity, RegisteredEntityType};
use ultimate_registry::recipe::{Ingredient, RegisteredItemStack, ShapedRecipe};
use ultimate_registry::{EntityTypeId, GameRegistry, ItemId, RegisteredItem};

use crate::extension::Extension;

// -- Vanilla item ids the demo recipes use --

const STICK: ItemId = ItemId(280);
const SNOWBALL: ItemId = ItemId(332);
const DYE: ItemId = ItemId(351);
/// Dye damage value for bone meal.
const BONE_MEAL_DAMAGE: u16 = 15;

/// All demo extensions, in the order the host lists them.
pub fn extensions() -> Vec<Arc<dyn Extension>> {
    vec![Arc::new(Gems), Arc::new(Critters), Arc::new(Frostworks)]
}

fn item(registry: &GameRegistry, name: &str) -> anyhow::Result<RegisteredItem> {
    registry
        .get_registered_item(name)
        .with_context(|| format!("{name} is not registered"))
}

// -- gems --

pub struct Gems;

impl Extension for Gems {
    fn id(&self) -> &'static str {
        "gems"
    }

    fn load(&self, registry: &GameRegistry) -> anyhow::Result<()> {
        registry.register_new_block(
            "ruby_ore",
            &BlockBuilder::new()
                .hardness(3.0)
                .translation_key("tile.gems.ruby_ore.name"),
        )?;
        registry.register_new_block(
            "ruby_block",
            &BlockBuilder::new()
                .material(BuiltInMaterial::Iron)
                .step_sounds(BuiltInStepSounds::Metal)
                .hardness(5.0),
        )?;
        registry.register_new_block(
            "marble_slab",
            &BlockBuilder::new().block_type(BuiltInBlockType::Slab),
        )?;
        registry.register_new_item(
            "ruby",
            &ItemBuilder::new().translation_key("item.gems.ruby.name"),
        )?;
        registry.register_new_item(
            "ruby_sword",
            &ItemBuilder::new().max_stack_size(1).max_damage(750),
        )?;
        Ok(())
    }

    fn register_recipes(&self, registry: &GameRegistry) -> anyhow::Result<()> {
        let ruby = item(registry, "gems:ruby")?;
        let ore = item(registry, "gems:ruby_ore")?;
        let block = item(registry, "gems:ruby_block")?;
        let sword = item(registry, "gems:ruby_sword")?;

        registry.register_recipe(
            RegisteredItemStack::of(&block, 1),
            ShapedRecipe::new(["###", "###", "###"]).key('#', &ruby),
        )?;
        registry.register_shapeless_recipe(
            RegisteredItemStack::of(&ruby, 9),
            vec![Ingredient::from(&block)],
        )?;
        registry.register_recipe(
            RegisteredItemStack::of(&sword, 1),
            ShapedRecipe::new(["#", "#", "|"])
                .key('#', &ruby)
                .key('|', Ingredient::Item(STICK)),
        )?;
        registry.register_furnace_recipe(&ore, RegisteredItemStack::of(&ruby, 1))?;
        registry.register_blast_furnace_recipe(&ore, RegisteredItemStack::of(&ruby, 2))?;
        Ok(())
    }
}

// -- critters --

pub struct Critters;

#[derive(Debug)]
pub struct Snail {
    pub entity_type: EntityTypeId,
    pub shell_hardness: u8,
}

impl RegisteredEntity for Snail {
    fn entity_type(&self) -> EntityTypeId {
        self.entity_type
    }
}

fn spawn_snail(entity_type: &RegisteredEntityType) -> Box<dyn RegisteredEntity> {
    Box::new(Snail {
        entity_type: entity_type.id,
        shell_hardness: 3,
    })
}

impl Extension for Critters {
    fn id(&self) -> &'static str {
        "critters"
    }

    fn load(&self, registry: &GameRegistry) -> anyhow::Result<()> {
        registry.register_new_entity_type("snail", spawn_snail)?;
        registry.register_new_item("snail_shell", &ItemBuilder::new().max_stack_size(16))?;
        Ok(())
    }

    fn register_recipes(&self, registry: &GameRegistry) -> anyhow::Result<()> {
        let shell = item(registry, "critters:snail_shell")?;
        registry.register_shapeless_recipe(
            RegisteredItemStack::new(DYE, 3).with_damage(BONE_MEAL_DAMAGE),
            vec![Ingredient::from(&shell)],
        )?;
        Ok(())
    }
}

// -- frostworks --

pub struct Frostworks;

impl Extension for Frostworks {
    fn id(&self) -> &'static str {
        "frostworks"
    }

    fn load(&self, registry: &GameRegistry) -> anyhow::Result<()> {
        registry.register_new_block(
            "packed_frost",
            &BlockBuilder::new()
                .material(BuiltInMaterial::Ice)
                .step_sounds(BuiltInStepSounds::Glass)
                .block_type(BuiltInBlockType::Glass)
                .light_level(4),
        )?;
        registry.register_new_item("frost_shard", &ItemBuilder::new())?;
        Ok(())
    }

    fn register_recipes(&self, registry: &GameRegistry) -> anyhow::Result<()> {
        let shard = item(registry, "frostworks:frost_shard")?;
        let frost = item(registry, "frostworks:packed_frost")?;
        registry.register_freezer_recipe(&shard, RegisteredItemStack::of(&frost, 1))?;
        registry.register_recipe(
            RegisteredItemStack::of(&shard, 4),
            ShapedRecipe::new(["oo", "oo"]).key('o', Ingredient::Item(SNOWBALL)),
        )?;
        Ok(())
    }
}
