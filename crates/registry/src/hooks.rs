//! What the registry hands out, and what it needs from the host game.

use serde::Serialize;

use crate::builder::{BlockBuilder, ItemBuilder};
use crate::ids::{BlockId, EntityTypeId, INITIAL_BLOCK_ID, ItemId};
use crate::name::NamespacedName;
use crate::recipe::Recipe;

/// Handle to a registered item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegisteredItem {
    pub name: NamespacedName,
    pub id: ItemId,
}

impl RegisteredItem {
    /// The block this item places, if any.
    pub fn block_id(&self) -> Option<BlockId> {
        self.id.to_block()
    }
}

/// Handle to a registered block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegisteredBlock {
    pub name: NamespacedName,
    pub id: BlockId,
}

impl RegisteredBlock {
    /// The item id the block is stored under.
    pub fn item_id(&self) -> ItemId {
        self.id.to_item()
    }

    /// The block seen as an item (its inventory form).
    pub fn as_item(&self) -> RegisteredItem {
        RegisteredItem {
            name: self.name.clone(),
            id: self.item_id(),
        }
    }
}

/// Handle to a registered entity type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegisteredEntityType {
    pub name: NamespacedName,
    pub id: EntityTypeId,
}

/// A game-facing entity instance built by an [`EntityFactory`].
pub trait RegisteredEntity: Send {
    fn entity_type(&self) -> EntityTypeId;
}

/// Builds entity instances for one registered entity type.
pub trait EntityFactory: Send + Sync + 'static {
    fn create(&self, entity_type: &RegisteredEntityType) -> Box<dyn RegisteredEntity>;
}

impl<F> EntityFactory for F
where
    F: Fn(&RegisteredEntityType) -> Box<dyn RegisteredEntity> + Send + Sync + 'static,
{
    fn create(&self, entity_type: &RegisteredEntityType) -> Box<dyn RegisteredEntity> {
        self(entity_type)
    }
}

/// Capabilities the host game supplies.
///
/// Hooks are called after the id is committed and outside the registry's
/// table lock, so they may call back into lookups.
pub trait GameHooks: Send + Sync + 'static {
    /// Highest block id used by built-in content.
    fn vanilla_max_block_id(&self) -> i32 {
        INITIAL_BLOCK_ID - 1
    }

    /// Materialize a freshly registered block.
    fn create_block(&self, block: &RegisteredBlock, builder: &BlockBuilder);

    /// Materialize a freshly registered item.
    fn create_item(&self, item: &RegisteredItem, builder: &ItemBuilder);

    fn create_entity_type(&self, _entity_type: &RegisteredEntityType) {}

    /// Store a recipe that passed validation and the recipe gate.
    fn add_recipe(&self, recipe: Recipe);

    fn translate_key(&self, key: &str) -> String {
        key.to_owned()
    }

    /// Translate `key` and substitute `%s` placeholders in order.
    fn translate_key_format(&self, key: &str, args: &[&str]) -> String {
        let template = self.translate_key(key);
        let mut out = String::with_capacity(template.len());
        let mut args = args.iter();
        let mut rest = template.as_str();
        while let Some(at) = rest.find("%s") {
            out.push_str(&rest[..at]);
            match args.next() {
                Some(arg) => out.push_str(arg),
                None => out.push_str("%s"),
            }
            rest = &rest[at + 2..];
        }
        out.push_str(rest);
        out
    }
}

/// Hooks that build nothing. For headless tools and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl GameHooks for NoopHooks {
    fn create_block(&self, _block: &RegisteredBlock, _builder: &BlockBuilder) {}

    fn create_item(&self, _item: &RegisteredItem, _builder: &ItemBuilder) {}

    fn add_recipe(&self, _recipe: Recipe) {}
}
