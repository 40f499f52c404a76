//! Read-only registry surface for the embedded scripting layer.
//!
//! Scripts get a [`ScriptBridge`], which only implements [`ScriptRegistry`].
//! None of the registration operations are reachable through it.

use std::sync::Arc;

use crate::allocator::GameRegistry;
use crate::hooks::{RegisteredBlock, RegisteredItem};
use crate::ids::{self, BlockId, ItemId};

/// Lookups and queries scripts may call.
pub trait ScriptRegistry: Send + Sync {
    fn get_registered_item(&self, name: &str) -> Option<RegisteredItem>;
    fn get_registered_block(&self, name: &str) -> Option<RegisteredBlock>;
    fn get_registered_item_by_id(&self, id: i32) -> Option<RegisteredItem>;
    fn get_registered_block_by_id(&self, id: i32) -> Option<RegisteredBlock>;
    fn get_max_block_id(&self) -> i32;
    fn translate_key(&self, key: &str) -> String;
    fn is_frozen(&self) -> bool;

    fn convert_block_id_to_item_id(&self, block_id: i32) -> i32 {
        ids::convert_block_id_to_item_id(block_id)
    }

    /// `-1` when the item has no block.
    fn convert_item_id_to_block_id(&self, item_id: i32) -> i32 {
        ids::convert_item_id_to_block_id(item_id)
    }
}

impl ScriptRegistry for GameRegistry {
    fn get_registered_item(&self, name: &str) -> Option<RegisteredItem> {
        GameRegistry::get_registered_item(self, name)
    }

    fn get_registered_block(&self, name: &str) -> Option<RegisteredBlock> {
        GameRegistry::get_registered_block(self, name)
    }

    fn get_registered_item_by_id(&self, id: i32) -> Option<RegisteredItem> {
        GameRegistry::get_registered_item_by_id(self, ItemId(id))
    }

    fn get_registered_block_by_id(&self, id: i32) -> Option<RegisteredBlock> {
        GameRegistry::get_registered_block_by_id(self, BlockId(id))
    }

    fn get_max_block_id(&self) -> i32 {
        GameRegistry::get_max_block_id(self)
    }

    fn translate_key(&self, key: &str) -> String {
        GameRegistry::translate_key(self, key)
    }

    fn is_frozen(&self) -> bool {
        GameRegistry::is_frozen(self)
    }
}

/// The handle given to the scripting layer.
#[derive(Clone)]
pub struct ScriptBridge {
    registry: Arc<GameRegistry>,
}

impl ScriptBridge {
    pub fn new(registry: Arc<GameRegistry>) -> Self {
        Self { registry }
    }
}

impl ScriptRegistry for ScriptBridge {
    fn get_registered_item(&self, name: &str) -> Option<RegisteredItem> {
        ScriptRegistry::get_registered_item(&*self.registry, name)
    }

    fn get_registered_block(&self, name: &str) -> Option<RegisteredBlock> {
        ScriptRegistry::get_registered_block(&*self.registry, name)
    }

    fn get_registered_item_by_id(&self, id: i32) -> Option<RegisteredItem> {
        ScriptRegistry::get_registered_item_by_id(&*self.registry, id)
    }

    fn get_registered_block_by_id(&self, id: i32) -> Option<RegisteredBlock> {
        ScriptRegistry::get_registered_block_by_id(&*self.registry, id)
    }

    fn get_max_block_id(&self) -> i32 {
        ScriptRegistry::get_max_block_id(&*self.registry)
    }

    fn translate_key(&self, key: &str) -> String {
        ScriptRegistry::translate_key(&*self.registry, key)
    }

    fn is_frozen(&self) -> bool {
        ScriptRegistry::is_frozen(&*self.registry)
    }
}
