//! Serializable view of everything registered, for save writers and
//! debugging UIs.

use serde::Serialize;
use ultimate_registry::lifecycle::LifecycleState;
use ultimate_registry::store::EntityTypeRegistryEntry;
use ultimate_registry::{BlockId, GameRegistry, ItemId, NamespacedName};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedEntry {
    pub name: NamespacedName,
    pub item_id: ItemId,
    pub block_id: Option<BlockId>,
    /// `false` when the entry was given a fallback id.
    pub loader_reserved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryListing {
    pub lifecycle: LifecycleState,
    pub max_block_id: i32,
    pub entries: Vec<ListedEntry>,
    pub entity_types: Vec<EntityTypeRegistryEntry>,
}

impl RegistryListing {
    pub fn capture(registry: &GameRegistry) -> Self {
        let entries = registry
            .registry_entries()
            .into_iter()
            .map(|entry| ListedEntry {
                block_id: entry.real_id.to_block(),
                loader_reserved: entry.real_id.is_loader_reserved(),
                item_id: entry.real_id,
                name: entry.name,
            })
            .collect();
        Self {
            lifecycle: registry.lifecycle(),
            max_block_id: registry.get_max_block_id(),
            entries,
            entity_types: registry.entity_type_entries(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn fallback_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.loader_reserved).count()
            + self
                .entity_types
                .iter()
                .filter(|e| !e.real_id.is_loader_reserved())
                .count()
    }
}
