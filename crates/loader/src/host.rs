//! A host that logs what it is asked to build instead of building it.
//!
//! Counters are atomics and the recipe book sits behind a `RwLock`; hooks
//! are called from whichever worker is loading an extension.

use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};

use indexmap::IndexMap;
use serde::Serialize;
use ultimate_registry::builder::{BlockBuilder, ItemBuilder};
use ultimate_registry::hooks::GameHooks;
use ultimate_registry::recipe::Recipe;
use ultimate_registry::{NamespacedName, RegisteredBlock, RegisteredEntityType, RegisteredItem};

pub struct LoggingHost {
    blocks: AtomicU64,
    items: AtomicU64,
    entity_types: AtomicU64,
    recipes: RwLock<Vec<Recipe>>,
    translations: RwLock<IndexMap<String, String>>,
}

/// How many objects the host has been asked to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HostCounts {
    pub blocks: u64,
    pub items: u64,
    pub entity_types: u64,
    pub recipes: u64,
}

impl LoggingHost {
    pub fn new() -> Self {
        Self {
            blocks: AtomicU64::new(0),
            items: AtomicU64::new(0),
            entity_types: AtomicU64::new(0),
            recipes: RwLock::new(Vec::new()),
            translations: RwLock::new(IndexMap::new()),
        }
    }

    pub fn add_translation(&self, key: impl Into<String>, value: impl Into<String>) {
        self.translations
            .write()
            .expect("translation table poisoned")
            .insert(key.into(), value.into());
    }

    pub fn counts(&self) -> HostCounts {
        HostCounts {
            blocks: self.blocks.load(Relaxed),
            items: self.items.load(Relaxed),
            entity_types: self.entity_types.load(Relaxed),
            recipes: self.recipes.read().expect("recipe book poisoned").len() as u64,
        }
    }

    /// Snapshot of every recipe received so far.
    pub fn recipes(&self) -> Vec<Recipe> {
        self.recipes.read().expect("recipe book poisoned").clone()
    }

    /// Give a translation key a default display name unless one is set.
    fn default_translation(&self, key: Option<&str>, name: &NamespacedName) {
        let Some(key) = key else {
            return;
        };
        self.translations
            .write()
            .expect("translation table poisoned")
            .entry(key.to_owned())
            .or_insert_with(|| display_name(name.local_name()));
    }
}

impl Default for LoggingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl GameHooks for LoggingHost {
    fn create_block(&self, block: &RegisteredBlock, builder: &BlockBuilder) {
        self.blocks.fetch_add(1, Relaxed);
        self.default_translation(builder.translation_key.as_deref(), &block.name);
        tracing::info!(
            "Block {} = {} ({:?}, {:?})",
            block.name,
            block.id.0,
            builder.block_type,
            builder.material
        );
    }

    fn create_item(&self, item: &RegisteredItem, builder: &ItemBuilder) {
        self.items.fetch_add(1, Relaxed);
        self.default_translation(builder.translation_key.as_deref(), &item.name);
        tracing::info!("Item {} = {}", item.name, item.id.0);
    }

    fn create_entity_type(&self, entity_type: &RegisteredEntityType) {
        self.entity_types.fetch_add(1, Relaxed);
        tracing::info!("Entity type {} = {}", entity_type.name, entity_type.id.0);
    }

    fn add_recipe(&self, recipe: Recipe) {
        tracing::debug!("Recipe {:?}", recipe);
        self.recipes.write().expect("recipe book poisoned").push(recipe);
    }

    fn translate_key(&self, key: &str) -> String {
        self.translations
            .read()
            .expect("translation table poisoned")
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_owned())
    }
}

/// `ruby_ore` -> `Ruby Ore`.
fn display_name(local_name: &str) -> String {
    local_name
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
