//! Name-keyed entry tables.
//!
//! Blocks and items share one table keyed in item space (a block's id is
//! always derivable from its item id). Entity types get their own table.
//! Tables are insert-only and remember allocation order.

use std::collections::HashMap;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;

use crate::ids::{BlockId, EntityTypeId, ItemId};
use crate::name::NamespacedName;

/// One registration: a name and the id it was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry<I> {
    pub name: NamespacedName,
    pub real_id: I,
}

/// A block-or-item registration, `real_id` in item space.
pub type RegistryEntry = Entry<ItemId>;
/// An entity-type registration.
pub type EntityTypeRegistryEntry = Entry<EntityTypeId>;

/// Insert-only table of entries with a secondary id index.
///
/// Fallback ids may be handed to several names once a range is exhausted; the
/// id index keeps pointing at the first of them.
#[derive(Debug)]
pub struct EntryTable<I> {
    entries: IndexMap<NamespacedName, Entry<I>>,
    by_id: HashMap<I, usize>,
}

impl<I: Copy + Eq + Hash> EntryTable<I> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            by_id: HashMap::new(),
        }
    }

    /// Insert `name -> id` unless `name` is already present.
    ///
    /// Returns the entry now stored under `name` and whether it was inserted.
    pub fn insert_if_absent(&mut self, name: NamespacedName, id: I) -> (&Entry<I>, bool) {
        let index = self.entries.len();
        let mut inserted = false;
        let slot = self.entries.entry(name).or_insert_with_key(|name| {
            inserted = true;
            Entry {
                name: name.clone(),
                real_id: id,
            }
        });
        if inserted {
            self.by_id.entry(id).or_insert(index);
        }
        (slot, inserted)
    }

    pub fn get(&self, name: &str) -> Option<&Entry<I>> {
        self.entries.get(name)
    }

    pub fn get_by_id(&self, id: I) -> Option<&Entry<I>> {
        self.by_id
            .get(&id)
            .and_then(|&index| self.entries.get_index(index))
            .map(|(_, entry)| entry)
    }

    pub fn contains_id(&self, id: I) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<I>> {
        self.entries.values()
    }

    /// Owned copy of all entries in allocation order.
    pub fn snapshot(&self) -> Vec<Entry<I>> {
        self.entries.values().cloned().collect()
    }
}

impl EntryTable<ItemId> {
    /// Look up a block by its block-space id.
    pub fn get_by_block_id(&self, id: BlockId) -> Option<&RegistryEntry> {
        self.get_by_id(id.to_item())
    }
}

impl<I: Copy + Eq + Hash> Default for EntryTable<I> {
    fn default() -> Self {
        Self::new()
    }
}
