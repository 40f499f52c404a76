//! The game registry: id allocation, lookups, and the freeze lifecycle.
//!
//! Extensions register blocks, items and entity types while the host is
//! loading them, each typically from its own worker. Every mutating call
//! runs under one write lock covering both entry tables and the three id
//! cursors, so "find a free id, claim it, record the entry" is atomic.
//! Lookups take the read lock and always see whole entries.
//!
//! Once the host calls [`GameRegistry::freeze`], mutating calls are
//! rejected. Recipe registration has its own, independent gate
//! ([`GameRegistry::freeze_recipes`]).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dashmap::DashMap;

use crate::builder::{BlockBuilder, BuiltInBlockType, ItemBuilder};
use crate::error::{RegistryError, Result};
use crate::hooks::{
    EntityFactory, GameHooks, RegisteredBlock, RegisteredEntity, RegisteredEntityType,
    RegisteredItem,
};
use crate::ids::{
    self, BlockId, DEFAULT_FALLBACK_BLOCK_ID, DEFAULT_FALLBACK_ENTITY_TYPE_ID,
    DEFAULT_FALLBACK_ITEM_ID, EntityTypeId, IdSpace, ItemId,
};
use crate::lifecycle::{Latch, LifecycleState};
use crate::name::{self, NamespacedName};
use crate::recipe::{
    Ingredient, Recipe, RecipeGate, RegisteredItemStack, ShapedRecipe, SmeltingKind,
};
use crate::scratch::{self, ScratchBuffer};
use crate::store::{EntityTypeRegistryEntry, EntryTable, RegistryEntry};

/// One-shot "a registry was created" flag for the process.
struct InstanceSlot {
    claimed: AtomicBool,
}

impl InstanceSlot {
    const fn new() -> Self {
        Self {
            claimed: AtomicBool::new(false),
        }
    }

    /// Never released: a second construction fails even after the first
    /// registry is dropped.
    fn claim(&self) -> Result<()> {
        self.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| RegistryError::DuplicateInstance)
    }
}

static PROCESS_SLOT: InstanceSlot = InstanceSlot::new();

/// Completes once the host has built the object for a name. Repeat
/// registrations wait on it instead of building again.
type Build = Arc<OnceLock<()>>;

/// Entry tables plus the next candidate id for each reserved range.
struct Tables {
    items: EntryTable<ItemId>,
    entity_types: EntryTable<EntityTypeId>,
    block_cursor: i32,
    item_cursor: i32,
    entity_type_cursor: i32,
    /// Host builds per block/item name, and per entity-type name.
    builds: HashMap<NamespacedName, Build>,
    entity_type_builds: HashMap<NamespacedName, Build>,
}

impl Tables {
    fn new() -> Self {
        Self {
            items: EntryTable::new(),
            entity_types: EntryTable::new(),
            block_cursor: IdSpace::Block.reserved_range().0,
            item_cursor: IdSpace::Item.reserved_range().0,
            entity_type_cursor: IdSpace::EntityType.reserved_range().0,
            builds: HashMap::new(),
            entity_type_builds: HashMap::new(),
        }
    }

    /// Next free id in `space`, or `None` once the reserved range is used up.
    fn next_free(&mut self, space: IdSpace) -> Option<i32> {
        let (_, end) = space.reserved_range();
        loop {
            let cursor = match space {
                IdSpace::Block => &mut self.block_cursor,
                IdSpace::Item => &mut self.item_cursor,
                IdSpace::EntityType => &mut self.entity_type_cursor,
            };
            if *cursor >= end {
                return None;
            }
            let candidate = *cursor;
            *cursor += 1;
            let taken = match space {
                IdSpace::Block | IdSpace::Item => self.items.contains_id(ItemId(candidate)),
                IdSpace::EntityType => self.entity_types.contains_id(EntityTypeId(candidate)),
            };
            if !taken {
                return Some(candidate);
            }
        }
    }

    fn build_for(builds: &mut HashMap<NamespacedName, Build>, name: &NamespacedName) -> Build {
        Arc::clone(builds.entry(name.clone()).or_default())
    }

    /// Fail if `name` is already taken by an item that has no block form.
    fn ensure_can_be_block(&self, name: &NamespacedName) -> Result<()> {
        match self.items.get(name.as_str()) {
            Some(entry) if entry.real_id.to_block().is_none() => Err(RegistryError::NotABlock {
                name: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// The single registry instance for a game process.
pub struct GameRegistry {
    hooks: Arc<dyn GameHooks>,
    tables: RwLock<Tables>,
    entity_factories: DashMap<NamespacedName, Arc<dyn EntityFactory>>,
    all_mods_loaded: Latch,
    recipes: RecipeGate,
    /// Highest block id handed out so far (loader or fallback).
    max_block_id: AtomicI32,
}

impl GameRegistry {
    /// Create the process-wide registry.
    ///
    /// Succeeds once per process. Later calls fail with
    /// [`RegistryError::DuplicateInstance`], whether or not the first
    /// registry is still alive.
    pub fn new(hooks: Arc<dyn GameHooks>) -> Result<Self> {
        PROCESS_SLOT.claim()?;
        Ok(Self::build(hooks))
    }

    /// A registry outside the process-wide singleton, for test suites that
    /// need many independent registries in one process. Not for hosts.
    #[doc(hidden)]
    pub fn new_isolated_for_tests(hooks: Arc<dyn GameHooks>) -> Self {
        Self::build(hooks)
    }

    fn build(hooks: Arc<dyn GameHooks>) -> Self {
        let vanilla_max = hooks.vanilla_max_block_id();
        tracing::debug!("Game registry created (vanilla max block id {})", vanilla_max);
        Self {
            hooks,
            tables: RwLock::new(Tables::new()),
            entity_factories: DashMap::new(),
            all_mods_loaded: Latch::new(),
            recipes: RecipeGate::new(),
            max_block_id: AtomicI32::new(vanilla_max),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().expect("game registry poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().expect("game registry poisoned")
    }

    /// A block fallback must keep its block form once stored in item space.
    fn ensure_block_fallback(fallback_id: i32) -> Result<()> {
        if ids::has_item_space_form(fallback_id) {
            Ok(())
        } else {
            Err(RegistryError::InvalidBlockFallback { id: fallback_id })
        }
    }

    fn ensure_mutable(&self, operation: &'static str) -> Result<()> {
        if self.all_mods_loaded.is_tripped() {
            tracing::warn!("Rejected attempt to {} after all extensions loaded", operation);
            return Err(RegistryError::ContentFrozen { operation });
        }
        Ok(())
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Mark every extension as loaded. Returns `true` if this call froze it.
    ///
    /// Waits for in-flight registrations; none are accepted afterwards.
    pub fn freeze(&self) -> bool {
        let tables = self.write();
        let froze = self.all_mods_loaded.trip();
        if froze {
            tracing::info!(
                "Content frozen: {} block/item entries, {} entity types, max block id {}",
                tables.items.len(),
                tables.entity_types.len(),
                self.get_max_block_id()
            );
        }
        froze
    }

    /// Close recipe registration. Returns `true` if this call froze it.
    pub fn freeze_recipes(&self) -> bool {
        let froze = self.recipes.freeze();
        if froze {
            tracing::info!("Recipes frozen");
        }
        froze
    }

    /// Have all extensions finished loading?
    pub fn is_frozen(&self) -> bool {
        self.all_mods_loaded.is_tripped()
    }

    pub fn are_recipes_frozen(&self) -> bool {
        self.recipes.is_frozen()
    }

    pub fn lifecycle(&self) -> LifecycleState {
        LifecycleState {
            all_mods_loaded: self.is_frozen(),
            recipes_frozen: self.are_recipes_frozen(),
        }
    }

    /// Upper bound for block ids in use. Grows until content is frozen.
    pub fn get_max_block_id(&self) -> i32 {
        self.max_block_id
            .load(Ordering::Acquire)
            .max(self.hooks.vanilla_max_block_id())
    }

    /// Zeroed per-block scratch array of `get_max_block_id() + 1` slots.
    ///
    /// Fresh on every call until content is frozen; after that each worker
    /// reuses one buffer.
    pub fn temporary_block_array(&self) -> ScratchBuffer {
        let len = usize::try_from(self.get_max_block_id()).map_or(0, |max| max + 1);
        scratch::take(self.is_frozen(), len)
    }

    // ── Id generation ───────────────────────────────────────────────────

    /// Claim a block id for `name` without building anything.
    ///
    /// Reuses the id if `name` is already registered. Returns `fallback_id`
    /// once the reserved block range is used up.
    pub fn generate_new_block_id(&self, name: &str, fallback_id: i32) -> Result<BlockId> {
        let mut tables = self.write();
        self.ensure_mutable("generate block ids")?;
        let name = name::validate_and_fix_registry_name(name, false)?;
        Self::ensure_block_fallback(fallback_id)?;
        tables.ensure_can_be_block(&name)?;
        Ok(self.reserve_block(&mut tables, name, fallback_id))
    }

    /// Claim an item id for `name` without building anything.
    pub fn generate_new_item_id(&self, name: &str, fallback_id: i32) -> Result<ItemId> {
        let mut tables = self.write();
        self.ensure_mutable("generate item ids")?;
        let name = name::validate_and_fix_registry_name(name, false)?;
        Ok(Self::reserve_item(&mut tables, name, fallback_id))
    }

    /// Claim an entity-type id for `name` without building anything.
    pub fn generate_new_entity_type_id(
        &self,
        name: &str,
        fallback_id: i32,
    ) -> Result<EntityTypeId> {
        let mut tables = self.write();
        self.ensure_mutable("generate entity type ids")?;
        let name = name::validate_and_fix_registry_name(name, false)?;
        Ok(Self::reserve_entity_type(&mut tables, name, fallback_id))
    }

    /// Caller must have checked [`Tables::ensure_can_be_block`] and
    /// [`Self::ensure_block_fallback`].
    fn reserve_block(&self, tables: &mut Tables, name: NamespacedName, fallback_id: i32) -> BlockId {
        if let Some(block) = tables.items.get(name.as_str()).and_then(|e| e.real_id.to_block()) {
            return block;
        }
        let item_id = match tables.next_free(IdSpace::Block) {
            Some(id) => ItemId(id),
            None => {
                tracing::warn!(
                    "Reserved block ids exhausted, '{}' falls back to block id {}",
                    name,
                    fallback_id
                );
                BlockId(fallback_id).to_item()
            }
        };
        let block = item_id.to_block().unwrap_or(BlockId(fallback_id));
        tracing::debug!("Block '{}' -> block id {} (item id {})", name, block.0, item_id.0);
        tables.items.insert_if_absent(name, item_id);
        self.max_block_id.fetch_max(block.0, Ordering::AcqRel);
        block
    }

    fn reserve_item(tables: &mut Tables, name: NamespacedName, fallback_id: i32) -> ItemId {
        if let Some(entry) = tables.items.get(name.as_str()) {
            return entry.real_id;
        }
        let id = match tables.next_free(IdSpace::Item) {
            Some(id) => ItemId(id),
            None => {
                tracing::warn!(
                    "Reserved item ids exhausted, '{}' falls back to item id {}",
                    name,
                    fallback_id
                );
                ItemId(fallback_id)
            }
        };
        tracing::debug!("Item '{}' -> item id {}", name, id.0);
        tables.items.insert_if_absent(name, id);
        id
    }

    fn reserve_entity_type(
        tables: &mut Tables,
        name: NamespacedName,
        fallback_id: i32,
    ) -> EntityTypeId {
        if let Some(entry) = tables.entity_types.get(name.as_str()) {
            return entry.real_id;
        }
        let id = match tables.next_free(IdSpace::EntityType) {
            Some(id) => EntityTypeId(id),
            None => {
                tracing::warn!(
                    "Reserved entity type ids exhausted, '{}' falls back to entity type id {}",
                    name,
                    fallback_id
                );
                EntityTypeId(fallback_id)
            }
        };
        tracing::debug!("Entity type '{}' -> entity type id {}", name, id.0);
        tables.entity_types.insert_if_absent(name, id);
        id
    }

    // ── Registration ────────────────────────────────────────────────────

    /// Register a block, falling back to stone if block ids run out.
    pub fn register_new_block(&self, name: &str, builder: &BlockBuilder) -> Result<RegisteredBlock> {
        self.register_new_block_with_fallback(name, builder, DEFAULT_FALLBACK_BLOCK_ID)
    }

    /// Register a block and build it through the host hooks.
    ///
    /// Registering the same name again returns the existing block without
    /// building it twice. A repeat call racing the first one waits until the
    /// host has finished building. Slabs also register their `_full`
    /// counterpart.
    ///
    /// Host hooks must not register the name they are building.
    pub fn register_new_block_with_fallback(
        &self,
        name: &str,
        builder: &BlockBuilder,
        fallback_id: i32,
    ) -> Result<RegisteredBlock> {
        let ((block, build), secondary) = {
            let mut tables = self.write();
            self.ensure_mutable("register blocks")?;
            let name = name::validate_and_fix_registry_name(name, false)?;
            Self::ensure_block_fallback(fallback_id)?;
            let secondary_name = builder
                .block_type
                .secondary_suffix()
                .map(|suffix| name.with_suffix(suffix))
                .transpose()?;
            tables.ensure_can_be_block(&name)?;
            if let Some(secondary_name) = &secondary_name {
                tables.ensure_can_be_block(secondary_name)?;
            }

            let id = self.reserve_block(&mut tables, name.clone(), fallback_id);
            let build = Tables::build_for(&mut tables.builds, &name);
            let secondary = secondary_name.map(|name| {
                let id = self.reserve_block(&mut tables, name.clone(), fallback_id);
                let build = Tables::build_for(&mut tables.builds, &name);
                (RegisteredBlock { name, id }, build)
            });
            ((RegisteredBlock { name, id }, build), secondary)
        };

        build.get_or_init(|| self.hooks.create_block(&block, builder));
        if let Some((full, full_build)) = &secondary {
            full_build.get_or_init(|| {
                let full_builder = builder.clone().block_type(BuiltInBlockType::Block);
                self.hooks.create_block(full, &full_builder);
            });
        }
        Ok(block)
    }

    /// Register an item, falling back to planks if item ids run out.
    pub fn register_new_item(&self, name: &str, builder: &ItemBuilder) -> Result<RegisteredItem> {
        self.register_new_item_with_fallback(name, builder, DEFAULT_FALLBACK_ITEM_ID)
    }

    /// Register an item and build it through the host hooks.
    pub fn register_new_item_with_fallback(
        &self,
        name: &str,
        builder: &ItemBuilder,
        fallback_id: i32,
    ) -> Result<RegisteredItem> {
        let (item, build) = {
            let mut tables = self.write();
            self.ensure_mutable("register items")?;
            let name = name::validate_and_fix_registry_name(name, false)?;
            let id = Self::reserve_item(&mut tables, name.clone(), fallback_id);
            let build = Tables::build_for(&mut tables.builds, &name);
            (RegisteredItem { name, id }, build)
        };
        build.get_or_init(|| self.hooks.create_item(&item, builder));
        Ok(item)
    }

    /// Register an entity type, falling back to pig if ids run out.
    pub fn register_new_entity_type(
        &self,
        name: &str,
        factory: impl EntityFactory,
    ) -> Result<RegisteredEntityType> {
        self.register_new_entity_type_with_fallback(name, factory, DEFAULT_FALLBACK_ENTITY_TYPE_ID)
    }

    /// Register an entity type and the factory that builds its instances.
    ///
    /// The first factory registered under a name is kept.
    pub fn register_new_entity_type_with_fallback(
        &self,
        name: &str,
        factory: impl EntityFactory,
        fallback_id: i32,
    ) -> Result<RegisteredEntityType> {
        let (entity_type, build) = {
            let mut tables = self.write();
            self.ensure_mutable("register entity types")?;
            let name = name::validate_and_fix_registry_name(name, false)?;
            let id = Self::reserve_entity_type(&mut tables, name.clone(), fallback_id);
            let factory: Arc<dyn EntityFactory> = Arc::new(factory);
            self.entity_factories.entry(name.clone()).or_insert(factory);
            let build = Tables::build_for(&mut tables.entity_type_builds, &name);
            (RegisteredEntityType { name, id }, build)
        };
        build.get_or_init(|| self.hooks.create_entity_type(&entity_type));
        Ok(entity_type)
    }

    // ── Recipes ─────────────────────────────────────────────────────────

    fn submit_recipe(&self, recipe: Recipe) -> Result<()> {
        self.recipes.check()?;
        recipe.validate()?;
        self.hooks.add_recipe(recipe);
        Ok(())
    }

    pub fn register_recipe(&self, result: RegisteredItemStack, recipe: ShapedRecipe) -> Result<()> {
        self.submit_recipe(Recipe::Shaped { result, recipe })
    }

    pub fn register_shapeless_recipe(
        &self,
        result: RegisteredItemStack,
        ingredients: Vec<Ingredient>,
    ) -> Result<()> {
        self.submit_recipe(Recipe::Shapeless {
            result,
            ingredients,
        })
    }

    pub fn register_furnace_recipe(
        &self,
        input: &RegisteredItem,
        output: RegisteredItemStack,
    ) -> Result<()> {
        self.register_smelting(SmeltingKind::Furnace, input, output)
    }

    pub fn register_blast_furnace_recipe(
        &self,
        input: &RegisteredItem,
        output: RegisteredItemStack,
    ) -> Result<()> {
        self.register_smelting(SmeltingKind::BlastFurnace, input, output)
    }

    pub fn register_freezer_recipe(
        &self,
        input: &RegisteredItem,
        output: RegisteredItemStack,
    ) -> Result<()> {
        self.register_smelting(SmeltingKind::Freezer, input, output)
    }

    fn register_smelting(
        &self,
        kind: SmeltingKind,
        input: &RegisteredItem,
        output: RegisteredItemStack,
    ) -> Result<()> {
        self.submit_recipe(Recipe::Smelting {
            kind,
            input: input.id,
            output,
        })
    }

    #[deprecated(note = "use `register_furnace_recipe`")]
    pub fn add_furnace_recipe(
        &self,
        input: &RegisteredItem,
        output: RegisteredItemStack,
    ) -> Result<()> {
        self.register_furnace_recipe(input, output)
    }

    #[deprecated(note = "use `register_blast_furnace_recipe`")]
    pub fn add_blast_furnace_recipe(
        &self,
        input: &RegisteredItem,
        output: RegisteredItemStack,
    ) -> Result<()> {
        self.register_blast_furnace_recipe(input, output)
    }

    #[deprecated(note = "use `register_freezer_recipe`")]
    pub fn add_freezer_recipe(
        &self,
        input: &RegisteredItem,
        output: RegisteredItemStack,
    ) -> Result<()> {
        self.register_freezer_recipe(input, output)
    }

    // ── Lookups ─────────────────────────────────────────────────────────

    pub fn get_registered_item(&self, name: &str) -> Option<RegisteredItem> {
        self.read().items.get(name).map(|entry| RegisteredItem {
            name: entry.name.clone(),
            id: entry.real_id,
        })
    }

    /// `None` if `name` is unknown or registered as an item with no block.
    pub fn get_registered_block(&self, name: &str) -> Option<RegisteredBlock> {
        let tables = self.read();
        let entry = tables.items.get(name)?;
        Some(RegisteredBlock {
            name: entry.name.clone(),
            id: entry.real_id.to_block()?,
        })
    }

    pub fn get_registered_item_by_id(&self, id: ItemId) -> Option<RegisteredItem> {
        self.read().items.get_by_id(id).map(|entry| RegisteredItem {
            name: entry.name.clone(),
            id,
        })
    }

    pub fn get_registered_block_by_id(&self, id: BlockId) -> Option<RegisteredBlock> {
        self.read().items.get_by_block_id(id).map(|entry| RegisteredBlock {
            name: entry.name.clone(),
            id,
        })
    }

    pub fn get_registered_entity_type(&self, name: &str) -> Option<RegisteredEntityType> {
        self.read().entity_types.get(name).map(|entry| RegisteredEntityType {
            name: entry.name.clone(),
            id: entry.real_id,
        })
    }

    pub fn get_registered_entity_type_by_id(&self, id: EntityTypeId) -> Option<RegisteredEntityType> {
        self.read().entity_types.get_by_id(id).map(|entry| RegisteredEntityType {
            name: entry.name.clone(),
            id,
        })
    }

    /// Build an entity instance of the type registered as `name`.
    pub fn create_entity(&self, name: &str) -> Option<Box<dyn RegisteredEntity>> {
        let entity_type = self.get_registered_entity_type(name)?;
        let factory = self
            .entity_factories
            .get(entity_type.name.as_str())
            .map(|f| Arc::clone(f.value()))?;
        Some(factory.create(&entity_type))
    }

    /// All block/item entries in allocation order.
    pub fn registry_entries(&self) -> Vec<RegistryEntry> {
        self.read().items.snapshot()
    }

    /// All entity-type entries in allocation order.
    pub fn entity_type_entries(&self) -> Vec<EntityTypeRegistryEntry> {
        self.read().entity_types.snapshot()
    }

    pub fn registry_entry_count(&self) -> usize {
        self.read().items.len()
    }

    pub fn entity_type_entry_count(&self) -> usize {
        self.read().entity_types.len()
    }

    // ── Host passthroughs ───────────────────────────────────────────────

    pub fn translate_key(&self, key: &str) -> String {
        self.hooks.translate_key(key)
    }

    pub fn translate_key_format(&self, key: &str, args: &[&str]) -> String {
        self.hooks.translate_key_format(key, args)
    }

    pub fn convert_block_id_to_item_id(block_id: i32) -> i32 {
        ids::convert_block_id_to_item_id(block_id)
    }

    pub fn convert_item_id_to_block_id(item_id: i32) -> i32 {
        ids::convert_item_id_to_block_id(item_id)
    }
}
