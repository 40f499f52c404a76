//! End-to-end boot of the demo extensions against a logging host.

use std::sync::Arc;

use anyhow::bail;
use ultimate_loader::config::LoaderConfig;
use ultimate_loader::demo;
use ultimate_loader::extension::{self, Extension};
use ultimate_loader::host::{HostCounts, LoggingHost};
use ultimate_loader::listing::RegistryListing;
use ultimate_registry::builder::ItemBuilder;
use ultimate_registry::ids::is_loader_reserved_block_item_id;
use ultimate_registry::recipe::{RegisteredItemStack, Recipe};
use ultimate_registry::{GameRegistry, RegistryError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn setup() -> (Arc<GameRegistry>, Arc<LoggingHost>) {
    let host = Arc::new(LoggingHost::new());
    let registry = Arc::new(GameRegistry::new_isolated_for_tests(host.clone()));
    (registry, host)
}

struct Broken;

impl Extension for Broken {
    fn id(&self) -> &'static str {
        "broken"
    }

    fn load(&self, registry: &GameRegistry) -> anyhow::Result<()> {
        registry.register_new_item("half_done", &ItemBuilder::new())?;
        bail!("missing asset")
    }
}

struct Panics;

impl Extension for Panics {
    fn id(&self) -> &'static str {
        "panics"
    }

    fn load(&self, _registry: &GameRegistry) -> anyhow::Result<()> {
        panic!("extension bug")
    }
}

/// Tries to add content from its recipe pass.
struct Sneaky;

impl Extension for Sneaky {
    fn id(&self) -> &'static str {
        "sneaky"
    }

    fn load(&self, _registry: &GameRegistry) -> anyhow::Result<()> {
        Ok(())
    }

    fn register_recipes(&self, registry: &GameRegistry) -> anyhow::Result<()> {
        registry.register_new_item("late_item", &ItemBuilder::new())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Demo boot
// ---------------------------------------------------------------------------

#[tokio::test]
async fn demo_boot_registers_and_freezes() {
    let (registry, host) = setup();
    let report = extension::boot(&registry, &demo::extensions(), &LoaderConfig::default()).await;

    assert_eq!(report.loaded.len(), 3);
    assert!(report.failed.is_empty(), "{:?}", report.failed);
    assert!(registry.is_frozen());
    assert!(registry.are_recipes_frozen());

    assert_eq!(
        host.counts(),
        HostCounts {
            blocks: 5,
            items: 4,
            entity_types: 1,
            recipes: 8,
        }
    );

    // Unqualified demo names were namespaced by their extension.
    let ore = registry.get_registered_block("gems:ruby_ore").unwrap();
    assert!(ore.id.is_loader_reserved());
    assert!(registry.get_registered_block("gems:marble_slab_full").is_some());
    assert!(registry.get_registered_item("frostworks:frost_shard").is_some());
    assert!(registry.create_entity("critters:snail").is_some());
}

#[tokio::test]
async fn listing_reflects_registry() {
    let (registry, _host) = setup();
    extension::boot(&registry, &demo::extensions(), &LoaderConfig::default()).await;

    let listing = RegistryListing::capture(&registry);
    assert_eq!(listing.entries.len(), 9);
    assert_eq!(listing.entity_types.len(), 1);
    assert_eq!(listing.fallback_count(), 0);
    assert!(listing.lifecycle.all_mods_loaded);
    assert!(listing.lifecycle.recipes_frozen);

    for entry in &listing.entries {
        assert_eq!(
            entry.block_id.is_some(),
            is_loader_reserved_block_item_id(entry.item_id.0),
            "{}",
            entry.name
        );
    }

    let json: serde_json::Value = serde_json::from_str(&listing.to_json().unwrap()).unwrap();
    assert_eq!(json["entity_types"][0]["name"], "critters:snail");
    assert_eq!(json["entity_types"][0]["real_id"], 210);
    assert_eq!(json["max_block_id"], listing.max_block_id);
}

#[tokio::test]
async fn translations_default_to_display_names() {
    let (registry, host) = setup();
    host.add_translation("item.gems.ruby.name", "Shiny Ruby");
    extension::boot(&registry, &demo::extensions(), &LoaderConfig::default()).await;

    assert_eq!(registry.translate_key("tile.gems.ruby_ore.name"), "Ruby Ore");
    assert_eq!(registry.translate_key("item.gems.ruby.name"), "Shiny Ruby");
    assert_eq!(registry.translate_key("unknown.key"), "unknown.key");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_extensions_are_skipped() {
    let (registry, _host) = setup();
    let mut extensions = demo::extensions();
    extensions.push(Arc::new(Broken));
    extensions.push(Arc::new(Panics));

    let report = extension::boot(&registry, &extensions, &LoaderConfig::default()).await;

    assert_eq!(report.loaded.len(), 3);
    let failed: Vec<_> = report.failed.iter().map(|(id, _)| *id).collect();
    assert_eq!(failed, ["broken", "panics"]);
    assert!(report.failed[0].1.contains("missing asset"));
    // What it registered before failing stays registered.
    assert!(registry.get_registered_item("broken:half_done").is_some());
    assert!(registry.get_registered_block("gems:ruby_block").is_some());
}

#[tokio::test]
async fn late_recipes_run_after_content_freeze() {
    let (registry, host) = setup();
    let mut extensions = demo::extensions();
    extensions.push(Arc::new(Sneaky));
    let config = LoaderConfig {
        late_recipes: true,
        ..LoaderConfig::default()
    };

    let report = extension::boot(&registry, &extensions, &config).await;

    // Recipes still went through, content from the recipe pass did not.
    assert_eq!(host.counts().recipes, 8);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "sneaky");
    assert!(registry.get_registered_item("sneaky:late_item").is_none());
}

#[tokio::test]
async fn recipes_closed_after_boot() {
    let (registry, host) = setup();
    extension::boot(&registry, &demo::extensions(), &LoaderConfig::default()).await;

    let ruby = registry.get_registered_item("gems:ruby").unwrap();
    let err = registry
        .register_furnace_recipe(&ruby, RegisteredItemStack::of(&ruby, 1))
        .unwrap_err();
    assert_eq!(err, RegistryError::RecipesFrozen);

    let furnace = host
        .recipes()
        .into_iter()
        .filter(|r| matches!(r, Recipe::Smelting { .. }))
        .count();
    assert_eq!(furnace, 3);
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn config_from_args() {
    let config = LoaderConfig::from_args(["--dump", "out.json", "--late-recipes"]);
    assert_eq!(config.dump.as_deref(), Some(std::path::Path::new("out.json")));
    assert!(config.late_recipes);
    assert!(config.demo);

    let config = LoaderConfig::from_args(["--no-demo", "--dump"]);
    assert_eq!(config.dump, None);
    assert!(!config.demo);
    assert_eq!(LoaderConfig::from_args(Vec::<String>::new()), LoaderConfig::default());
}
