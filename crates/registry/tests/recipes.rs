//! Recipe registration and its independent freeze gate.

use std::sync::{Arc, Mutex};

use ultimate_registry::builder::{BlockBuilder, ItemBuilder};
use ultimate_registry::error::RegistryError;
use ultimate_registry::hooks::GameHooks;
use ultimate_registry::recipe::{Ingredient, Recipe, RegisteredItemStack, ShapedRecipe, SmeltingKind};
use ultimate_registry::{GameRegistry, RegisteredBlock, RegisteredItem};

#[derive(Default)]
struct RecipeBook {
    recipes: Mutex<Vec<Recipe>>,
}

impl GameHooks for RecipeBook {
    fn create_block(&self, _block: &RegisteredBlock, _builder: &BlockBuilder) {}
    fn create_item(&self, _item: &RegisteredItem, _builder: &ItemBuilder) {}
    fn add_recipe(&self, recipe: Recipe) {
        self.recipes.lock().unwrap().push(recipe);
    }
}

fn setup() -> (GameRegistry, Arc<RecipeBook>, RegisteredItem, RegisteredItem) {
    let book = Arc::new(RecipeBook::default());
    let reg = GameRegistry::new_isolated_for_tests(book.clone());
    let ore = reg.register_new_item("a:ruby_ore", &ItemBuilder::new()).unwrap();
    let ruby = reg.register_new_item("a:ruby", &ItemBuilder::new()).unwrap();
    (reg, book, ore, ruby)
}

#[test]
fn all_recipe_kinds_reach_the_host() {
    let (reg, book, ore, ruby) = setup();

    reg.register_recipe(
        RegisteredItemStack::of(&ruby, 1),
        ShapedRecipe::new(["##", "##"]).key('#', &ore),
    )
    .unwrap();
    reg.register_shapeless_recipe(RegisteredItemStack::of(&ruby, 2), vec![Ingredient::from(&ore)])
        .unwrap();
    reg.register_furnace_recipe(&ore, RegisteredItemStack::of(&ruby, 1)).unwrap();
    reg.register_blast_furnace_recipe(&ore, RegisteredItemStack::of(&ruby, 2)).unwrap();
    reg.register_freezer_recipe(&ruby, RegisteredItemStack::of(&ore, 1)).unwrap();

    let recipes = book.recipes.lock().unwrap();
    assert_eq!(recipes.len(), 5);
    assert_eq!(
        recipes[4],
        Recipe::Smelting {
            kind: SmeltingKind::Freezer,
            input: ruby.id,
            output: RegisteredItemStack::of(&ore, 1),
        }
    );
}

#[test]
#[allow(deprecated)]
fn deprecated_names_forward() {
    let (reg, book, ore, ruby) = setup();
    reg.add_furnace_recipe(&ore, RegisteredItemStack::of(&ruby, 1)).unwrap();
    reg.add_blast_furnace_recipe(&ore, RegisteredItemStack::of(&ruby, 1)).unwrap();
    reg.add_freezer_recipe(&ore, RegisteredItemStack::of(&ruby, 1)).unwrap();

    let kinds: Vec<_> = book
        .recipes
        .lock()
        .unwrap()
        .iter()
        .map(|r| match r {
            Recipe::Smelting { kind, .. } => *kind,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(kinds, [SmeltingKind::Furnace, SmeltingKind::BlastFurnace, SmeltingKind::Freezer]);
}

#[test]
fn recipes_rejected_once_frozen() {
    let (reg, book, ore, ruby) = setup();
    assert!(reg.freeze_recipes());
    assert!(reg.are_recipes_frozen());
    assert!(!reg.is_frozen());

    let err = reg
        .register_furnace_recipe(&ore, RegisteredItemStack::of(&ruby, 1))
        .unwrap_err();
    assert_eq!(err, RegistryError::RecipesFrozen);
    assert_eq!(err.to_string(), "too late to register recipes");

    let stack = RegisteredItemStack::of(&ruby, 1);
    assert_eq!(
        reg.register_recipe(stack.clone(), ShapedRecipe::new(["#"]).key('#', &ore)),
        Err(RegistryError::RecipesFrozen)
    );
    assert_eq!(
        reg.register_shapeless_recipe(stack.clone(), vec![Ingredient::from(&ore)]),
        Err(RegistryError::RecipesFrozen)
    );
    assert_eq!(
        reg.register_blast_furnace_recipe(&ore, stack.clone()),
        Err(RegistryError::RecipesFrozen)
    );
    assert_eq!(
        reg.register_freezer_recipe(&ore, stack),
        Err(RegistryError::RecipesFrozen)
    );
    assert!(book.recipes.lock().unwrap().is_empty());

    // Content registration is still open.
    reg.register_new_item("a:sapphire", &ItemBuilder::new()).unwrap();
}

#[test]
fn recipes_still_open_after_content_freeze() {
    let (reg, book, ore, ruby) = setup();
    reg.freeze();
    reg.register_furnace_recipe(&ore, RegisteredItemStack::of(&ruby, 1)).unwrap();
    assert_eq!(book.recipes.lock().unwrap().len(), 1);
}

#[test]
fn malformed_recipes_rejected() {
    let (reg, book, ore, ruby) = setup();
    let result = RegisteredItemStack::of(&ruby, 1);

    let missing_key = reg.register_recipe(result.clone(), ShapedRecipe::new(["#X"]).key('#', &ore));
    assert!(matches!(missing_key, Err(RegistryError::InvalidRecipe { .. })));

    let too_wide = reg.register_recipe(result.clone(), ShapedRecipe::new(["####"]).key('#', &ore));
    assert!(matches!(too_wide, Err(RegistryError::InvalidRecipe { .. })));

    let empty = reg.register_shapeless_recipe(result.clone(), Vec::new());
    assert!(matches!(empty, Err(RegistryError::InvalidRecipe { .. })));

    // Spaces are empty slots, not symbols.
    reg.register_recipe(result, ShapedRecipe::new(["# ", " #"]).key('#', &ore))
        .unwrap();
    assert_eq!(book.recipes.lock().unwrap().len(), 1);
}
