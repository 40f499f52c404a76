//! Recipe values and the gate that closes recipe registration.
//!
//! Storing and resolving recipes belongs to the host. The registry only
//! checks that a recipe is well formed and that recipes are not frozen, then
//! forwards it.

use serde::Serialize;

use crate::error::{RegistryError, Result};
use crate::hooks::RegisteredItem;
use crate::ids::ItemId;
use crate::lifecycle::Latch;

/// Largest crafting grid edge.
pub const GRID_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredItemStack {
    pub item: ItemId,
    pub count: u8,
    pub damage: u16,
}

impl RegisteredItemStack {
    pub fn new(item: ItemId, count: u8) -> Self {
        Self {
            item,
            count,
            damage: 0,
        }
    }

    pub fn of(item: &RegisteredItem, count: u8) -> Self {
        Self::new(item.id, count)
    }

    pub fn with_damage(mut self, damage: u16) -> Self {
        self.damage = damage;
        self
    }
}

/// Something that fills one crafting slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ingredient {
    Item(ItemId),
    Stack(RegisteredItemStack),
    AnyOf(Vec<Ingredient>),
}

impl From<&RegisteredItem> for Ingredient {
    fn from(item: &RegisteredItem) -> Self {
        Ingredient::Item(item.id)
    }
}

impl From<RegisteredItemStack> for Ingredient {
    fn from(stack: RegisteredItemStack) -> Self {
        Ingredient::Stack(stack)
    }
}

/// Grid pattern plus the ingredient each pattern character stands for.
/// Spaces are empty slots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ShapedRecipe {
    pub pattern: Vec<String>,
    pub keys: Vec<(char, Ingredient)>,
}

impl ShapedRecipe {
    pub fn new<S: Into<String>>(rows: impl IntoIterator<Item = S>) -> Self {
        Self {
            pattern: rows.into_iter().map(Into::into).collect(),
            keys: Vec::new(),
        }
    }

    pub fn key(mut self, symbol: char, ingredient: impl Into<Ingredient>) -> Self {
        self.keys.push((symbol, ingredient.into()));
        self
    }

    pub fn ingredient(&self, symbol: char) -> Option<&Ingredient> {
        self.keys
            .iter()
            .find(|(key, _)| *key == symbol)
            .map(|(_, ingredient)| ingredient)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pattern.is_empty() || self.pattern.len() > GRID_SIZE {
            return Err(invalid(format!(
                "pattern must have 1 to {GRID_SIZE} rows, got {}",
                self.pattern.len()
            )));
        }
        for row in &self.pattern {
            let width = row.chars().count();
            if width == 0 || width > GRID_SIZE {
                return Err(invalid(format!("pattern row {row:?} must be 1 to {GRID_SIZE} wide")));
            }
            if let Some(symbol) = row
                .chars()
                .find(|c| *c != ' ' && self.ingredient(*c).is_none())
            {
                return Err(invalid(format!("pattern symbol {symbol:?} has no ingredient")));
            }
        }
        Ok(())
    }
}

/// Single-input, single-output station recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SmeltingKind {
    Furnace,
    BlastFurnace,
    Freezer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recipe {
    Shaped {
        result: RegisteredItemStack,
        recipe: ShapedRecipe,
    },
    Shapeless {
        result: RegisteredItemStack,
        ingredients: Vec<Ingredient>,
    },
    Smelting {
        kind: SmeltingKind,
        input: ItemId,
        output: RegisteredItemStack,
    },
}

impl Recipe {
    pub fn validate(&self) -> Result<()> {
        match self {
            Recipe::Shaped { recipe, .. } => recipe.validate(),
            Recipe::Shapeless { ingredients, .. } => {
                let max = GRID_SIZE * GRID_SIZE;
                if ingredients.is_empty() || ingredients.len() > max {
                    Err(invalid(format!(
                        "shapeless recipe needs 1 to {max} ingredients, got {}",
                        ingredients.len()
                    )))
                } else {
                    Ok(())
                }
            }
            Recipe::Smelting { .. } => Ok(()),
        }
    }
}

fn invalid(reason: String) -> RegistryError {
    RegistryError::InvalidRecipe { reason }
}

/// Closes recipe registration independently of content registration.
#[derive(Debug, Default)]
pub struct RecipeGate {
    frozen: Latch,
}

impl RecipeGate {
    pub const fn new() -> Self {
        Self {
            frozen: Latch::new(),
        }
    }

    /// `Ok` while recipes may still be registered.
    pub fn check(&self) -> Result<()> {
        if self.frozen.is_tripped() {
            Err(RegistryError::RecipesFrozen)
        } else {
            Ok(())
        }
    }

    /// Returns `true` if this call froze the gate.
    pub fn freeze(&self) -> bool {
        self.frozen.trip()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_tripped()
    }
}
