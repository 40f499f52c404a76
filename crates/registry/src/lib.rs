//! Content-identity layer for a moddable game.
//!
//! Extensions register blocks, items and entity types under namespaced names
//! and get back compact numeric ids from the loader-reserved ranges of a
//! legacy id space. See [`allocator::GameRegistry`] for the entry point.

pub mod allocator;
pub mod builder;
pub mod error;
pub mod hooks;
pub mod ids;
pub mod lifecycle;
pub mod name;
pub mod recipe;
pub mod scratch;
pub mod script;
pub mod store;

pub use allocator::GameRegistry;
pub use error::{RegistryError, Result};
pub use hooks::{GameHooks, NoopHooks, RegisteredBlock, RegisteredEntityType, RegisteredItem};
pub use ids::{BlockId, EntityTypeId, ItemId};
pub use name::{ExtensionScope, NamespacedName};
