//! Extension loading.
//!
//! Each [`Extension`] runs its load phase on its own blocking worker inside
//! an [`ExtensionScope`], so unqualified registry names pick up its id.
//! [`boot`] drives the whole sequence and flips both freeze latches.
//!
//! # Boot order
//!
//! 1. Every extension's `load` runs concurrently.
//! 2. Recipe pass (`register_recipes`), before or after step 3 depending on
//!    [`LoaderConfig::late_recipes`].
//! 3. Content freeze.
//! 4. Recipe freeze.

use std::sync::Arc;

use serde::Serialize;
use ultimate_registry::{ExtensionScope, GameRegistry};

use crate::config::LoaderConfig;

/// A unit of third-party content.
pub trait Extension: Send + Sync + 'static {
    /// Namespace for everything this extension registers.
    fn id(&self) -> &'static str;

    /// Register blocks, items and entity types.
    fn load(&self, registry: &GameRegistry) -> anyhow::Result<()>;

    /// Register recipes. Runs after every extension has loaded.
    fn register_recipes(&self, _registry: &GameRegistry) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Which extensions made it through boot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: Vec<&'static str>,
    /// `(extension id, error)`.
    pub failed: Vec<(&'static str, String)>,
}

/// Run every extension's load phase on its own worker and wait for all.
///
/// A failing or panicking extension is reported and skipped; the others
/// keep loading.
pub async fn load_all(
    registry: &Arc<GameRegistry>,
    extensions: &[Arc<dyn Extension>],
) -> (Vec<Arc<dyn Extension>>, LoadReport) {
    let mut tasks = Vec::with_capacity(extensions.len());
    for extension in extensions {
        let registry = Arc::clone(registry);
        let ext = Arc::clone(extension);
        let task = tokio::task::spawn_blocking(move || {
            let _scope = ExtensionScope::enter(ext.id());
            ext.load(&registry)
        });
        tasks.push((Arc::clone(extension), task));
    }

    let mut report = LoadReport::default();
    let mut loaded = Vec::new();
    for (extension, task) in tasks {
        let id = extension.id();
        match task.await {
            Ok(Ok(())) => {
                tracing::info!("Extension '{}' loaded", id);
                report.loaded.push(id);
                loaded.push(extension);
            }
            Ok(Err(e)) => {
                tracing::error!("Extension '{}' failed to load: {:#}", id, e);
                report.failed.push((id, format!("{e:#}")));
            }
            Err(e) => {
                tracing::error!("Extension '{}' panicked while loading: {}", id, e);
                report.failed.push((id, e.to_string()));
            }
        }
    }
    (loaded, report)
}

/// Run each loaded extension's recipe pass in load order.
fn recipe_pass(registry: &GameRegistry, extensions: &[Arc<dyn Extension>], report: &mut LoadReport) {
    for extension in extensions {
        let id = extension.id();
        let _scope = ExtensionScope::enter(id);
        if let Err(e) = extension.register_recipes(registry) {
            tracing::error!("Extension '{}' failed to register recipes: {:#}", id, e);
            report.failed.push((id, format!("{e:#}")));
        }
    }
}

/// Load every extension, then freeze content and recipes.
pub async fn boot(
    registry: &Arc<GameRegistry>,
    extensions: &[Arc<dyn Extension>],
    config: &LoaderConfig,
) -> LoadReport {
    tracing::info!("Loading {} extensions...", extensions.len());
    let (loaded, mut report) = load_all(registry, extensions).await;

    if !config.late_recipes {
        recipe_pass(registry, &loaded, &mut report);
    }
    registry.freeze();
    if config.late_recipes {
        recipe_pass(registry, &loaded, &mut report);
    }
    registry.freeze_recipes();

    tracing::info!(
        "Boot complete: {} loaded, {} failed",
        report.loaded.len(),
        report.failed.len()
    );
    report
}
