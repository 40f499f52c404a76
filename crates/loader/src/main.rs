use std::sync::Arc;

use anyhow::Context;
use ultimate_loader::config::LoaderConfig;
use ultimate_loader::demo;
use ultimate_loader::extension::{self, Extension};
use ultimate_loader::host::LoggingHost;
use ultimate_loader::listing::RegistryListing;
use ultimate_registry::GameRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = LoaderConfig::from_args(std::env::args().skip(1));

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Ultimate loader -- content registry host");

    let host = Arc::new(LoggingHost::new());
    let registry = Arc::new(GameRegistry::new(host.clone()).context("creating game registry")?);

    let extensions: Vec<Arc<dyn Extension>> = if config.demo {
        demo::extensions()
    } else {
        Vec::new()
    };
    let report = extension::boot(&registry, &extensions, &config).await;
    for (id, error) in &report.failed {
        tracing::warn!("Extension '{}' did not load cleanly: {}", id, error);
    }

    let counts = host.counts();
    tracing::info!(
        "Host built {} blocks, {} items, {} entity types; {} recipes",
        counts.blocks,
        counts.items,
        counts.entity_types,
        counts.recipes
    );

    // ── Enumeration surface ──────────────────────────────────────────────
    let listing = RegistryListing::capture(&registry);
    if listing.fallback_count() > 0 {
        tracing::warn!("{} entries are sharing a fallback id", listing.fallback_count());
    }
    let json = listing.to_json().context("serializing registry listing")?;
    match &config.dump {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("writing listing to {}", path.display()))?;
            tracing::info!("Wrote {} entries to {}", listing.entries.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
