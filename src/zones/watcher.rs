//! Zone catalog file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::matching::Matcher;
use crate::observability::metrics;
use crate::quoting::QuoteEngine;
use crate::zones::catalog::load_catalog;
use crate::zones::types::CatalogResult;

/// Load the catalog at `path` and swap it into the engine.
///
/// On error the engine keeps its current catalog. Returns the new zone count.
pub fn reload_catalog(path: &Path, engine: &QuoteEngine) -> CatalogResult<usize> {
    match load_catalog(path) {
        Ok(catalog) => {
            let zones = catalog.len();
            engine.replace_matcher(Matcher::new(catalog));
            metrics::record_catalog_reload("ok");
            Ok(zones)
        }
        Err(e) => {
            metrics::record_catalog_reload("error");
            Err(e)
        }
    }
}

/// Watches the catalog file and reloads it into a [`QuoteEngine`].
pub struct CatalogWatcher {
    path: PathBuf,
    engine: QuoteEngine,
}

impl CatalogWatcher {
    pub fn new(path: &Path, engine: QuoteEngine) -> Self {
        Self {
            path: path.to_path_buf(),
            engine,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for reloads to continue.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let engine = self.engine;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = %path.display(), "Zone catalog change detected, reloading");
                    match reload_catalog(&path, &engine) {
                        Ok(zones) => tracing::info!(zones, "Zone catalog reloaded"),
                        Err(e) => tracing::error!(
                            error = %e,
                            "Failed to reload zone catalog, keeping current catalog"
                        ),
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Catalog watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), "Zone catalog watcher started");
        Ok(watcher)
    }
}
