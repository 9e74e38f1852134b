use crate::engine::SearchEngine;
use crate::error::{FacetError, Result};
use crate::index::catalog::Catalog;
use crate::index::config::EngineConfig;
use crate::types::{CatalogName, SearchOptions, SearchResults};
use dashmap::DashMap;
use std::sync::Arc;

/// Named catalogs, each served by its own immutable [`SearchEngine`].
///
/// Create one with [`CatalogManager::new`], which returns `Arc<CatalogManager>`
/// for sharing across threads. Reloading a catalog builds a fresh engine and
/// replaces the map entry in one step; searches already running keep the
/// engine they started with.
pub struct CatalogManager {
    engines: DashMap<CatalogName, Arc<SearchEngine>>,
    config: EngineConfig,
}

impl CatalogManager {
    pub fn new(config: EngineConfig) -> Arc<Self> {
        Arc::new(CatalogManager {
            engines: DashMap::new(),
            config,
        })
    }

    pub fn from_env() -> Arc<Self> {
        Self::new(EngineConfig::from_env())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build an engine for `catalog` and publish it under `name`, replacing
    /// any previous engine for that name.
    pub fn install(&self, name: &str, catalog: Catalog) -> Arc<SearchEngine> {
        let items = catalog.len();
        let engine = Arc::new(SearchEngine::with_config(catalog, self.config.clone()));
        let previous = self.engines.insert(name.to_string(), Arc::clone(&engine));
        tracing::info!(
            catalog = name,
            items,
            strategy = %self.config.strategy,
            replaced = previous.is_some(),
            "Installed catalog"
        );
        engine
    }

    /// Current engine for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::CatalogNotFound`] if nothing is installed under
    /// `name`.
    pub fn get(&self, name: &str) -> Result<Arc<SearchEngine>> {
        self.engines
            .get(name)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| FacetError::CatalogNotFound(name.to_string()))
    }

    pub fn search(&self, name: &str, options: &SearchOptions) -> Result<SearchResults> {
        // Clone the Arc first so the map shard is not held during the search.
        let engine = self.get(name)?;
        engine.search(options)
    }

    pub fn remove(&self, name: &str) -> bool {
        let removed = self.engines.remove(name).is_some();
        if removed {
            tracing::info!(catalog = name, "Removed catalog");
        }
        removed
    }

    /// Installed catalog names, sorted.
    pub fn catalog_names(&self) -> Vec<CatalogName> {
        let mut names: Vec<CatalogName> = self.engines.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}
