use crate::error::{FacetError, Result};
use crate::index::catalog::Catalog;
use crate::index::config::{EngineConfig, ScanStrategy};
use crate::index::postings::CellIndex;
use crate::query::executor::{LinearScan, QueryExecutor};
use crate::query::filter::CompiledFilter;
use crate::types::{SearchOptions, SearchResults, Shirt};
use std::time::Instant;

/// Faceted search over one immutable catalog snapshot.
///
/// The engine never mutates after construction and is `Send + Sync`; share it
/// behind an `Arc` and call [`SearchEngine::search`] from any number of
/// threads. To change the catalog, build a new engine and swap it in (see
/// [`CatalogManager`](crate::CatalogManager)).
pub struct SearchEngine {
    catalog: Catalog,
    executor: Box<dyn QueryExecutor>,
    config: EngineConfig,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("items", &self.catalog.len())
            .field("config", &self.config)
            .finish()
    }
}

impl SearchEngine {
    /// Build an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::DuplicateItem`] if two shirts share an id.
    pub fn new(shirts: Vec<Shirt>) -> Result<Self> {
        Ok(Self::from_catalog(Catalog::new(shirts)?))
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    pub fn with_config(catalog: Catalog, config: EngineConfig) -> Self {
        let executor: Box<dyn QueryExecutor> = match config.strategy {
            ScanStrategy::Linear => Box::new(LinearScan::new(catalog.clone())),
            ScanStrategy::Postings => Box::new(CellIndex::build(catalog.clone())),
        };
        SearchEngine {
            catalog,
            executor,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Filter the catalog and count facets.
    ///
    /// A shirt matches when, for each dimension, the requested set is empty or
    /// contains the shirt's value. The color facet counts every shirt whose
    /// size passes the size filter (the color filter is ignored), and the size
    /// facet symmetrically. Both facet lists cover the whole registry, in
    /// registry order, with zeros for absent values. Matches keep catalog
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::InvalidArgument`] if either value collection is
    /// absent. This is checked before anything else, even for an empty
    /// catalog.
    pub fn search(&self, options: &SearchOptions) -> Result<SearchResults> {
        let filter = CompiledFilter::compile(options)?;

        let t0 = Instant::now();
        let results = self.executor.execute(&filter);
        let elapsed = t0.elapsed();

        tracing::debug!(
            strategy = %self.config.strategy,
            items = self.catalog.len(),
            matched = results.shirts.len(),
            "[SEARCH] took {:?}",
            elapsed
        );
        if elapsed > self.config.slow_query_threshold {
            tracing::warn!(
                strategy = %self.config.strategy,
                items = self.catalog.len(),
                threshold_ms = self.config.slow_query_threshold.as_millis() as u64,
                "[SEARCH] slow query took {:?}",
                elapsed
            );
        }

        Ok(results)
    }

    /// [`SearchEngine::search`] for options arriving as JSON.
    ///
    /// `null` (no options at all) and malformed options fail with
    /// [`FacetError::InvalidArgument`], like missing collections.
    pub fn search_json(&self, options: &serde_json::Value) -> Result<SearchResults> {
        if options.is_null() {
            return Err(FacetError::InvalidArgument(
                "search options must be provided".to_string(),
            ));
        }
        let options: SearchOptions = serde_json::from_value(options.clone())
            .map_err(|e| FacetError::InvalidArgument(format!("malformed search options: {}", e)))?;
        self.search(&options)
    }
}
