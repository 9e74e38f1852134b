use crate::error::{FacetError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const STRATEGY_ENV: &str = "FACET_CATALOG_STRATEGY";
pub const SLOW_QUERY_ENV: &str = "FACET_CATALOG_SLOW_QUERY_MS";

const DEFAULT_SLOW_QUERY_MS: u64 = 100;

/// How a [`SearchEngine`](crate::SearchEngine) walks its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStrategy {
    /// One pass over every item per query.
    #[default]
    Linear,
    /// Items pre-grouped by (color, size) cell at construction.
    Postings,
}

impl FromStr for ScanStrategy {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "scan" => Ok(ScanStrategy::Linear),
            "postings" | "index" => Ok(ScanStrategy::Postings),
            other => Err(FacetError::Config(format!(
                "unknown scan strategy '{}' (expected 'linear' or 'postings')",
                other
            ))),
        }
    }
}

impl fmt::Display for ScanStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStrategy::Linear => f.write_str("linear"),
            ScanStrategy::Postings => f.write_str("postings"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub strategy: ScanStrategy,
    /// Searches slower than this are logged at warn level.
    pub slow_query_threshold: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            strategy: ScanStrategy::default(),
            slow_query_threshold: Duration::from_millis(DEFAULT_SLOW_QUERY_MS),
        }
    }
}

impl EngineConfig {
    /// Read configuration from the environment, falling back to defaults for
    /// unset or unparseable values.
    pub fn from_env() -> Self {
        let strategy = match env::var(STRATEGY_ENV) {
            Ok(raw) => raw.parse::<ScanStrategy>().unwrap_or_else(|e| {
                tracing::warn!("{}, using {}", e, ScanStrategy::default());
                ScanStrategy::default()
            }),
            Err(_) => ScanStrategy::default(),
        };

        let slow_query_ms = env::var(SLOW_QUERY_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SLOW_QUERY_MS);

        EngineConfig {
            strategy,
            slow_query_threshold: Duration::from_millis(slow_query_ms),
        }
    }

    pub fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
