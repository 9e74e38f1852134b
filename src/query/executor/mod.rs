pub mod facets;
pub mod linear;

use crate::query::filter::CompiledFilter;
use crate::types::SearchResults;

pub use facets::FacetTally;
pub use linear::LinearScan;

/// Evaluates a compiled filter against an immutable catalog snapshot.
///
/// Implementations hold no mutable state, so one executor serves any number of
/// concurrent searches.
pub trait QueryExecutor: Send + Sync {
    fn execute(&self, filter: &CompiledFilter) -> SearchResults;
}
