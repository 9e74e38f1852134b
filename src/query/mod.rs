pub mod executor;
pub mod filter;

pub use executor::{FacetTally, LinearScan, QueryExecutor};
pub use filter::{CompiledFilter, DimensionFilter};
