pub mod catalog;
pub mod config;
pub mod manager;
pub mod postings;

pub use catalog::Catalog;
pub use config::{EngineConfig, ScanStrategy};
pub use manager::CatalogManager;
pub use postings::CellIndex;
