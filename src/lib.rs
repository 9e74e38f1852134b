//! Faceted search over an immutable, in-memory shirt catalog.
//!
//! Every shirt carries exactly one [`Color`] and one [`Size`]. A search takes a
//! set of acceptable values per dimension (an empty set means "any") and
//! returns the matching shirts plus a count for every color and every size.
//! Each facet is counted with only the *other* dimension's filter applied, so
//! a UI can show how many items each alternative value would add.
//!
//! ```
//! use facet_catalog::{Color, SearchEngine, SearchOptions, Shirt, Size};
//! use uuid::Uuid;
//!
//! let engine = SearchEngine::new(vec![
//!     Shirt::new(Uuid::new_v4(), "Red - Small", Color::RED, Size::SMALL),
//!     Shirt::new(Uuid::new_v4(), "Red - Large", Color::RED, Size::LARGE),
//!     Shirt::new(Uuid::new_v4(), "Blue - Small", Color::BLUE, Size::SMALL),
//! ])?;
//!
//! let results = engine.search(&SearchOptions::new(vec![Color::RED], vec![]))?;
//! assert_eq!(results.shirts.len(), 2);
//! assert_eq!(results.color_count(Color::BLUE), Some(1));
//! assert_eq!(results.size_count(Size::SMALL), Some(1));
//! # Ok::<(), facet_catalog::FacetError>(())
//! ```

pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod types;


pub use engine::SearchEngine;
pub use error::{FacetError, Result};
pub use index::{Catalog, CatalogManager, CellIndex, EngineConfig, ScanStrategy};
pub use types::{
    CatalogName, Color, ColorCount, DimensionValue, FacetCount, SearchOptions, SearchResults,
    Shirt, Size, SizeCount,
};
