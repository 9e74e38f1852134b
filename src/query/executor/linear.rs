use super::{FacetTally, QueryExecutor};
use crate::index::catalog::Catalog;
use crate::query::filter::CompiledFilter;
use crate::types::SearchResults;
use std::sync::Arc;

/// Single pass over the catalog with O(1) membership checks.
///
/// Each facet only honours the *other* dimension's filter, so narrowing colors
/// never shrinks the color counts.
#[derive(Debug, Clone)]
pub struct LinearScan {
    catalog: Catalog,
}

impl LinearScan {
    pub fn new(catalog: Catalog) -> Self {
        LinearScan { catalog }
    }
}

impl QueryExecutor for LinearScan {
    fn execute(&self, filter: &CompiledFilter) -> SearchResults {
        let mut shirts = Vec::new();
        let mut colors = FacetTally::new();
        let mut sizes = FacetTally::new();

        for shirt in self.catalog.iter() {
            let color_ok = filter.colors.accepts(&shirt.color);
            let size_ok = filter.sizes.accepts(&shirt.size);
            if size_ok {
                colors.record(&shirt.color);
            }
            if color_ok {
                sizes.record(&shirt.size);
            }
            if color_ok && size_ok {
                shirts.push(Arc::clone(shirt));
            }
        }

        SearchResults {
            shirts,
            color_counts: colors.into_counts(),
            size_counts: sizes.into_counts(),
        }
    }
}
