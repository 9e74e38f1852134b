use crate::index::catalog::Catalog;
use crate::query::executor::{FacetTally, QueryExecutor};
use crate::query::filter::CompiledFilter;
use crate::types::{Color, DimensionValue, SearchResults, Size};
use std::sync::Arc;

const COLORS: usize = Color::ALL.len();
const SIZES: usize = Size::ALL.len();

/// Catalog positions grouped by (color, size) cell.
///
/// Facet counts come from cell lengths, so their cost is independent of the
/// catalog size. Matches are the union of the accepted cells, merged back into
/// catalog order.
#[derive(Debug, Clone)]
pub struct CellIndex {
    catalog: Catalog,
    // Row-major: cells[color * SIZES + size]
    cells: Vec<Vec<u32>>,
}

impl CellIndex {
    pub fn build(catalog: Catalog) -> Self {
        let mut cells = vec![Vec::new(); COLORS * SIZES];
        for (position, shirt) in catalog.iter().enumerate() {
            match (shirt.color.ordinal(), shirt.size.ordinal()) {
                (Some(c), Some(s)) => cells[c * SIZES + s].push(position as u32),
                _ => tracing::warn!(
                    id = %shirt.id,
                    "[POSTINGS] item outside the dimension registries, skipping"
                ),
            }
        }
        CellIndex { catalog, cells }
    }

    pub fn cell_len(&self, color: Color, size: Size) -> usize {
        match (color.ordinal(), size.ordinal()) {
            (Some(c), Some(s)) => self.cells[c * SIZES + s].len(),
            _ => 0,
        }
    }
}

impl QueryExecutor for CellIndex {
    fn execute(&self, filter: &CompiledFilter) -> SearchResults {
        let color_ok: [bool; COLORS] = Color::ALL.map(|c| filter.colors.accepts(&c));
        let size_ok: [bool; SIZES] = Size::ALL.map(|s| filter.sizes.accepts(&s));

        let mut colors = FacetTally::new();
        let mut sizes = FacetTally::new();
        let mut positions: Vec<u32> = Vec::new();

        for (c, color) in Color::ALL.iter().enumerate() {
            for (s, size) in Size::ALL.iter().enumerate() {
                let cell = &self.cells[c * SIZES + s];
                if size_ok[s] {
                    colors.add(color, cell.len() as u64);
                }
                if color_ok[c] {
                    sizes.add(size, cell.len() as u64);
                }
                if color_ok[c] && size_ok[s] {
                    positions.extend_from_slice(cell);
                }
            }
        }

        positions.sort_unstable();
        let shirts = positions
            .into_iter()
            .filter_map(|p| self.catalog.get(p as usize).map(Arc::clone))
            .collect();

        SearchResults {
            shirts,
            color_counts: colors.into_counts(),
            size_counts: sizes.into_counts(),
        }
    }
}
