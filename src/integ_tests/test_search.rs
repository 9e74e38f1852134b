//! Search behaviour over randomized and hand-built catalogs.
//!
//! Every result is checked against a brute-force recount of the catalog, for
//! both scan strategies.

use crate::{
    Catalog, Color, DimensionValue, EngineConfig, FacetCount, FacetError, ScanStrategy,
    SearchEngine, SearchOptions, SearchResults, Shirt, Size,
};
use proptest::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

// ============================================================
// Shared helpers
// ============================================================

pub(super) const STRATEGIES: [ScanStrategy; 2] = [ScanStrategy::Linear, ScanStrategy::Postings];

fn engine(catalog: &Catalog, strategy: ScanStrategy) -> SearchEngine {
    SearchEngine::with_config(catalog.clone(), EngineConfig::default().with_strategy(strategy))
}

fn shirt(color: Color, size: Size) -> Shirt {
    Shirt::new(Uuid::new_v4(), format!("{} - {}", color, size), color, size)
}

fn accepts<V: DimensionValue>(requested: &[V], value: &V) -> bool {
    requested.is_empty() || requested.iter().any(|r| r.id() == value.id())
}

fn describe(options: &SearchOptions) -> String {
    let names = |v: Option<Vec<String>>| v.map(|v| v.join(",")).unwrap_or_else(|| "<none>".into());
    format!(
        "colors='{}' sizes='{}'",
        names(
            options
                .colors
                .as_ref()
                .map(|c| c.iter().map(|c| c.to_string()).collect())
        ),
        names(
            options
                .sizes
                .as_ref()
                .map(|s| s.iter().map(|s| s.to_string()).collect())
        ),
    )
}

fn verify_facets<V: DimensionValue>(counts: &[FacetCount<V>], expected: impl Fn(&V) -> u64) {
    assert_eq!(counts.len(), V::all().len(), "{} facet length", V::DIMENSION);
    for value in V::all() {
        let entries: Vec<_> = counts.iter().filter(|c| c.value.id() == value.id()).collect();
        assert_eq!(
            entries.len(),
            1,
            "{} count for '{}' must appear exactly once",
            V::DIMENSION,
            value.name()
        );
        assert_eq!(
            entries[0].count,
            expected(value),
            "{} count for '{}'",
            V::DIMENSION,
            value.name()
        );
    }
}

pub(super) fn verify_results(catalog: &Catalog, options: &SearchOptions, results: &SearchResults) {
    let colors = options.colors.as_deref().unwrap();
    let sizes = options.sizes.as_deref().unwrap();
    let returned: HashSet<Uuid> = results.shirts.iter().map(|s| s.id).collect();
    assert_eq!(returned.len(), results.shirts.len(), "duplicate shirts in results");

    for shirt in catalog {
        if accepts(colors, &shirt.color) && accepts(sizes, &shirt.size) {
            assert!(
                returned.contains(&shirt.id),
                "'{}' with size '{}' and color '{}' missing from results for {}",
                shirt.name,
                shirt.size,
                shirt.color,
                describe(options)
            );
        }
    }
    for shirt in &results.shirts {
        assert!(
            accepts(colors, &shirt.color) && accepts(sizes, &shirt.size),
            "'{}' with size '{}' and color '{}' should not be in results for {}",
            shirt.name,
            shirt.size,
            shirt.color,
            describe(options)
        );
    }

    verify_facets(&results.color_counts, |color| {
        catalog
            .iter()
            .filter(|s| s.color == *color && accepts(sizes, &s.size))
            .count() as u64
    });
    verify_facets(&results.size_counts, |size| {
        catalog
            .iter()
            .filter(|s| s.size == *size && accepts(colors, &s.color))
            .count() as u64
    });
}

pub(super) fn match_cases() -> Vec<SearchOptions> {
    let mut cases = Vec::new();
    for c in Color::ALL {
        cases.push(SearchOptions::unrestricted().with_colors([c]));
    }
    for s in Size::ALL {
        cases.push(SearchOptions::unrestricted().with_sizes([s]));
    }
    for c in Color::ALL {
        for s in Size::ALL {
            cases.push(SearchOptions::new(vec![c], vec![s]));
        }
    }
    cases.extend([
        SearchOptions::new(Color::ALL.to_vec(), vec![Size::SMALL]),
        SearchOptions::new(vec![Color::WHITE], Size::ALL.to_vec()),
        SearchOptions::new(vec![Color::BLACK, Color::BLUE], vec![Size::SMALL, Size::LARGE]),
        SearchOptions::new(vec![Color::RED, Color::YELLOW], vec![Size::MEDIUM, Size::LARGE]),
        SearchOptions::everything(),
        SearchOptions::unrestricted(),
    ]);
    cases
}

// ============================================================
// Argument validation
// ============================================================

#[test]
fn test_invalid_options_rejected_on_empty_catalog() {
    let invalid = [
        SearchOptions {
            colors: None,
            sizes: None,
        },
        SearchOptions {
            colors: Some(vec![]),
            sizes: None,
        },
        SearchOptions {
            colors: None,
            sizes: Some(vec![Size::SMALL]),
        },
    ];
    for strategy in STRATEGIES {
        let engine = engine(&Catalog::empty(), strategy);
        for options in &invalid {
            assert!(
                matches!(engine.search(options), Err(FacetError::InvalidArgument(_))),
                "{} via {}",
                describe(options),
                strategy
            );
        }
        assert!(matches!(
            engine.search_json(&serde_json::Value::Null),
            Err(FacetError::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_invalid_options_rejected_on_populated_catalog() {
    let engine = engine(&Catalog::random(100, 1), ScanStrategy::Linear);
    let options = SearchOptions {
        colors: Some(Color::ALL.to_vec()),
        sizes: None,
    };
    assert!(matches!(
        engine.search(&options),
        Err(FacetError::InvalidArgument(_))
    ));
}

// ============================================================
// Concrete scenarios
// ============================================================

#[test]
fn test_empty_catalog_returns_zero_counts() {
    for strategy in STRATEGIES {
        let catalog = Catalog::empty();
        let engine = engine(&catalog, strategy);
        let options = SearchOptions::everything();

        let results = engine.search(&options).unwrap();

        assert!(results.shirts.is_empty());
        assert!(results.color_counts.iter().all(|c| c.count == 0));
        assert!(results.size_counts.iter().all(|c| c.count == 0));
        verify_results(&catalog, &options, &results);
    }
}

#[test]
fn test_three_item_example() {
    let red_small = shirt(Color::RED, Size::SMALL);
    let red_large = shirt(Color::RED, Size::LARGE);
    let blue_small = shirt(Color::BLUE, Size::SMALL);
    let catalog =
        Catalog::new(vec![red_small.clone(), red_large.clone(), blue_small.clone()]).unwrap();

    for strategy in STRATEGIES {
        let results = engine(&catalog, strategy)
            .search(&SearchOptions::new(vec![Color::RED], vec![]))
            .unwrap();

        let ids: Vec<Uuid> = results.shirts.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![red_small.id, red_large.id]);

        assert_eq!(results.size_count(Size::SMALL), Some(1));
        assert_eq!(results.size_count(Size::LARGE), Some(1));
        assert_eq!(results.size_count(Size::MEDIUM), Some(0));

        assert_eq!(results.color_count(Color::RED), Some(2));
        assert_eq!(results.color_count(Color::BLUE), Some(1));
        assert_eq!(results.color_count(Color::YELLOW), Some(0));
        assert_eq!(results.color_count(Color::WHITE), Some(0));
        assert_eq!(results.color_count(Color::BLACK), Some(0));
    }
}

#[test]
fn test_empty_dimension_means_any_not_none() {
    let catalog = Catalog::random(300, 21);
    let results = engine(&catalog, ScanStrategy::Linear)
        .search(&SearchOptions::unrestricted())
        .unwrap();
    assert_eq!(results.shirts.len(), catalog.len());
}

#[test]
fn test_own_filter_does_not_shrink_own_facet() {
    let catalog = Catalog::random(1_000, 33);
    for strategy in STRATEGIES {
        let engine = engine(&catalog, strategy);
        let open = engine
            .search(&SearchOptions::new(vec![], vec![Size::LARGE]))
            .unwrap();
        let narrowed = engine
            .search(&SearchOptions::new(vec![Color::BLUE], vec![Size::LARGE]))
            .unwrap();
        assert_eq!(open.color_counts, narrowed.color_counts);
        assert_ne!(open.size_counts, narrowed.size_counts);
    }
}

#[test]
fn test_everything_equals_unrestricted() {
    let catalog = Catalog::random(1_000, 8);
    for strategy in STRATEGIES {
        let engine = engine(&catalog, strategy);
        let all = engine.search(&SearchOptions::everything()).unwrap();
        let any = engine.search(&SearchOptions::unrestricted()).unwrap();
        assert_eq!(all, any);
    }
}

#[test]
fn test_search_is_idempotent() {
    let catalog = Catalog::random(1_000, 13);
    let options = SearchOptions::new(vec![Color::BLACK, Color::WHITE], vec![Size::MEDIUM]);
    for strategy in STRATEGIES {
        let engine = engine(&catalog, strategy);
        let first = engine.search(&options).unwrap();
        let second = engine.search(&options).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_duplicate_requested_values() {
    let catalog = Catalog::random(500, 2);
    let engine = engine(&catalog, ScanStrategy::Linear);
    let options = SearchOptions::new(vec![Color::RED, Color::RED], vec![Size::SMALL, Size::SMALL]);
    let results = engine.search(&options).unwrap();
    verify_results(&catalog, &options, &results);
}

// ============================================================
// Exhaustive case table (single values, every pair, mixes)
// ============================================================

#[test]
fn test_match_cases_against_brute_force() {
    let catalog = Catalog::random(1_000, 42);
    for strategy in STRATEGIES {
        let engine = engine(&catalog, strategy);
        for options in match_cases() {
            let results = engine.search(&options).unwrap();
            verify_results(&catalog, &options, &results);
        }
    }
}

// ============================================================
// Properties
// ============================================================

fn subset<V: DimensionValue>(mask: u8) -> Vec<V> {
    V::all()
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, v)| *v)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_results_match_brute_force(
        count in 0usize..400,
        seed in any::<u64>(),
        color_mask in 0u8..32,
        size_mask in 0u8..8,
    ) {
        let catalog = Catalog::random(count, seed);
        let options = SearchOptions::new(subset(color_mask), subset(size_mask));
        let linear = engine(&catalog, ScanStrategy::Linear).search(&options).unwrap();
        let postings = engine(&catalog, ScanStrategy::Postings).search(&options).unwrap();

        verify_results(&catalog, &options, &linear);
        prop_assert_eq!(linear, postings);
    }

    #[test]
    fn prop_facets_independent_of_own_filter(
        seed in any::<u64>(),
        color_a in 0u8..32,
        color_b in 0u8..32,
        size_mask in 0u8..8,
    ) {
        let catalog = Catalog::random(200, seed);
        let engine = engine(&catalog, ScanStrategy::Linear);
        let a = engine.search(&SearchOptions::new(subset(color_a), subset(size_mask))).unwrap();
        let b = engine.search(&SearchOptions::new(subset(color_b), subset(size_mask))).unwrap();
        prop_assert_eq!(a.color_counts, b.color_counts);
    }
}
