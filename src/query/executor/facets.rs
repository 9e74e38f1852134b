use crate::types::{DimensionValue, FacetCount};
use std::collections::HashMap;
use std::marker::PhantomData;
use uuid::Uuid;

/// Running counts for one dimension, keyed by value id.
///
/// [`FacetTally::into_counts`] merges the tally with the dimension registry, so
/// the output always has exactly one entry per registry value (zero-filled) and
/// never contains a value outside the registry.
#[derive(Debug, Clone)]
pub struct FacetTally<V: DimensionValue> {
    counts: HashMap<Uuid, u64>,
    _dimension: PhantomData<V>,
}

impl<V: DimensionValue> Default for FacetTally<V> {
    fn default() -> Self {
        FacetTally::new()
    }
}

impl<V: DimensionValue> FacetTally<V> {
    pub fn new() -> Self {
        FacetTally {
            counts: HashMap::with_capacity(V::all().len()),
            _dimension: PhantomData,
        }
    }

    #[inline]
    pub fn record(&mut self, value: &V) {
        self.add(value, 1);
    }

    #[inline]
    pub fn add(&mut self, value: &V, n: u64) {
        *self.counts.entry(value.id()).or_insert(0) += n;
    }

    pub fn get(&self, value: &V) -> u64 {
        self.counts.get(&value.id()).copied().unwrap_or(0)
    }

    pub fn into_counts(self) -> Vec<FacetCount<V>> {
        V::all()
            .iter()
            .map(|value| FacetCount {
                value: *value,
                count: self.get(value),
            })
            .collect()
    }
}
