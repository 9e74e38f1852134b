use crate::error::{FacetError, Result};
use crate::types::{Color, DimensionValue, SearchOptions, Shirt, Size};
use std::collections::HashSet;
use std::marker::PhantomData;
use uuid::Uuid;

/// Membership set for one dimension of a search.
///
/// An empty set accepts every value.
#[derive(Debug, Clone)]
pub struct DimensionFilter<V: DimensionValue> {
    accepted: HashSet<Uuid>,
    _dimension: PhantomData<V>,
}

impl<V: DimensionValue> DimensionFilter<V> {
    pub fn new(values: &[V]) -> Self {
        DimensionFilter {
            accepted: values.iter().map(|v| v.id()).collect(),
            _dimension: PhantomData,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.accepted.is_empty()
    }

    #[inline]
    pub fn accepts(&self, value: &V) -> bool {
        self.accepted.is_empty() || self.accepted.contains(&value.id())
    }

    /// Registry values this filter accepts, in registry order.
    pub fn accepted_values(&self) -> impl Iterator<Item = V> + '_ {
        V::all().iter().copied().filter(|v| self.accepts(v))
    }
}

/// Both dimension filters of a validated [`SearchOptions`].
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    pub colors: DimensionFilter<Color>,
    pub sizes: DimensionFilter<Size>,
}

impl CompiledFilter {
    /// Validate and compile search options.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::InvalidArgument`] if either value collection is
    /// absent.
    pub fn compile(options: &SearchOptions) -> Result<Self> {
        match (&options.colors, &options.sizes) {
            (Some(colors), Some(sizes)) => Ok(CompiledFilter {
                colors: DimensionFilter::new(colors),
                sizes: DimensionFilter::new(sizes),
            }),
            (None, None) => Err(FacetError::InvalidArgument(
                "search options must provide both colors and sizes".to_string(),
            )),
            (None, Some(_)) => Err(missing::<Color>()),
            (Some(_), None) => Err(missing::<Size>()),
        }
    }

    #[inline]
    pub fn matches(&self, shirt: &Shirt) -> bool {
        self.colors.accepts(&shirt.color) && self.sizes.accepts(&shirt.size)
    }
}

fn missing<V: DimensionValue>() -> FacetError {
    FacetError::InvalidArgument(format!(
        "search options must provide a {} collection (use an empty one for no restriction)",
        V::DIMENSION
    ))
}
