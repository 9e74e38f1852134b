use crate::error::{FacetError, Result};
use crate::types::{Color, DimensionValue, Shirt, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Immutable snapshot of catalog items.
///
/// Cloning is cheap: every clone shares the same item storage, and items
/// handed out in search results stay valid after the catalog is dropped.
#[derive(Debug, Clone)]
pub struct Catalog {
    shirts: Arc<[Arc<Shirt>]>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate item ids.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::DuplicateItem`] naming the first repeated id.
    pub fn new(shirts: Vec<Shirt>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(shirts.len());
        for shirt in &shirts {
            if !seen.insert(shirt.id) {
                return Err(FacetError::DuplicateItem(shirt.id.to_string()));
            }
        }
        Ok(Self::from_unique(shirts))
    }

    pub fn empty() -> Self {
        Self::from_unique(Vec::new())
    }

    fn from_unique(shirts: Vec<Shirt>) -> Self {
        Catalog {
            shirts: shirts.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse a catalog from a JSON array of items.
    ///
    /// Each item is an object with `name`, `color` and `size` (names matched
    /// case-insensitively against the registries) and an optional `id`. Items
    /// without an id get a fresh random one.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let items = json
            .as_array()
            .ok_or_else(|| FacetError::InvalidItem("Expected JSON array of items".to_string()))?;

        let mut shirts = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            shirts.push(shirt_from_json(position, item)?);
        }
        Self::new(shirts)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let json: serde_json::Value = serde_json::from_str(&content)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            items = catalog.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Deterministic random catalog: uniform colors and sizes, names of the
    /// form `"{index} - {color} - {size}"`.
    pub fn random(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let shirts = (0..count)
            .map(|i| {
                let color = Color::ALL[rng.gen_range(0..Color::ALL.len())];
                let size = Size::ALL[rng.gen_range(0..Size::ALL.len())];
                let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
                Shirt::new(id, format!("{} - {} - {}", i, color, size), color, size)
            })
            .collect();
        Self::from_unique(shirts)
    }

    pub fn len(&self) -> usize {
        self.shirts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shirts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Shirt>> {
        self.shirts.iter()
    }

    pub fn shirts(&self) -> &[Arc<Shirt>] {
        &self.shirts
    }

    pub fn get(&self, position: usize) -> Option<&Arc<Shirt>> {
        self.shirts.get(position)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.shirts
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "id": s.id,
                        "name": s.name,
                        "color": s.color.name(),
                        "size": s.size.name(),
                    })
                })
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Arc<Shirt>;
    type IntoIter = std::slice::Iter<'a, Arc<Shirt>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn shirt_from_json(position: usize, item: &serde_json::Value) -> Result<Shirt> {
    let obj = item.as_object().ok_or_else(|| {
        FacetError::InvalidItem(format!("item {} is not a JSON object", position))
    })?;

    let id = match obj.get("id") {
        None | Some(serde_json::Value::Null) => Uuid::new_v4(),
        Some(v) => v
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| FacetError::InvalidItem(format!("item {} has an invalid id", position)))?,
    };

    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| FacetError::InvalidItem(format!("item {} is missing a name", position)))?;

    let color = dimension_value::<Color>(position, obj.get("color"))?;
    let size = dimension_value::<Size>(position, obj.get("size"))?;

    Ok(Shirt::new(id, name, color, size))
}

fn dimension_value<V: DimensionValue>(
    position: usize,
    raw: Option<&serde_json::Value>,
) -> Result<V> {
    let name = raw.and_then(|v| v.as_str()).ok_or_else(|| {
        FacetError::InvalidItem(format!("item {} is missing a {}", position, V::DIMENSION))
    })?;
    V::from_name(name).ok_or_else(|| FacetError::UnknownValue {
        dimension: V::DIMENSION.to_string(),
        value: name.to_string(),
    })
}
