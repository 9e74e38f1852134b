use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// Catalog name, a plain string like `"summer-range"`.
pub type CatalogName = String;

/// One value of a closed, enumerable facet dimension.
///
/// Values compare and hash by [`DimensionValue::id`] only. Two values that
/// happen to share a display name are still distinct.
pub trait DimensionValue: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Dimension name used in errors and logs (e.g. `"color"`).
    const DIMENSION: &'static str;

    fn id(&self) -> Uuid;

    fn name(&self) -> &'static str;

    /// Every valid value of the dimension, in stable registry order.
    fn all() -> &'static [Self];

    /// Case-insensitive lookup by display name.
    fn from_name(name: &str) -> Option<Self>;

    /// Position of this value in [`DimensionValue::all`].
    fn ordinal(&self) -> Option<usize> {
        let id = self.id();
        Self::all().iter().position(|v| v.id() == id)
    }
}

fn name_index<V: DimensionValue>() -> HashMap<String, V> {
    V::all()
        .iter()
        .map(|v| (v.name().to_ascii_lowercase(), *v))
        .collect()
}

fn serialize_by_name<V: DimensionValue, S: Serializer>(
    value: &V,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(value.name())
}

fn deserialize_by_name<'de, V: DimensionValue, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<V, D::Error> {
    let name = String::deserialize(deserializer)?;
    V::from_name(&name).ok_or_else(|| {
        serde::de::Error::custom(format!("unknown {} value: {}", V::DIMENSION, name))
    })
}

#[derive(Clone, Copy)]
pub struct Color {
    id: Uuid,
    name: &'static str,
}

impl Color {
    pub const RED: Color = Color::new(0x5e0c_b1a6_3b2f_4d0e_9f3a_7c41_0000_0001, "Red");
    pub const BLUE: Color = Color::new(0x5e0c_b1a6_3b2f_4d0e_9f3a_7c41_0000_0002, "Blue");
    pub const YELLOW: Color = Color::new(0x5e0c_b1a6_3b2f_4d0e_9f3a_7c41_0000_0003, "Yellow");
    pub const WHITE: Color = Color::new(0x5e0c_b1a6_3b2f_4d0e_9f3a_7c41_0000_0004, "White");
    pub const BLACK: Color = Color::new(0x5e0c_b1a6_3b2f_4d0e_9f3a_7c41_0000_0005, "Black");

    pub const ALL: [Color; 5] = [
        Color::RED,
        Color::BLUE,
        Color::YELLOW,
        Color::WHITE,
        Color::BLACK,
    ];

    const fn new(id: u128, name: &'static str) -> Self {
        Color {
            id: Uuid::from_u128(id),
            name,
        }
    }
}

static COLORS_BY_NAME: Lazy<HashMap<String, Color>> = Lazy::new(name_index::<Color>);

impl DimensionValue for Color {
    const DIMENSION: &'static str = "color";

    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn all() -> &'static [Self] {
        &Color::ALL
    }

    fn from_name(name: &str) -> Option<Self> {
        COLORS_BY_NAME.get(&name.trim().to_ascii_lowercase()).copied()
    }
}

#[derive(Clone, Copy)]
pub struct Size {
    id: Uuid,
    name: &'static str,
}

impl Size {
    pub const SMALL: Size = Size::new(0x7a41_02c9_e5d8_4b6f_a1c2_93e0_0000_0001, "Small");
    pub const MEDIUM: Size = Size::new(0x7a41_02c9_e5d8_4b6f_a1c2_93e0_0000_0002, "Medium");
    pub const LARGE: Size = Size::new(0x7a41_02c9_e5d8_4b6f_a1c2_93e0_0000_0003, "Large");

    pub const ALL: [Size; 3] = [Size::SMALL, Size::MEDIUM, Size::LARGE];

    const fn new(id: u128, name: &'static str) -> Self {
        Size {
            id: Uuid::from_u128(id),
            name,
        }
    }
}

static SIZES_BY_NAME: Lazy<HashMap<String, Size>> = Lazy::new(name_index::<Size>);

impl DimensionValue for Size {
    const DIMENSION: &'static str = "size";

    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn all() -> &'static [Self] {
        &Size::ALL
    }

    fn from_name(name: &str) -> Option<Self> {
        SIZES_BY_NAME.get(&name.trim().to_ascii_lowercase()).copied()
    }
}

// Identity, display and serde impls shared by both dimensions.
macro_rules! dimension_value_impls {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serialize_by_name(self, serializer)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                deserialize_by_name(deserializer)
            }
        }
    };
}

dimension_value_impls!(Color);
dimension_value_impls!(Size);

/// A catalog item. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shirt {
    pub id: Uuid,
    pub name: String,
    pub color: Color,
    pub size: Size,
}

impl Shirt {
    pub fn new(id: Uuid, name: impl Into<String>, color: Color, size: Size) -> Self {
        Shirt {
            id,
            name: name.into(),
            color,
            size,
        }
    }
}

/// Per-dimension value sets for a search.
///
/// An empty set means "no restriction on this dimension" and matches every
/// value; it never means "match nothing". `None` means the set was not
/// supplied at all, which [`SearchEngine::search`](crate::SearchEngine::search)
/// rejects with [`FacetError::InvalidArgument`](crate::FacetError::InvalidArgument).
///
/// [`SearchOptions::default`] is the unrestricted filter (both sets present and
/// empty). When deserializing, a missing or `null` key is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub colors: Option<Vec<Color>>,
    #[serde(default)]
    pub sizes: Option<Vec<Size>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions::unrestricted()
    }
}

impl SearchOptions {
    pub fn new(colors: Vec<Color>, sizes: Vec<Size>) -> Self {
        SearchOptions {
            colors: Some(colors),
            sizes: Some(sizes),
        }
    }

    pub fn unrestricted() -> Self {
        SearchOptions::new(Vec::new(), Vec::new())
    }

    /// Every registry value selected on both dimensions.
    pub fn everything() -> Self {
        SearchOptions::new(Color::ALL.to_vec(), Size::ALL.to_vec())
    }

    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors = Some(colors.into_iter().collect());
        self
    }

    pub fn with_sizes(mut self, sizes: impl IntoIterator<Item = Size>) -> Self {
        self.sizes = Some(sizes.into_iter().collect());
        self
    }
}

/// A single dimension value and its item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacetCount<V: DimensionValue> {
    pub value: V,
    pub count: u64,
}

pub type ColorCount = FacetCount<Color>;
pub type SizeCount = FacetCount<Size>;

/// Results returned by [`SearchEngine::search`](crate::SearchEngine::search).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    /// Matching shirts in catalog order.
    pub shirts: Vec<Arc<Shirt>>,
    /// One entry per [`Color::ALL`] value, in registry order.
    pub color_counts: Vec<ColorCount>,
    /// One entry per [`Size::ALL`] value, in registry order.
    pub size_counts: Vec<SizeCount>,
}

impl SearchResults {
    pub fn color_count(&self, color: Color) -> Option<u64> {
        find_count(&self.color_counts, color)
    }

    pub fn size_count(&self, size: Size) -> Option<u64> {
        find_count(&self.size_counts, size)
    }
}

fn find_count<V: DimensionValue>(counts: &[FacetCount<V>], value: V) -> Option<u64> {
    counts.iter().find(|c| c.value == value).map(|c| c.count)
}
