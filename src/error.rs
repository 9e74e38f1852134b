use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FacetError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Catalog not found: {0}")]
    CatalogNotFound(String),

    #[error("Duplicate item id in catalog: {0}")]
    DuplicateItem(String),

    #[error("Unknown {dimension} value: {value}")]
    UnknownValue { dimension: String, value: String },

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FacetError>;

impl From<std::io::Error> for FacetError {
    fn from(e: std::io::Error) -> Self {
        FacetError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for FacetError {
    fn from(e: serde_json::Error) -> Self {
        FacetError::Json(e.to_string())
    }
}

impl FacetError {
    /// True for errors caused by the caller's input rather than the environment.
    pub fn is_caller_error(&self) -> bool {
        match self {
            FacetError::InvalidArgument(_)
            | FacetError::CatalogNotFound(_)
            | FacetError::DuplicateItem(_)
            | FacetError::UnknownValue { .. }
            | FacetError::InvalidItem(_)
            | FacetError::Json(_) => true,
            FacetError::Io(_) | FacetError::Config(_) => false,
        }
    }
}
