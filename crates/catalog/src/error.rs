use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while building a catalog or loading a store profile
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog has no products
    #[error("Catalog is empty")]
    Empty,

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    /// Two products share a display name (names must resolve back to one id)
    #[error("Duplicate display name: {0}")]
    DuplicateName(String),

    /// A product field failed validation
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: String, reason: String },

    /// Product priced in a currency other than the store currency
    #[error("Product {id} is priced in {found}, store currency is {expected}")]
    CurrencyMismatch {
        id: String,
        expected: String,
        found: String,
    },

    /// Unknown category label
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Unknown currency code
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Keyword table entry failed validation
    #[error("Invalid keyword {keyword:?}: {reason}")]
    InvalidKeyword { keyword: String, reason: String },

    /// Profile is not valid TOML or does not fit the schema
    #[error("Invalid store profile: {0}")]
    Profile(#[from] toml::de::Error),

    /// Profile file could not be read
    #[error("Failed to read store profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Create an invalid product error
    pub fn invalid_product(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProduct {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid keyword error
    pub fn invalid_keyword(keyword: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKeyword {
            keyword: keyword.into(),
            reason: reason.into(),
        }
    }
}
