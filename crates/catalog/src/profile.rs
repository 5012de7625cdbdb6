use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::error::{CatalogError, Result};
use crate::keywords::{CategoryKeywords, KeywordRule};
use crate::money::{Currency, Money};
use crate::types::{CatalogItem, Category};

const BUILTIN_ZUDIO: &str = include_str!("../profiles/zudio.toml");

/// A store: its catalog plus the keyword table used for category matches
#[derive(Debug, Clone)]
pub struct StoreProfile {
    pub name: String,
    pub catalog: Catalog,
    pub keywords: CategoryKeywords,
}

#[derive(Debug, Deserialize)]
struct RawProfile {
    store: RawStore,
    #[serde(default)]
    products: Vec<RawProduct>,
    #[serde(default)]
    keywords: Vec<KeywordRule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStore {
    name: String,
    currency: Currency,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProduct {
    id: String,
    name: String,
    price: Decimal,
    image: String,
    category: Category,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    in_stock: Option<bool>,
}

impl RawProduct {
    fn into_item(self, currency: Currency) -> CatalogItem {
        CatalogItem {
            id: self.id,
            display_name: self.name,
            unit_price: Money::new(self.price, currency),
            image_ref: self.image,
            category: self.category,
            description: self.description,
            color: self.color,
            size: self.size,
            in_stock: self.in_stock.unwrap_or(true),
        }
    }
}

impl StoreProfile {
    /// Parse a profile document. Tables other than `store`, `products` and
    /// `keywords` are ignored so the same file can carry other sections.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let raw: RawProfile = toml::from_str(raw)?;
        let currency = raw.store.currency;
        let items = raw
            .products
            .into_iter()
            .map(|product| product.into_item(currency))
            .collect();
        let catalog = Catalog::new(currency, items)?;
        let keywords = CategoryKeywords::new(raw.keywords)?;
        if keywords.is_empty() {
            log::debug!("Store profile {:?} has no category keywords", raw.store.name);
        }
        Ok(Self {
            name: raw.store.name,
            catalog,
            keywords,
        })
    }

    /// Load a profile from disk
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Raw text of the built-in profile
    #[must_use]
    pub const fn builtin_source() -> &'static str {
        BUILTIN_ZUDIO
    }

    /// The built-in 36-item apparel store
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_ZUDIO)
    }
}
