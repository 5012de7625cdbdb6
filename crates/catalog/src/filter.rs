use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CatalogItem, Category};

/// Browse filter over the catalog; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub max_price: Option<Decimal>,
    pub min_price: Option<Decimal>,
    /// Compared case-insensitively
    pub color: Option<String>,
}

impl ProductFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: restrict to one category
    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Builder: inclusive upper price bound
    #[must_use]
    pub const fn max_price(mut self, max: Decimal) -> Self {
        self.max_price = Some(max);
        self
    }

    /// Builder: inclusive lower price bound
    #[must_use]
    pub const fn min_price(mut self, min: Decimal) -> Self {
        self.min_price = Some(min);
        self
    }

    /// Builder: restrict to one color
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if self.category.is_some_and(|category| category != item.category) {
            return false;
        }
        let price = item.unit_price.amount;
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if let Some(wanted) = &self.color {
            let matches_color = item
                .color
                .as_deref()
                .is_some_and(|color| color.eq_ignore_ascii_case(wanted.trim()));
            if !matches_color {
                return false;
            }
        }
        true
    }
}
