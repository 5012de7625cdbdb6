use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::money::Money;

/// Product category shown next to each recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "T-Shirt")]
    TShirt,
    Hoodie,
    Jeans,
    Shoes,
    Accessories,
    Winter,
}

impl Category {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TShirt => "T-Shirt",
            Self::Hoodie => "Hoodie",
            Self::Jeans => "Jeans",
            Self::Shoes => "Shoes",
            Self::Accessories => "Accessories",
            Self::Winter => "Winter",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    /// Accepts display labels and the backend slugs ("tshirt", "hoodie", ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "tshirt" | "tshirts" => Ok(Self::TShirt),
            "hoodie" | "hoodies" => Ok(Self::Hoodie),
            "jeans" => Ok(Self::Jeans),
            "shoes" => Ok(Self::Shoes),
            "accessories" | "accessory" => Ok(Self::Accessories),
            "winter" => Ok(Self::Winter),
            _ => Err(CatalogError::UnknownCategory(s.to_string())),
        }
    }
}

/// One immutable catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable unique key (e.g. "hoodie-001")
    pub id: String,

    /// Name the agent uses when it mentions the product
    pub display_name: String,

    pub unit_price: Money,

    /// Image reference for the rendering layer
    pub image_ref: String,

    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

const fn default_in_stock() -> bool {
    true
}

impl CatalogItem {
    /// Create an in-stock item without descriptive fields
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        unit_price: Money,
        image_ref: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            unit_price,
            image_ref: image_ref.into(),
            category,
            description: None,
            color: None,
            size: None,
            in_stock: true,
        }
    }

    /// Builder: set color
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::invalid_product(&self.id, "id must not be empty"));
        }
        if self.display_name.trim().is_empty() {
            return Err(CatalogError::invalid_product(
                &self.id,
                "display name must not be empty",
            ));
        }
        if self.unit_price.is_negative() {
            return Err(CatalogError::invalid_product(
                &self.id,
                format!("negative price {}", self.unit_price.amount),
            ));
        }
        Ok(())
    }
}
