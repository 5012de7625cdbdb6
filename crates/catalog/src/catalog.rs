use std::collections::HashMap;

use crate::error::{CatalogError, Result};
use crate::filter::ProductFilter;
use crate::money::Currency;
use crate::types::CatalogItem;

/// Immutable product lookup, loaded once per process
///
/// Declaration order is preserved: iteration, prefix scans and filters all
/// yield items in the order the profile listed them.
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: Currency,
    items: Vec<CatalogItem>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicates and items priced in another currency
    pub fn new(currency: Currency, items: Vec<CatalogItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_name = HashMap::with_capacity(items.len());

        for (idx, item) in items.iter().enumerate() {
            item.validate()?;
            if item.unit_price.currency != currency {
                return Err(CatalogError::CurrencyMismatch {
                    id: item.id.clone(),
                    expected: currency.to_string(),
                    found: item.unit_price.currency.to_string(),
                });
            }
            if by_id.insert(item.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
            if by_name.insert(item.display_name.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateName(item.display_name.clone()));
            }
        }

        log::debug!("Catalog loaded: {} items ({currency})", items.len());

        Ok(Self {
            currency,
            items,
            by_id,
            by_name,
        })
    }

    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    /// Resolve a display name exactly as written (case-sensitive)
    #[must_use]
    pub fn find_by_name(&self, display_name: &str) -> Option<&CatalogItem> {
        self.by_name.get(display_name).map(|&idx| &self.items[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Items whose id starts with `prefix`
    pub fn items_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a CatalogItem> {
        self.items
            .iter()
            .filter(move |item| item.id.starts_with(prefix))
    }

    /// Items satisfying every constraint set on `filter`
    #[must_use]
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&CatalogItem> {
        self.items.iter().filter(|item| filter.matches(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Category;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn inr(amount: i64) -> Money {
        Money::new(Decimal::from(amount), Currency::Inr)
    }

    fn hoodies() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(
                "hoodie-001",
                "Black Oversized Hoodie",
                inr(1899),
                "/products/hoodie-black.png",
                Category::Hoodie,
            ),
            CatalogItem::new(
                "hoodie-002",
                "Grey Pullover Hoodie",
                inr(1799),
                "/products/hoodie-grey.jpg",
                Category::Hoodie,
            ),
            CatalogItem::new("acc-003", "Black Cap", inr(399), "/products/cap.jpg", Category::Accessories),
        ]
    }

    #[test]
    fn lookups_by_id_and_name() {
        let catalog = Catalog::new(Currency::Inr, hoodies()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("hoodie-002").unwrap().display_name, "Grey Pullover Hoodie");
        assert_eq!(catalog.find_by_name("Black Cap").unwrap().id, "acc-003");
        assert!(catalog.find_by_name("black cap").is_none());
    }

    #[test]
    fn prefix_scan_keeps_declaration_order() {
        let catalog = Catalog::new(Currency::Inr, hoodies()).unwrap();
        let ids: Vec<&str> = catalog
            .items_with_prefix("hoodie")
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["hoodie-001", "hoodie-002"]);
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        let mut items = hoodies();
        items.push(items[0].clone());
        assert!(matches!(
            Catalog::new(Currency::Inr, items),
            Err(CatalogError::DuplicateId(id)) if id == "hoodie-001"
        ));

        let mut items = hoodies();
        items[1].display_name = items[0].display_name.clone();
        assert!(matches!(
            Catalog::new(Currency::Inr, items),
            Err(CatalogError::DuplicateName(_))
        ));

        assert!(matches!(Catalog::new(Currency::Inr, Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn rejects_foreign_currency_and_negative_price() {
        let mut items = hoodies();
        items[0].unit_price = Money::new(Decimal::from(20), Currency::Usd);
        assert!(matches!(
            Catalog::new(Currency::Inr, items),
            Err(CatalogError::CurrencyMismatch { .. })
        ));

        let mut items = hoodies();
        items[2].unit_price = inr(-1);
        assert!(matches!(
            Catalog::new(Currency::Inr, items),
            Err(CatalogError::InvalidProduct { .. })
        ));
    }
}
