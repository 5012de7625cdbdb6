//! # Chatcart Catalog
//!
//! The static product lookup every derivation pass reads from.
//!
//! ## Contents
//!
//! - **Catalog** - immutable, declaration-ordered product records keyed by id
//!   and resolvable by exact display name
//! - **Category keywords** - the keyword → id-prefix table behind category matches
//! - **Store profiles** - TOML documents bundling both, with a built-in 36-item store
//! - **Product filter** - category / price / color browsing over the catalog
//!
//! ## Example
//!
//! ```rust
//! use chatcart_catalog::StoreProfile;
//!
//! let profile = StoreProfile::builtin().unwrap();
//! let hoodie = profile.catalog.find_by_name("Black Oversized Hoodie").unwrap();
//! assert_eq!(hoodie.id, "hoodie-001");
//! ```

mod catalog;
mod error;
mod filter;
mod keywords;
mod money;
mod profile;
mod types;

pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use filter::ProductFilter;
pub use keywords::{CategoryKeywords, KeywordRule};
pub use money::{Currency, Money};
pub use profile::StoreProfile;
pub use types::{CatalogItem, Category};

pub use rust_decimal::Decimal;
