//! # Chatcart Sync
//!
//! Derives shopping state from a running chat between a shopper and a remote
//! sales agent.
//!
//! ## Pipeline
//!
//! Every remote message is:
//!
//! 1. **Matched** against the catalog ([`CatalogMatcher`]): literal id/name
//!    mentions become exact candidates, category keywords expand to every item
//!    under the mapped id prefix.
//! 2. **Folded** into the recommendation map ([`RecommendationState`]): one
//!    entry per item, exact beats category, recency is the message index.
//! 3. **Scraped** for a cart snapshot ([`CartParser`]): trigger phrases, an
//!    optional `(N items, ₹X` summary and `• Name xQ = ₹Amount` lines.
//!
//! [`Synchronizer`] runs the three per message and publishes only what changed.
//!
//! ## Example
//!
//! ```rust
//! use chatcart_catalog::StoreProfile;
//! use chatcart_sync::{Sender, SyncConfig, Synchronizer};
//!
//! let profile = StoreProfile::builtin().unwrap();
//! let mut sync = Synchronizer::from_profile(&profile, SyncConfig::default()).unwrap();
//!
//! let outcome = sync.on_message(Sender::Remote, "I recommend the Black Oversized Hoodie!");
//! let feed = outcome.recommendations.unwrap();
//! assert_eq!(feed[0].item_id, "hoodie-001");
//! ```

mod cart;
mod config;
mod error;
mod matcher;
mod message;
mod recommend;
mod synchronizer;

pub use cart::{CartLineItem, CartParser, CartState, CartUpdate, ParseFailure};
pub use config::{CartPhrases, SyncConfig};
pub use error::{Result, SyncError};
pub use matcher::{CatalogMatcher, MatchCandidate, MatchKind};
pub use message::{ChatLog, ChatMessage, Sender};
pub use recommend::{feed_order, highlighted, reconcile, RecommendationEntry, RecommendationState};
pub use synchronizer::{SessionContext, SyncObserver, SyncOutcome, Synchronizer};
