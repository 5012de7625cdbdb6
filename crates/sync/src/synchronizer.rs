use std::sync::Arc;

use chatcart_catalog::{Catalog, CategoryKeywords, StoreProfile};

use crate::cart::{CartParser, CartState};
use crate::config::SyncConfig;
use crate::error::Result;
use crate::matcher::CatalogMatcher;
use crate::message::{ChatLog, ChatMessage, Sender};
use crate::recommend::{highlighted, RecommendationEntry, RecommendationState};

/// Downstream subscriber for published state
///
/// Called synchronously, inside the pass that produced the value.
pub trait SyncObserver {
    fn recommendations_changed(&mut self, _ranked: &[RecommendationEntry]) {}

    fn cart_changed(&mut self, _cart: &CartState) {}
}

/// What one message-arrival pass published
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// New feed, present only when the ordered id sequence changed
    pub recommendations: Option<Vec<RecommendationEntry>>,

    /// New cart, present on every committed snapshot or clear
    pub cart: Option<CartState>,
}

impl SyncOutcome {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.recommendations.is_none() && self.cart.is_none()
    }
}

/// Session-scoped read-only context shared by every derivation call
#[derive(Debug)]
pub struct SessionContext {
    catalog: Arc<Catalog>,
    matcher: CatalogMatcher,
    cart_parser: CartParser,
    config: SyncConfig,
}

impl SessionContext {
    pub fn new(
        catalog: Arc<Catalog>,
        keywords: &CategoryKeywords,
        config: SyncConfig,
    ) -> Result<Self> {
        config.validate()?;
        let matcher = CatalogMatcher::new(Arc::clone(&catalog), keywords)?;
        let cart_parser = CartParser::new(Arc::clone(&catalog), config.cart.clone())?;
        Ok(Self {
            catalog,
            matcher,
            cart_parser,
            config,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub const fn matcher(&self) -> &CatalogMatcher {
        &self.matcher
    }

    #[must_use]
    pub const fn cart_parser(&self) -> &CartParser {
        &self.cart_parser
    }

    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }
}

/// Event-driven driver turning the chat log into published shopping state
///
/// Each call runs one pass to completion: the recommendation map folds in the
/// new message, the cart parser looks at that message alone, and only changed
/// state is published.
pub struct Synchronizer {
    context: SessionContext,
    log: ChatLog,
    recommendations: RecommendationState,
    published: Vec<RecommendationEntry>,
    cart: CartState,
    observers: Vec<Box<dyn SyncObserver>>,
}

impl Synchronizer {
    #[must_use]
    pub fn new(context: SessionContext) -> Self {
        let cart = context.cart_parser.empty_cart();
        Self {
            context,
            log: ChatLog::new(),
            recommendations: RecommendationState::new(),
            published: Vec::new(),
            cart,
            observers: Vec::new(),
        }
    }

    /// Build a session for a store profile
    pub fn from_profile(profile: &StoreProfile, config: SyncConfig) -> Result<Self> {
        let context = SessionContext::new(
            Arc::new(profile.catalog.clone()),
            &profile.keywords,
            config,
        )?;
        Ok(Self::new(context))
    }

    pub fn subscribe(&mut self, observer: Box<dyn SyncObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub const fn context(&self) -> &SessionContext {
        &self.context
    }

    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        self.log.messages()
    }

    /// Last published recommendation feed
    #[must_use]
    pub fn recommendations(&self) -> &[RecommendationEntry] {
        &self.published
    }

    /// Published feed entries carrying the "mentioned" highlight
    pub fn highlighted(&self) -> impl Iterator<Item = &RecommendationEntry> {
        highlighted(&self.published, self.context.config.highlight_limit)
    }

    #[must_use]
    pub const fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Append a new message to the log and process it
    pub fn on_message(&mut self, sender: Sender, text: impl Into<String>) -> SyncOutcome {
        self.log.push(sender, text);
        self.process_latest()
    }

    /// Append a message carrying its own sequence index and process it
    pub fn ingest(&mut self, message: ChatMessage) -> Result<SyncOutcome> {
        self.log.append(message)?;
        Ok(self.process_latest())
    }

    /// End the session: all derived state and the log are discarded
    pub fn reset(&mut self) {
        log::debug!("Session reset after {} messages", self.log.len());
        self.log.clear();
        self.recommendations = RecommendationState::new();
        self.published.clear();
        self.cart = self.context.cart_parser.empty_cart();
    }

    fn process_latest(&mut self) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        self.recommendations
            .fold(self.log.messages(), &self.context.matcher);
        let ranked = self.recommendations.ranked();
        if !same_ids(&ranked, &self.published) {
            log::debug!(
                "Recommendations changed: {} -> {} entries",
                self.published.len(),
                ranked.len()
            );
            for observer in &mut self.observers {
                observer.recommendations_changed(&ranked);
            }
            self.published = ranked.clone();
            outcome.recommendations = Some(ranked);
        }

        let committed = self
            .log
            .last()
            .and_then(|message| self.context.cart_parser.committed(message));
        if let Some(cart) = committed {
            for observer in &mut self.observers {
                observer.cart_changed(&cart);
            }
            self.cart = cart.clone();
            outcome.cart = Some(cart);
        }

        outcome
    }
}

fn same_ids(a: &[RecommendationEntry], b: &[RecommendationEntry]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(left, right)| left.item_id == right.item_id)
}
