use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chatcart_catalog::{CatalogItem, Category, Money};
use serde::{Deserialize, Serialize};

use crate::matcher::{CatalogMatcher, MatchKind};
use crate::message::ChatMessage;

/// One product in the recommendation feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub item_id: String,
    pub display_name: String,
    pub unit_price: Money,
    pub image_ref: String,
    pub category: Category,

    /// Strongest match seen so far; never demoted
    pub kind: MatchKind,

    /// Sequence index of the message that set the entry's recency
    pub mentioned_at: usize,
}

impl RecommendationEntry {
    fn new(item: &CatalogItem, kind: MatchKind, mentioned_at: usize) -> Self {
        Self {
            item_id: item.id.clone(),
            display_name: item.display_name.clone(),
            unit_price: item.unit_price,
            image_ref: item.image_ref.clone(),
            category: item.category,
            kind,
            mentioned_at,
        }
    }

    /// 2 = exact, 1 = category
    #[must_use]
    pub const fn priority(&self) -> u8 {
        self.kind.priority()
    }
}

/// Feed order: priority desc, recency desc, id asc
#[must_use]
pub fn feed_order(a: &RecommendationEntry, b: &RecommendationEntry) -> Ordering {
    b.kind
        .cmp(&a.kind)
        .then_with(|| b.mentioned_at.cmp(&a.mentioned_at))
        .then_with(|| a.item_id.cmp(&b.item_id))
}

/// Entries of a ranked feed that get the "mentioned" highlight
pub fn highlighted(
    ranked: &[RecommendationEntry],
    limit: usize,
) -> impl Iterator<Item = &RecommendationEntry> {
    ranked
        .iter()
        .take(limit)
        .filter(|entry| entry.kind == MatchKind::Exact)
}

/// Derived recommendation map plus how much of the log it reflects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationState {
    entries: HashMap<String, RecommendationEntry>,
    processed: usize,
}

impl RecommendationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of log messages already folded in
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.processed
    }

    #[must_use]
    pub fn get(&self, item_id: &str) -> Option<&RecommendationEntry> {
        self.entries.get(item_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold the not-yet-processed suffix of `history` into the map
    ///
    /// Returns how many messages were folded.
    pub fn fold(&mut self, history: &[ChatMessage], matcher: &CatalogMatcher) -> usize {
        let start = self.processed.min(history.len());
        let suffix = &history[start..];
        for message in suffix {
            self.absorb(message, matcher);
        }
        self.processed = history.len();
        suffix.len()
    }

    /// Entries sorted into feed order
    #[must_use]
    pub fn ranked(&self) -> Vec<RecommendationEntry> {
        let mut ranked: Vec<RecommendationEntry> = self.entries.values().cloned().collect();
        ranked.sort_by(feed_order);
        ranked
    }

    fn absorb(&mut self, message: &ChatMessage, matcher: &CatalogMatcher) {
        if !message.is_remote() {
            return;
        }
        let candidates = matcher.match_text(&message.text);
        if candidates.is_empty() {
            return;
        }
        log::trace!(
            "Message #{} produced {} candidates",
            message.sequence_index,
            candidates.len()
        );
        let catalog = matcher.catalog();
        for candidate in candidates {
            let Some(item) = catalog.get(&candidate.item_id) else {
                continue;
            };
            self.merge(item, candidate.kind, message.sequence_index);
        }
    }

    fn merge(&mut self, item: &CatalogItem, kind: MatchKind, at: usize) {
        match self.entries.entry(item.id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(RecommendationEntry::new(item, kind, at));
            }
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                match (entry.kind, kind) {
                    (MatchKind::Category, MatchKind::Exact) => {
                        entry.kind = MatchKind::Exact;
                        entry.mentioned_at = at;
                    }
                    (MatchKind::Exact, MatchKind::Exact) => {
                        entry.mentioned_at = entry.mentioned_at.max(at);
                    }
                    // A category hit never moves an existing entry.
                    (_, MatchKind::Category) => {}
                }
            }
        }
    }
}

/// One full reconciliation pass over the whole history, starting from `prior`
///
/// Produces the same state as [`RecommendationState::fold`] over the unseen
/// suffix; the merge rules make re-reading already folded messages a no-op.
#[must_use]
pub fn reconcile(
    prior: &RecommendationState,
    history: &[ChatMessage],
    matcher: &CatalogMatcher,
) -> RecommendationState {
    let mut next = prior.clone();
    for message in history {
        next.absorb(message, matcher);
    }
    next.processed = history.len();
    log::debug!(
        "Reconciled {} messages into {} recommendations",
        history.len(),
        next.len()
    );
    next
}
