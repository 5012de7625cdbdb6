use std::collections::HashSet;
use std::sync::Arc;

use chatcart_catalog::{Catalog, CategoryKeywords};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How strongly a message points at an item
///
/// Ordered so that `Exact > Category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// A category keyword mapped onto the item's id prefix
    Category,
    /// The item's id or display name appears literally
    Exact,
}

impl MatchKind {
    /// Numeric priority used by the recommendation feed (2 = exact, 1 = category)
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Category => 1,
            Self::Exact => 2,
        }
    }
}

/// One (item, kind) hit produced for a single message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub item_id: String,
    pub kind: MatchKind,
}

#[derive(Debug)]
struct ItemNeedles {
    id: String,
    name: String,
}

#[derive(Debug)]
struct KeywordPattern {
    keyword: String,
    pattern: Regex,
    /// Catalog positions the keyword expands to
    positions: Vec<usize>,
}

/// Literal catalog matcher; built once per session
///
/// Exact matches are plain case-insensitive containment of the id or display
/// name. Category keywords must start at a word boundary, so "cap" fires on
/// "caps" but not on "escape", and are not looked up inside exact names.
#[derive(Debug)]
pub struct CatalogMatcher {
    catalog: Arc<Catalog>,
    needles: Vec<ItemNeedles>,
    keywords: Vec<KeywordPattern>,
}

impl CatalogMatcher {
    pub fn new(catalog: Arc<Catalog>, keywords: &CategoryKeywords) -> Result<Self> {
        let needles = catalog
            .iter()
            .map(|item| ItemNeedles {
                id: item.id.to_lowercase(),
                name: item.display_name.to_lowercase(),
            })
            .collect();

        let mut patterns = Vec::with_capacity(keywords.len());
        for rule in keywords.rules() {
            let pattern = RegexBuilder::new(&format!(r"\b{}", regex::escape(&rule.keyword)))
                .case_insensitive(true)
                .build()?;
            let positions: Vec<usize> = catalog
                .iter()
                .enumerate()
                .filter(|(_, item)| {
                    rule.prefixes
                        .iter()
                        .any(|prefix| item.id.starts_with(prefix.as_str()))
                })
                .map(|(idx, _)| idx)
                .collect();
            if positions.is_empty() {
                log::debug!("Keyword {:?} expands to no catalog items", rule.keyword);
            }
            patterns.push(KeywordPattern {
                keyword: rule.keyword.clone(),
                pattern,
                positions,
            });
        }

        Ok(Self {
            catalog,
            needles,
            keywords: patterns,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Match one message's text against the catalog
    ///
    /// Candidates come back in catalog order; an item may appear twice (once
    /// per kind) and many items may match the same message.
    #[must_use]
    pub fn match_text(&self, text: &str) -> Vec<MatchCandidate> {
        let lowered = text.to_lowercase();

        // Keywords are only looked up outside exact names: "Grey Pullover Hoodie"
        // is one product, not a mention of every hoodie.
        let mut exact_hits: Vec<usize> = Vec::new();
        let mut masked = lowered.clone();
        for (idx, needles) in self.needles.iter().enumerate() {
            let by_id = lowered.contains(&needles.id);
            let by_name = lowered.contains(&needles.name);
            if by_id || by_name {
                exact_hits.push(idx);
            }
            if by_name {
                masked = masked.replace(&needles.name, " ");
            }
            if by_id {
                masked = masked.replace(&needles.id, " ");
            }
        }

        let mut category_hits: HashSet<usize> = HashSet::new();
        for keyword in &self.keywords {
            if keyword.pattern.is_match(&masked) {
                log::trace!("Keyword {:?} matched", keyword.keyword);
                category_hits.extend(keyword.positions.iter().copied());
            }
        }

        let mut candidates = Vec::with_capacity(exact_hits.len() + category_hits.len());
        for (idx, item) in self.catalog.iter().enumerate() {
            if exact_hits.contains(&idx) {
                candidates.push(MatchCandidate {
                    item_id: item.id.clone(),
                    kind: MatchKind::Exact,
                });
            }
            if category_hits.contains(&idx) {
                candidates.push(MatchCandidate {
                    item_id: item.id.clone(),
                    kind: MatchKind::Category,
                });
            }
        }
        candidates
    }
}
