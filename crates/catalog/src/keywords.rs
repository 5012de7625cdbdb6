use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// One category keyword and the id prefixes it stands for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordRule {
    pub keyword: String,
    pub prefixes: Vec<String>,
}

/// Fixed keyword → id-prefix table used for category matches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryKeywords {
    rules: Vec<KeywordRule>,
}

impl CategoryKeywords {
    /// Validate and normalize rules; keywords are stored lower-case
    pub fn new(rules: Vec<KeywordRule>) -> Result<Self> {
        let mut normalized: Vec<KeywordRule> = Vec::with_capacity(rules.len());
        for rule in rules {
            let keyword = rule.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(CatalogError::invalid_keyword(&rule.keyword, "keyword is empty"));
            }
            let prefixes: Vec<String> = rule
                .prefixes
                .iter()
                .map(|prefix| prefix.trim().to_string())
                .filter(|prefix| !prefix.is_empty())
                .collect();
            if prefixes.is_empty() {
                return Err(CatalogError::invalid_keyword(&keyword, "no id prefixes"));
            }
            match normalized.iter_mut().find(|existing| existing.keyword == keyword) {
                Some(existing) => {
                    for prefix in prefixes {
                        if !existing.prefixes.contains(&prefix) {
                            existing.prefixes.push(prefix);
                        }
                    }
                }
                None => normalized.push(KeywordRule { keyword, prefixes }),
            }
        }
        Ok(Self { rules: normalized })
    }

    #[must_use]
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rule(keyword: &str, prefixes: &[&str]) -> KeywordRule {
        KeywordRule {
            keyword: keyword.to_string(),
            prefixes: prefixes.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    #[test]
    fn lowercases_and_merges_repeated_keywords() {
        let keywords = CategoryKeywords::new(vec![
            rule("Sweater", &["sweater"]),
            rule("sweater", &["jacket", "sweater"]),
        ])
        .unwrap();
        assert_eq!(keywords.rules(), &[rule("sweater", &["sweater", "jacket"])]);
    }

    #[test]
    fn rejects_empty_keyword_or_prefixes() {
        assert!(CategoryKeywords::new(vec![rule("  ", &["acc"])]).is_err());
        assert!(CategoryKeywords::new(vec![rule("belt", &[" "])]).is_err());
    }
}
