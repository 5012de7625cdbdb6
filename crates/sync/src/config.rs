use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};

/// Phrases that mark a remote message as a cart snapshot or a cart clear
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CartPhrases {
    /// Any of these makes the message a cart-update candidate
    pub add_triggers: Vec<String>,

    /// Any of these empties the cart, whatever else the message says
    pub clear_triggers: Vec<String>,
}

impl Default for CartPhrases {
    fn default() -> Self {
        Self {
            add_triggers: vec![
                "Added to cart".to_string(),
                "Cart (".to_string(),
                "🛒".to_string(),
            ],
            clear_triggers: vec!["Order Placed".to_string(), "Cart is empty".to_string()],
        }
    }
}

/// Synchronizer settings, read from the `[sync]` table of a store profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// How many leading feed entries may carry the "mentioned" highlight
    pub highlight_limit: usize,

    pub cart: CartPhrases,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            highlight_limit: 3,
            cart: CartPhrases::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ProfileSection {
    #[serde(default)]
    sync: SyncConfig,
}

impl SyncConfig {
    /// Read the `[sync]` table of a profile document; a missing table yields defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let section: ProfileSection = toml::from_str(raw)?;
        section.sync.validate()?;
        Ok(section.sync)
    }

    pub fn validate(&self) -> Result<()> {
        validate_phrases("cart.add_triggers", &self.cart.add_triggers)?;
        validate_phrases("cart.clear_triggers", &self.cart.clear_triggers)?;
        Ok(())
    }
}

fn validate_phrases(field: &str, phrases: &[String]) -> Result<()> {
    if phrases.is_empty() {
        return Err(SyncError::InvalidConfig(format!("{field} must not be empty")));
    }
    if phrases.iter().any(|phrase| phrase.is_empty()) {
        return Err(SyncError::InvalidConfig(format!(
            "{field} contains an empty phrase"
        )));
    }
    Ok(())
}
