use std::sync::Arc;

use chatcart_catalog::{Catalog, Currency, Decimal, Money};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CartPhrases;
use crate::error::Result;
use crate::message::ChatMessage;

/// One resolved cart line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub item_id: String,
    pub display_name: String,
    /// Line amount divided by quantity
    pub unit_price: Money,
    pub quantity: u32,
    pub image_ref: String,
    /// Line amount as the agent wrote it
    pub line_total: Money,
}

/// Full cart snapshot; always replaced, never patched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartLineItem>,
    pub total: Money,
    /// Item count from the "(N items, ..." summary, when the message had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_count: Option<usize>,
}

impl CartState {
    #[must_use]
    pub const fn empty(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            total: Money::zero(currency),
            reported_count: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct lines in the cart
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Units across all lines
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of the line amounts; `None` if it does not fit a `Decimal`
    #[must_use]
    pub fn subtotal(&self) -> Option<Money> {
        let amount = self
            .items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total.amount))?;
        Some(Money::new(amount, self.total.currency))
    }

    /// "1 item" / "3 items", counting lines
    #[must_use]
    pub fn item_label(&self) -> String {
        match self.line_count() {
            1 => "1 item".to_string(),
            n => format!("{n} items"),
        }
    }
}

/// Outcome of a successful parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartUpdate {
    /// A full replacement snapshot
    Snapshot(CartState),
    /// The cart must be emptied
    Clear,
}

/// Why a message did not produce a cart update; never surfaced to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("no cart trigger phrase")]
    NoTrigger,

    #[error("cart trigger present but no line resolved ({} unresolved)", .unresolved.len())]
    NoResolvedItems { unresolved: Vec<String> },

    #[error("line amounts overflow the cart total")]
    TotalOverflow,
}

/// Regex-driven cart scraper over remote message text
#[derive(Debug)]
pub struct CartParser {
    catalog: Arc<Catalog>,
    phrases: CartPhrases,
    total_pattern: Regex,
    line_pattern: Regex,
}

impl CartParser {
    pub fn new(catalog: Arc<Catalog>, phrases: CartPhrases) -> Result<Self> {
        let symbol = regex::escape(catalog.currency().symbol());
        let total_pattern = Regex::new(&format!(
            r"\((\d+)\s+items?,\s*{symbol}([\d,]+(?:\.\d+)?)"
        ))?;
        let line_pattern = Regex::new(&format!(
            r"•\s*(.+?)\s+x(\d+)\s*=\s*{symbol}([\d,]+(?:\.\d+)?)"
        ))?;
        Ok(Self {
            catalog,
            phrases,
            total_pattern,
            line_pattern,
        })
    }

    #[must_use]
    pub fn empty_cart(&self) -> CartState {
        CartState::empty(self.catalog.currency())
    }

    /// Parse one message's text into a cart update
    pub fn parse(&self, text: &str) -> std::result::Result<CartUpdate, ParseFailure> {
        if contains_any(text, &self.phrases.clear_triggers) {
            return Ok(CartUpdate::Clear);
        }
        if !contains_any(text, &self.phrases.add_triggers) {
            return Err(ParseFailure::NoTrigger);
        }

        let currency = self.catalog.currency();
        let summary = self.total_pattern.captures(text).and_then(|caps| {
            let count = caps[1].parse::<usize>().ok()?;
            let total = Money::parse_amount(&caps[2], currency)?;
            Some((count, total))
        });

        let mut items = Vec::new();
        let mut unresolved = Vec::new();
        for caps in self.line_pattern.captures_iter(text) {
            let name = caps[1].trim();
            let quantity = match caps[2].parse::<u32>() {
                Ok(quantity) if quantity > 0 => quantity,
                _ => {
                    unresolved.push(name.to_string());
                    continue;
                }
            };
            let Some(line_total) = Money::parse_amount(&caps[3], currency) else {
                unresolved.push(name.to_string());
                continue;
            };
            let Some(item) = self.catalog.find_by_name(name) else {
                log::debug!("Cart line {name:?} does not resolve to a catalog item, dropped");
                unresolved.push(name.to_string());
                continue;
            };
            let unit_price = Money::new(line_total.amount / Decimal::from(quantity), currency);
            items.push(CartLineItem {
                item_id: item.id.clone(),
                display_name: item.display_name.clone(),
                unit_price,
                quantity,
                image_ref: item.image_ref.clone(),
                line_total,
            });
        }

        if items.is_empty() {
            return Err(ParseFailure::NoResolvedItems { unresolved });
        }

        let mut cart = CartState {
            items,
            total: Money::zero(currency),
            reported_count: summary.map(|(count, _)| count),
        };
        cart.total = match summary {
            Some((_, total)) => total,
            None => cart.subtotal().ok_or(ParseFailure::TotalOverflow)?,
        };
        Ok(CartUpdate::Snapshot(cart))
    }

    /// The cart a message commits, if any
    ///
    /// Only remote messages that parse into a snapshot or a clear commit.
    #[must_use]
    pub fn committed(&self, message: &ChatMessage) -> Option<CartState> {
        if !message.is_remote() {
            return None;
        }
        match self.parse(&message.text) {
            Ok(CartUpdate::Snapshot(cart)) => {
                log::debug!(
                    "Cart snapshot committed: {} lines, total {}",
                    cart.line_count(),
                    cart.total
                );
                Some(cart)
            }
            Ok(CartUpdate::Clear) => {
                log::debug!("Cart cleared");
                Some(self.empty_cart())
            }
            Err(failure) => {
                log::trace!("Message #{} left cart unchanged: {failure}", message.sequence_index);
                None
            }
        }
    }

    /// Fold one message into `prior`; anything but a remote snapshot or clear is a no-op
    #[must_use]
    pub fn apply(&self, prior: &CartState, message: &ChatMessage) -> CartState {
        self.committed(message).unwrap_or_else(|| prior.clone())
    }
}

fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|phrase| text.contains(phrase.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn parser() -> CartParser {
        CartParser::new(fixtures::catalog(), CartPhrases::default()).unwrap()
    }

    fn inr(amount: i64) -> Money {
        Money::new(Decimal::from(amount), Currency::Inr)
    }

    fn snapshot(text: &str) -> CartState {
        match parser().parse(text) {
            Ok(CartUpdate::Snapshot(cart)) => cart,
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[test]
    fn added_to_cart_with_summary_and_line() {
        let cart = snapshot(
            "Added to cart! Cart (1 items, ₹1,899): • Black Oversized Hoodie x1 = ₹1,899",
        );
        assert_eq!(cart.items.len(), 1);
        let line = &cart.items[0];
        assert_eq!(line.item_id, "hoodie-001");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price, inr(1899));
        assert_eq!(line.image_ref, "/products/hoodie-black.png");
        assert_eq!(cart.total, inr(1899));
        assert_eq!(cart.reported_count, Some(1));
    }

    #[test]
    fn view_cart_listing_sums_lines_without_summary() {
        let text = "🛒 Cart (2 items):\n\n\
                    • Grey Pullover Hoodie x2 = ₹3598\n\
                    • Black Cap x1 = ₹399\n\
                    \nTotal: ₹3997\nSay 'checkout' to order!";
        let cart = snapshot(text);
        assert_eq!(
            cart.items
                .iter()
                .map(|line| (line.item_id.as_str(), line.quantity))
                .collect::<Vec<_>>(),
            vec![("hoodie-002", 2), ("acc-003", 1)]
        );
        assert_eq!(cart.items[0].unit_price, inr(1799));
        assert_eq!(cart.total, inr(3997));
        assert_eq!(cart.reported_count, None);
        assert_eq!(cart.unit_count(), 3);
        assert_eq!(cart.item_label(), "2 items");
    }

    #[test]
    fn overflowing_line_sum_keeps_prior_cart() {
        let parser = parser();
        let text = "🛒 Cart (2 items):\n\
                    • Black Cap x1 = ₹79,228,162,514,264,337,593,543,950,335\n\
                    • White Sneakers x1 = ₹79,228,162,514,264,337,593,543,950,335\n";
        assert_eq!(parser.parse(text).unwrap_err(), ParseFailure::TotalOverflow);

        let prior = snapshot("Added to cart! • Black Cap x1 = ₹399");
        assert_eq!(parser.apply(&prior, &ChatMessage::remote(text, 1)), prior);
    }

    #[test]
    fn unresolvable_line_is_dropped_rest_commits() {
        let cart = snapshot(
            "Cart (2 items, ₹2,698):\n• Mystery Scarf x1 = ₹899\n• White Sneakers x1 = ₹1,299",
        );
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].item_id, "shoes-001");
        assert_eq!(cart.total, inr(2698));
    }

    #[test]
    fn name_resolution_is_case_sensitive() {
        let failure = parser()
            .parse("Added to cart! • black cap x1 = ₹399")
            .unwrap_err();
        assert_eq!(
            failure,
            ParseFailure::NoResolvedItems {
                unresolved: vec!["black cap".to_string()]
            }
        );
    }

    #[test]
    fn zero_quantity_line_is_dropped() {
        let failure = parser().parse("Cart (0 items, ₹0): • Black Cap x0 = ₹0").unwrap_err();
        assert!(matches!(failure, ParseFailure::NoResolvedItems { .. }));
    }

    #[test]
    fn fractional_unit_price() {
        let cart = snapshot("Cart (1 items, ₹799): • Brown Leather Wallet x2 = ₹799");
        assert_eq!(cart.items[0].unit_price.amount, Decimal::new(3995, 1));
    }

    #[test]
    fn clear_wins_over_line_items() {
        let update = parser()
            .parse("🎉 Order Placed!\n• Black Oversized Hoodie x1 = ₹1,899\nTotal: ₹1,899")
            .unwrap();
        assert_eq!(update, CartUpdate::Clear);
        assert_eq!(parser().parse("Cart is empty. Browse products!").unwrap(), CartUpdate::Clear);
    }

    #[test]
    fn trigger_without_usable_content_fails() {
        assert_eq!(
            parser().parse("Cart (2 items").unwrap_err(),
            ParseFailure::NoResolvedItems { unresolved: vec![] }
        );
        assert_eq!(
            parser().parse("✓ Added to cart! (2 items, ₹3698 total)").unwrap_err(),
            ParseFailure::NoResolvedItems { unresolved: vec![] }
        );
    }

    #[test]
    fn no_trigger_is_a_no_op() {
        assert_eq!(
            parser().parse("• Black Cap x1 = ₹399").unwrap_err(),
            ParseFailure::NoTrigger
        );
    }

    #[test]
    fn apply_keeps_prior_on_failure_and_ignores_local() {
        let parser = parser();
        let prior = snapshot("Added to cart! • Black Cap x1 = ₹399");

        let next = parser.apply(&prior, &ChatMessage::remote("Cart (2 items", 3));
        assert_eq!(next, prior);

        let next = parser.apply(&prior, &ChatMessage::local("Order Placed", 4));
        assert_eq!(next, prior);

        let next = parser.apply(&prior, &ChatMessage::remote("Order Placed! Thank you.", 5));
        assert_eq!(next, CartState::empty(Currency::Inr));
    }

    #[test]
    fn same_snapshot_twice_is_identical() {
        let parser = parser();
        let message = ChatMessage::remote(
            "Added to cart! Cart (1 items, ₹1,899): • Black Oversized Hoodie x1 = ₹1,899",
            0,
        );
        let once = parser.apply(&parser.empty_cart(), &message);
        let twice = parser.apply(&once, &message);
        assert_eq!(once, twice);
        assert_eq!(parser.committed(&message), Some(once));
    }

    #[test]
    fn snapshot_replaces_rather_than_merges() {
        let parser = parser();
        let prior = snapshot("Added to cart! • Black Cap x1 = ₹399");
        let next = parser.apply(
            &prior,
            &ChatMessage::remote("Added to cart! • White Sneakers x1 = ₹1,299", 1),
        );
        assert_eq!(next.items.len(), 1);
        assert_eq!(next.items[0].item_id, "shoes-001");
        assert_eq!(next.total, inr(1299));
    }

    const PHRASES: &[&str] = &[
        "Added to cart! Cart (1 items, ₹1,899): • Black Oversized Hoodie x1 = ₹1,899",
        "🛒 Cart (2 items):\n• Grey Pullover Hoodie x2 = ₹3598\n• Black Cap x1 = ₹399",
        "Cart (2 items",
        "Added to cart! • Mystery Scarf x1 = ₹899",
        "Order Placed! Thank you.",
        "Cart is empty. Browse products!",
        "Anything else?",
        "• White Sneakers x1 = ₹1,299",
    ];

    fn arb_message() -> impl Strategy<Value = ChatMessage> {
        (any::<bool>(), 0..PHRASES.len()).prop_map(|(remote, phrase)| {
            if remote {
                ChatMessage::remote(PHRASES[phrase], 0)
            } else {
                ChatMessage::local(PHRASES[phrase], 0)
            }
        })
    }

    proptest! {
        #[test]
        fn proptest_apply_is_idempotent(prior_phrase in 0..PHRASES.len(), message in arb_message()) {
            let parser = parser();
            let prior = parser.apply(&parser.empty_cart(), &ChatMessage::remote(PHRASES[prior_phrase], 0));
            let once = parser.apply(&prior, &message);
            let twice = parser.apply(&once, &message);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn proptest_apply_agrees_with_parse(message in arb_message()) {
            let parser = parser();
            let prior = snapshot("Added to cart! • Black Cap x1 = ₹399");
            let next = parser.apply(&prior, &message);
            match (message.is_remote(), parser.parse(&message.text)) {
                (true, Ok(CartUpdate::Snapshot(cart))) => prop_assert_eq!(next, cart),
                (true, Ok(CartUpdate::Clear)) => prop_assert!(next.is_empty()),
                _ => prop_assert_eq!(next, prior),
            }
        }
    }
}
