//! End-to-end sessions against the built-in store profile

use chatcart_catalog::{Currency, Decimal, Money, StoreProfile};
use chatcart_sync::{CartState, ChatMessage, Sender, SyncConfig, Synchronizer};
use pretty_assertions::assert_eq;

fn session() -> Synchronizer {
    let profile = StoreProfile::builtin().unwrap();
    let config = SyncConfig::from_toml_str(StoreProfile::builtin_source()).unwrap();
    Synchronizer::from_profile(&profile, config).unwrap()
}

fn inr(amount: i64) -> Money {
    Money::new(Decimal::from(amount), Currency::Inr)
}

fn feed(sync: &Synchronizer) -> Vec<(&str, u8)> {
    sync.recommendations()
        .iter()
        .map(|entry| (entry.item_id.as_str(), entry.priority()))
        .collect()
}

const ADDED_HOODIE: &str =
    "Added to cart! Cart (1 items, ₹1,899): • Black Oversized Hoodie x1 = ₹1,899";

#[test]
fn exact_recommendation() {
    let mut sync = session();
    sync.on_message(Sender::Remote, "I recommend the Black Oversized Hoodie!");
    assert_eq!(feed(&sync), vec![("hoodie-001", 2)]);
}

#[test]
fn category_recommendation_covers_every_hoodie() {
    let mut sync = session();
    sync.on_message(Sender::Remote, "We have some great hoodies in stock");
    assert_eq!(
        feed(&sync),
        vec![
            ("hoodie-001", 1),
            ("hoodie-002", 1),
            ("hoodie-003", 1),
            ("hoodie-004", 1),
            ("hoodie-005", 1),
        ]
    );
}

#[test]
fn exact_mention_upgrades_category_entry() {
    let mut sync = session();
    sync.on_message(Sender::Remote, "great hoodies");
    sync.on_message(Sender::Remote, "the Grey Pullover Hoodie is popular");

    let ranked = feed(&sync);
    assert_eq!(ranked[0], ("hoodie-002", 2));
    assert_eq!(ranked[1], ("hoodie-001", 1));
    assert_eq!(ranked.len(), 5);
}

#[test]
fn added_to_cart_snapshot() {
    let mut sync = session();
    let outcome = sync.on_message(Sender::Remote, ADDED_HOODIE);

    let cart = outcome.cart.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].item_id, "hoodie-001");
    assert_eq!(cart.items[0].quantity, 1);
    assert_eq!(cart.items[0].unit_price, inr(1899));
    assert_eq!(cart.total, inr(1899));
    assert_eq!(sync.cart(), &cart);
}

#[test]
fn repeated_snapshot_republishes_identical_cart() {
    let mut sync = session();
    let first = sync.on_message(Sender::Remote, ADDED_HOODIE).cart.unwrap();
    let second = sync.on_message(Sender::Remote, ADDED_HOODIE).cart.unwrap();
    assert_eq!(first, second);
    assert_eq!(sync.cart(), &first);
}

#[test]
fn order_placed_clears_cart() {
    let mut sync = session();
    sync.on_message(Sender::Remote, ADDED_HOODIE);
    let outcome = sync.on_message(Sender::Remote, "Order Placed! Thank you.");

    assert_eq!(outcome.cart, Some(CartState::empty(Currency::Inr)));
    assert!(sync.cart().is_empty());
    assert_eq!(sync.cart().total, inr(0));
}

#[test]
fn truncated_cart_message_keeps_previous_cart() {
    let mut sync = session();
    sync.on_message(Sender::Remote, ADDED_HOODIE);
    let before = sync.cart().clone();

    let outcome = sync.on_message(Sender::Remote, "Cart (2 items");
    assert!(outcome.cart.is_none());
    assert_eq!(sync.cart(), &before);
}

#[test]
fn shopper_messages_never_touch_state() {
    let mut sync = session();
    sync.on_message(Sender::Local, "Add the Black Cap. Added to cart • Black Cap x1 = ₹399");
    assert!(sync.recommendations().is_empty());
    assert!(sync.cart().is_empty());
}

#[test]
fn full_conversation() {
    let mut sync = session();
    let script = [
        (Sender::Local, "show me hoodies"),
        (Sender::Remote, "We have some great hoodies in stock"),
        (Sender::Local, "add the grey one"),
        (
            Sender::Remote,
            "✓ Added to cart! Cart (1 items, ₹1,799): • Grey Pullover Hoodie x1 = ₹1,799",
        ),
        (Sender::Local, "also a cap"),
        (
            Sender::Remote,
            "🛒 Cart (2 items):\n\n• Grey Pullover Hoodie x1 = ₹1799\n• Black Cap x1 = ₹399\n\nTotal: ₹2198",
        ),
    ];
    for (idx, (sender, text)) in script.into_iter().enumerate() {
        sync.ingest(ChatMessage::new(sender, text, idx)).unwrap();
    }

    let ranked = feed(&sync);
    assert_eq!(ranked[0], ("acc-003", 2));
    assert_eq!(ranked[1], ("hoodie-002", 2));
    assert!(ranked[2..].iter().all(|(_, priority)| *priority == 1));

    let cart = sync.cart();
    assert_eq!(cart.line_count(), 2);
    assert_eq!(cart.total, inr(2198));
    assert_eq!(cart.item_label(), "2 items");

    let highlighted: Vec<&str> = sync.highlighted().map(|e| e.item_id.as_str()).collect();
    assert_eq!(highlighted, vec!["acc-003", "hoodie-002"]);

    sync.reset();
    assert!(sync.history().is_empty());
    assert!(sync.recommendations().is_empty());
    assert_eq!(sync.cart(), &CartState::empty(Currency::Inr));
}
