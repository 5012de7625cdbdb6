use chatcart_catalog::CatalogItem;
use chatcart_sync::{CartState, MatchCandidate, RecommendationEntry};
use serde::Serialize;

/// One published event of a replay, as emitted with `--json`
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent<'a> {
    Recommendations {
        at: usize,
        items: &'a [RecommendationEntry],
        highlighted: Vec<&'a str>,
    },
    Cart {
        at: usize,
        cart: &'a CartState,
    },
}

pub fn render_recommendations(
    at: usize,
    ranked: &[RecommendationEntry],
    highlighted: &[&str],
) -> String {
    let mut out = format!("[#{at}] recommendations ({})\n", ranked.len());
    for (idx, entry) in ranked.iter().enumerate() {
        let marker = if highlighted.contains(&entry.item_id.as_str()) {
            " *"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {}. {} {} {} (priority {}, message #{}){marker}\n",
            idx + 1,
            entry.item_id,
            entry.display_name,
            entry.unit_price,
            entry.priority(),
            entry.mentioned_at,
        ));
    }
    out
}

pub fn render_cart(at: usize, cart: &CartState) -> String {
    if cart.is_empty() {
        return format!("[#{at}] cart cleared\n");
    }
    let mut out = format!("[#{at}] cart: {}, total {}\n", cart.item_label(), cart.total);
    for line in &cart.items {
        out.push_str(&format!(
            "  - {} {} x{} = {}\n",
            line.item_id, line.display_name, line.quantity, line.line_total
        ));
    }
    out
}

pub fn render_item(item: &CatalogItem) -> String {
    let mut out = format!(
        "{:<12} {:<28} {:>8}  {}",
        item.id,
        item.display_name,
        item.unit_price.to_string(),
        item.category
    );
    if let Some(color) = &item.color {
        out.push_str(&format!("  {color}"));
    }
    if !item.in_stock {
        out.push_str("  (out of stock)");
    }
    out
}

pub fn render_candidate(candidate: &MatchCandidate, item: Option<&CatalogItem>) -> String {
    let name = item.map_or("", |item| item.display_name.as_str());
    format!(
        "{:<12} {:<9} {name}",
        candidate.item_id,
        format!("{:?}", candidate.kind).to_lowercase()
    )
}
