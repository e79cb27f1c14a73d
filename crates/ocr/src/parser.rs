use std::sync::OnceLock;

use easesplit_core::Item;
use regex::Regex;

use crate::types::ParseOutcome;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Letters/spaces, then `$`, then a price with up to two decimals. A bare
// number with no `$` is never a price: quantities, dates and SKUs look alike.
re!(re_line_item,
    r"([a-zA-Z\s]+)\s*\$\s*([0-9]+(?:\.[0-9]{1,2})?)");

// ── Public parsing API ────────────────────────────────────────────────────────

pub struct ReceiptParser;

impl ReceiptParser {
    /// Extract candidate items from raw OCR text, one per matching line, in
    /// line order. Lines that don't match are skipped.
    pub fn parse(ocr_text: &str) -> ParseOutcome {
        let items: Vec<Item> = ocr_text
            .split('\n')
            .enumerate()
            .filter_map(|(idx, line)| {
                let item = Self::parse_line(line);
                if item.is_none() && !line.trim().is_empty() {
                    tracing::trace!(line = idx + 1, "no line item recognized");
                }
                item
            })
            .collect();

        tracing::debug!(count = items.len(), "parsed receipt text");
        ParseOutcome::from_items(items)
    }

    /// First match only; quantity 1, no tax, shared by nobody.
    pub fn parse_line(line: &str) -> Option<Item> {
        let c = re_line_item().captures(line)?;
        let name = c.get(1)?.as_str().trim();
        if name.is_empty() {
            return None;
        }
        let price: f64 = c.get(2)?.as_str().parse().ok()?;
        if price.is_nan() {
            return None;
        }
        Some(Item::new(name, price))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
