use easesplit_core::Item;
use serde::Serialize;

/// Shown to the user when a receipt yields no recognizable lines.
pub const NO_ITEMS_NOTICE: &str = "No items detected. Please check receipt or type manually.";

/// Result of parsing one receipt's text.
///
/// `NoItemsDetected` is an informational outcome, not an error: the caller
/// should tell the user and offer manual entry.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "items", rename_all = "snake_case")]
pub enum ParseOutcome {
    Items(Vec<Item>),
    NoItemsDetected,
}

impl ParseOutcome {
    pub fn from_items(items: Vec<Item>) -> Self {
        if items.is_empty() {
            ParseOutcome::NoItemsDetected
        } else {
            ParseOutcome::Items(items)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ParseOutcome::NoItemsDetected)
    }

    pub fn items(&self) -> &[Item] {
        match self {
            ParseOutcome::Items(items) => items,
            ParseOutcome::NoItemsDetected => &[],
        }
    }

    pub fn into_items(self) -> Vec<Item> {
        match self {
            ParseOutcome::Items(items) => items,
            ParseOutcome::NoItemsDetected => Vec::new(),
        }
    }
}
