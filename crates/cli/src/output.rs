use easesplit_core::{Item, Money, SplitCalculator, SplitSummary};
use easesplit_ocr::ParseOutcome;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ShareView {
    pub name: String,
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub people: Vec<ShareView>,
    pub unassigned: String,
    pub grand_total: String,
}

#[derive(Debug, Serialize)]
pub struct ScanView<'a> {
    pub receipt: String,
    pub result: &'a ParseOutcome,
}

fn cents(amount: Decimal) -> String {
    format!("{:.2}", Money::from_decimal(amount).as_decimal())
}

impl From<&SplitSummary> for SummaryView {
    fn from(summary: &SplitSummary) -> Self {
        SummaryView {
            people: summary
                .shares
                .iter()
                .map(|s| ShareView {
                    name: s.name.clone(),
                    amount: cents(s.amount),
                })
                .collect(),
            unassigned: cents(summary.unassigned),
            grand_total: cents(summary.grand_total),
        }
    }
}

pub fn render_items(items: &[Item], names: impl Fn(&Item) -> Vec<String>) -> String {
    let mut out = String::new();
    for item in items {
        let sharers = names(item);
        let shared = if sharers.is_empty() {
            "unassigned".to_string()
        } else {
            sharers.join(", ")
        };
        out.push_str(&format!(
            "  {:<24} x{:<3} {:>10}  tax {:>8}  {:>10}  ({shared})\n",
            item.name,
            safe_quantity(item).normalize().to_string(),
            Money::from_decimal(SplitCalculator::item_base(item)).to_string(),
            Money::from_decimal(SplitCalculator::item_tax(item)).to_string(),
            Money::from_decimal(SplitCalculator::item_total(item)).to_string(),
        ));
    }
    out
}

fn safe_quantity(item: &Item) -> Decimal {
    easesplit_core::to_safe_number(item.quantity, easesplit_core::QUANTITY_FALLBACK)
}

pub fn render_summary(summary: &SplitSummary) -> String {
    let mut out = String::from("Summary\n");
    for share in &summary.shares {
        out.push_str(&format!("  {}: {}\n", share.name, Money::from_decimal(share.amount)));
    }
    if !summary.unassigned.is_zero() {
        out.push_str(&format!("  Unassigned: {}\n", Money::from_decimal(summary.unassigned)));
    }
    out.push_str(&format!("Total: {}\n", Money::from_decimal(summary.grand_total)));
    out
}

pub fn render_scan(receipt: &str, outcome: &ParseOutcome) -> String {
    let mut out = format!("{receipt}: {} item(s)\n", outcome.items().len());
    for item in outcome.items() {
        out.push_str(&format!(
            "  {:<24} {}\n",
            item.name,
            Money::from_decimal(SplitCalculator::item_base(item))
        ));
    }
    out
}
