use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{Item, Person, PersonId};
use crate::numeric::{to_safe_number, PRICE_FALLBACK, QUANTITY_FALLBACK, TAX_PERCENT_FALLBACK};

/// One person's share of the bill, in the order of the people snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonShare {
    pub person_id: PersonId,
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSummary {
    pub shares: Vec<PersonShare>,
    pub grand_total: Decimal,
    /// Total of items nobody has been assigned to yet.
    pub unassigned: Decimal,
}

/// Stateless bill arithmetic over snapshots of people and items.
///
/// Amounts are never rounded here; rounding to cents is for display.
/// Malformed numeric fields degrade to the fallbacks in [`crate::numeric`]
/// instead of failing, and arithmetic that would overflow saturates at
/// `Decimal::MAX` / `Decimal::MIN`.
pub struct SplitCalculator;

impl SplitCalculator {
    /// `price × quantity`.
    pub fn item_base(item: &Item) -> Decimal {
        let price = to_safe_number(item.price, PRICE_FALLBACK);
        let quantity = to_safe_number(item.quantity, QUANTITY_FALLBACK);
        price.saturating_mul(quantity)
    }

    /// `base × tax_percent / 100`.
    pub fn item_tax(item: &Item) -> Decimal {
        let tax_percent = to_safe_number(item.tax_percent, TAX_PERCENT_FALLBACK);
        Self::item_base(item).saturating_mul(tax_percent) / Decimal::ONE_HUNDRED
    }

    pub fn item_total(item: &Item) -> Decimal {
        Self::item_base(item).saturating_add(Self::item_tax(item))
    }

    /// Amount owed per person. Every person in `people` gets an entry, even at
    /// zero. Items shared by nobody are skipped. Each item total is divided
    /// evenly among the distinct ids in `shared_by`; shares for ids not in
    /// `people` are dropped rather than redistributed.
    pub fn per_person_totals(people: &[Person], items: &[Item]) -> HashMap<PersonId, Decimal> {
        let mut totals: HashMap<PersonId, Decimal> =
            people.iter().map(|p| (p.id, Decimal::ZERO)).collect();

        for item in items {
            let sharers = distinct_sharers(item);
            if sharers.is_empty() {
                continue;
            }

            let share = Self::item_total(item) / Decimal::from(sharers.len());
            for pid in sharers {
                match totals.get_mut(&pid) {
                    Some(total) => *total = total.saturating_add(share),
                    None => {
                        tracing::debug!(item = %item.id, person = %pid, "dropping share for unknown person");
                    }
                }
            }
        }

        totals
    }

    /// Sum of every item's total, assigned or not.
    pub fn grand_total(items: &[Item]) -> Decimal {
        saturating_sum(items.iter().map(Self::item_total))
    }

    pub fn summarize(people: &[Person], items: &[Item]) -> SplitSummary {
        let totals = Self::per_person_totals(people, items);
        let shares = people
            .iter()
            .map(|p| PersonShare {
                person_id: p.id,
                name: p.name.clone(),
                amount: totals.get(&p.id).copied().unwrap_or(Decimal::ZERO),
            })
            .collect();
        let unassigned = saturating_sum(
            items
                .iter()
                .filter(|item| item.shared_by.is_empty())
                .map(Self::item_total),
        );

        SplitSummary {
            shares,
            grand_total: Self::grand_total(items),
            unassigned,
        }
    }
}

fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `shared_by` with repeats removed, first occurrence wins.
fn distinct_sharers(item: &Item) -> Vec<PersonId> {
    let mut seen = HashSet::new();
    item.shared_by
        .iter()
        .copied()
        .filter(|pid| seen.insert(*pid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn pair() -> (Person, Person) {
        (Person::new("Alice"), Person::new("Bob"))
    }

    // ── Per-item amounts ─────────────────────────────────────────────────────

    #[test]
    fn item_base_multiplies_price_and_quantity() {
        let item = Item::new("Soda", 2.5).with_quantity(4);
        assert_eq!(SplitCalculator::item_base(&item), dec("10"));
    }

    #[test]
    fn item_tax_is_percentage_of_base() {
        let item = Item::new("Meal", 20.0).with_tax_percent(13.0);
        assert_eq!(SplitCalculator::item_tax(&item), dec("2.6"));
        assert_eq!(SplitCalculator::item_total(&item), dec("22.6"));
    }

    #[test]
    fn nan_price_falls_back_to_zero() {
        let item = Item::new("Broken", f64::NAN).with_quantity(3);
        assert_eq!(SplitCalculator::item_base(&item), Decimal::ZERO);
        assert_eq!(SplitCalculator::item_total(&item), Decimal::ZERO);
    }

    #[test]
    fn missing_quantity_falls_back_to_one() {
        let mut item = Item::new("Tea", 4.0);
        item.quantity = f64::NAN;
        assert_eq!(SplitCalculator::item_base(&item), dec("4"));
    }

    #[test]
    fn invalid_tax_falls_back_to_zero() {
        let item = Item::new("Cake", 6.0).with_tax_percent(f64::INFINITY);
        assert_eq!(SplitCalculator::item_tax(&item), Decimal::ZERO);
        assert_eq!(SplitCalculator::item_total(&item), dec("6"));
    }

    #[test]
    fn item_base_saturates_on_overflow() {
        let mut item = Item::new("Yacht", 1e20);
        item.quantity = 1e10;
        assert_eq!(SplitCalculator::item_base(&item), Decimal::MAX);
    }

    #[test]
    fn item_tax_and_total_saturate_on_overflow() {
        let item = Item::new("Island", 7.9e28).with_tax_percent(50.0);
        assert_eq!(SplitCalculator::item_tax(&item), Decimal::MAX / Decimal::ONE_HUNDRED);
        assert_eq!(SplitCalculator::item_total(&item), Decimal::MAX);

        let mut bulk = Item::new("Planet", 7e28).with_tax_percent(200.0);
        bulk.quantity = 1e6;
        assert_eq!(SplitCalculator::item_base(&bulk), Decimal::MAX);
        assert_eq!(SplitCalculator::item_total(&bulk), Decimal::MAX);
    }

    #[test]
    fn grand_total_saturates_on_overflow() {
        let alice = Person::new("Alice");
        let items = vec![
            Item::new("Left", 5e28).shared_with([alice.id]),
            Item::new("Right", 5e28).shared_with([alice.id]),
        ];
        assert_eq!(SplitCalculator::grand_total(&items), Decimal::MAX);

        let summary = SplitCalculator::summarize(std::slice::from_ref(&alice), &items);
        assert_eq!(summary.grand_total, Decimal::MAX);
        assert_eq!(summary.shares[0].amount, Decimal::MAX);
        assert_eq!(summary.unassigned, Decimal::ZERO);
    }

    // ── Per-person split ─────────────────────────────────────────────────────

    #[test]
    fn two_people_split_taxed_item() {
        let (alice, bob) = pair();
        let items = vec![Item::new("Dinner", 10.0)
            .with_tax_percent(10.0)
            .shared_with([alice.id, bob.id])];
        let people = vec![alice.clone(), bob.clone()];

        let totals = SplitCalculator::per_person_totals(&people, &items);
        assert_eq!(totals[&alice.id], dec("5.5"));
        assert_eq!(totals[&bob.id], dec("5.5"));
        assert_eq!(SplitCalculator::grand_total(&items), dec("11"));
    }

    #[test]
    fn every_person_appears_even_with_nothing_owed() {
        let (alice, bob) = pair();
        let items = vec![Item::new("Coffee", 3.0).shared_with([alice.id])];
        let totals = SplitCalculator::per_person_totals(&[alice.clone(), bob.clone()], &items);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&alice.id], dec("3"));
        assert_eq!(totals[&bob.id], Decimal::ZERO);
    }

    #[test]
    fn unshared_item_counts_only_toward_grand_total() {
        let (alice, bob) = pair();
        let items = vec![
            Item::new("Shared", 8.0).shared_with([alice.id, bob.id]),
            Item::new("Nobody", 5.0),
        ];
        let people = vec![alice.clone(), bob.clone()];
        let totals = SplitCalculator::per_person_totals(&people, &items);

        assert_eq!(totals[&alice.id] + totals[&bob.id], dec("8"));
        assert_eq!(SplitCalculator::grand_total(&items), dec("13"));
    }

    #[test]
    fn duplicate_sharer_is_counted_once() {
        let (alice, bob) = pair();
        let items = vec![Item::new("Nachos", 9.0).shared_with([alice.id, alice.id, bob.id])];
        let totals = SplitCalculator::per_person_totals(&[alice.clone(), bob.clone()], &items);
        assert_eq!(totals[&alice.id], dec("4.5"));
        assert_eq!(totals[&bob.id], dec("4.5"));
    }

    #[test]
    fn unknown_sharer_share_is_dropped() {
        let (alice, bob) = pair();
        let stranger = PersonId::new();
        let items = vec![Item::new("Wine", 30.0).shared_with([alice.id, stranger, bob.id])];
        let totals = SplitCalculator::per_person_totals(&[alice.clone(), bob.clone()], &items);

        assert_eq!(totals.len(), 2);
        assert!(!totals.contains_key(&stranger));
        assert_eq!(totals[&alice.id], dec("10"));
        assert_eq!(totals[&bob.id], dec("10"));
    }

    #[test]
    fn split_is_lossless_across_sharers() {
        let people: Vec<Person> = ["A", "B", "C"].into_iter().map(Person::new).collect();
        let item = Item::new("Pizza", 10.0)
            .with_tax_percent(13.0)
            .shared_with(people.iter().map(|p| p.id));
        let totals = SplitCalculator::per_person_totals(&people, std::slice::from_ref(&item));

        let sum: Decimal = totals.values().copied().sum();
        let diff = (sum - SplitCalculator::item_total(&item)).abs();
        assert!(diff < dec("0.0000001"), "diff was {diff}");
    }

    #[test]
    fn no_people_no_items() {
        assert!(SplitCalculator::per_person_totals(&[], &[]).is_empty());
        assert_eq!(SplitCalculator::grand_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let (alice, bob) = pair();
        let people = vec![alice.clone(), bob.clone()];
        let items = vec![
            Item::new("A", 7.0).with_quantity(2).shared_with([alice.id]),
            Item::new("B", 3.3).with_tax_percent(15.0).shared_with([alice.id, bob.id]),
        ];
        assert_eq!(
            SplitCalculator::per_person_totals(&people, &items),
            SplitCalculator::per_person_totals(&people, &items)
        );
        assert_eq!(
            SplitCalculator::grand_total(&items),
            SplitCalculator::grand_total(&items)
        );
    }

    // ── Summary ──────────────────────────────────────────────────────────────

    #[test]
    fn summary_keeps_people_order_and_reports_unassigned() {
        let (alice, bob) = pair();
        let people = vec![bob.clone(), alice.clone()];
        let items = vec![
            Item::new("Fries", 4.0).shared_with([alice.id]),
            Item::new("Dessert", 6.0),
        ];
        let summary = SplitCalculator::summarize(&people, &items);

        let names: Vec<&str> = summary.shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Alice"]);
        assert_eq!(summary.shares[1].amount, dec("4"));
        assert_eq!(summary.grand_total, dec("10"));
        assert_eq!(summary.unassigned, dec("6"));
    }
}
