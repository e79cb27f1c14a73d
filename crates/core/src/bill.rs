use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Item, ItemId, Person, PersonId};
use crate::numeric::parse_lenient;
use crate::split::{SplitCalculator, SplitSummary};

/// Tax rates offered when editing an item, in percent.
pub const TAX_PRESETS: &[f64] = &[0.0, 5.0, 13.0, 15.0, 18.0];

/// Quantities offered when editing an item.
pub const QUANTITY_CHOICES: RangeInclusive<u32> = 1..=5;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BillError {
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),
}

/// The caller-held working state of a split: the authoritative people and
/// items, edited in place and summarized after every change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bill {
    pub people: Vec<Person>,
    pub items: Vec<Item>,
}

impl Bill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_person(&mut self, name: &str) -> Result<PersonId, BillError> {
        if name.trim().is_empty() {
            return Err(BillError::EmptyName);
        }
        let person = Person::new(name);
        let id = person.id;
        self.people.push(person);
        Ok(id)
    }

    /// Adds a manually entered item. `price_text` is kept even when it does not
    /// parse; the calculator then treats the price as zero.
    pub fn add_item(&mut self, name: &str, price_text: &str) -> Result<ItemId, BillError> {
        if name.is_empty() {
            return Err(BillError::MissingField("name"));
        }
        if price_text.is_empty() {
            return Err(BillError::MissingField("price"));
        }
        let item = Item::new(name, parse_lenient(price_text));
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    /// Appends candidates, e.g. from a scanned receipt, keeping their order.
    pub fn append_items(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items.extend(items);
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn person_by_name(&self, name: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.name == name)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn set_quantity(&mut self, item: ItemId, quantity: u32) -> Result<(), BillError> {
        self.item_mut(item)?.quantity = f64::from(quantity);
        Ok(())
    }

    pub fn set_tax_percent(&mut self, item: ItemId, tax_percent: f64) -> Result<(), BillError> {
        self.item_mut(item)?.tax_percent = tax_percent;
        Ok(())
    }

    /// Adds `person` to the item's sharers, or removes them if already there.
    /// Returns whether the person shares the item afterwards.
    pub fn toggle_share(&mut self, item: ItemId, person: PersonId) -> Result<bool, BillError> {
        if self.person(person).is_none() {
            return Err(BillError::PersonNotFound(person));
        }
        let item = self.item_mut(item)?;
        if item.is_shared_by(person) {
            item.shared_by.retain(|pid| *pid != person);
            Ok(false)
        } else {
            item.shared_by.push(person);
            Ok(true)
        }
    }

    pub fn summary(&self) -> SplitSummary {
        SplitCalculator::summarize(&self.people, &self.items)
    }

    fn item_mut(&mut self, id: ItemId) -> Result<&mut Item, BillError> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(BillError::ItemNotFound(id))
    }
}
