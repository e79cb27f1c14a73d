use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::numeric::deserialize_lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub Uuid);

impl PersonId {
    pub fn new() -> Self {
        PersonId(Uuid::new_v4())
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        ItemId(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant in the split. Identity is by `id`; the name is display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Person {
            id: PersonId::new(),
            name: name.into(),
        }
    }
}

/// A billed line. Numeric fields hold the raw entered values and may be NaN;
/// see [`crate::numeric`] for how they are coerced before arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    pub name: String,
    /// Unit price.
    #[serde(default = "unset", deserialize_with = "deserialize_lenient")]
    pub price: f64,
    #[serde(default = "one", deserialize_with = "deserialize_lenient")]
    pub quantity: f64,
    /// Percentage, e.g. `13.0` for 13%.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub tax_percent: f64,
    #[serde(default)]
    pub shared_by: Vec<PersonId>,
}

fn unset() -> f64 {
    f64::NAN
}

fn one() -> f64 {
    1.0
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Item {
            id: ItemId::new(),
            name: name.into(),
            price,
            quantity: 1.0,
            tax_percent: 0.0,
            shared_by: Vec::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = f64::from(quantity);
        self
    }

    pub fn with_tax_percent(mut self, tax_percent: f64) -> Self {
        self.tax_percent = tax_percent;
        self
    }

    pub fn shared_with(mut self, people: impl IntoIterator<Item = PersonId>) -> Self {
        self.shared_by = people.into_iter().collect();
        self
    }

    pub fn is_shared_by(&self, person: PersonId) -> bool {
        self.shared_by.contains(&person)
    }
}
