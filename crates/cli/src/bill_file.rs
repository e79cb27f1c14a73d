//! Bill descriptions read from disk: people by name, items referencing them
//! by name in `shared_by`.

use std::path::{Path, PathBuf};

use easesplit_core::numeric::deserialize_lenient;
use easesplit_core::{Bill, BillError, Item};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BillFileError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Person '{0}' is listed more than once")]
    DuplicatePerson(String),
    #[error("Item '{item}' is shared by unknown person '{person}'")]
    UnknownPerson { item: String, person: String },
    #[error(transparent)]
    Bill(#[from] BillError),
}

#[derive(Debug, Deserialize)]
pub struct PersonEntry {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemEntry {
    pub name: String,
    #[serde(default = "unset", deserialize_with = "deserialize_lenient")]
    pub price: f64,
    #[serde(default = "one", deserialize_with = "deserialize_lenient")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub tax_percent: f64,
    #[serde(default)]
    pub shared_by: Vec<String>,
}

fn unset() -> f64 {
    f64::NAN
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Default, Deserialize)]
pub struct BillFile {
    #[serde(default)]
    pub people: Vec<PersonEntry>,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

impl BillFile {
    /// Reads TOML, or JSON when the extension is `.json`.
    pub fn load(path: &Path) -> Result<Self, BillFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| BillFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, BillFileError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, BillFileError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolves `shared_by` names to ids and builds the working bill.
    /// Names are the only link between items and people, so they must be unique.
    pub fn into_bill(self) -> Result<Bill, BillFileError> {
        let mut bill = Bill::new();
        for person in &self.people {
            if bill.person_by_name(&person.name).is_some() {
                return Err(BillFileError::DuplicatePerson(person.name.clone()));
            }
            bill.add_person(&person.name)?;
        }

        for entry in self.items {
            let mut shared_by = Vec::with_capacity(entry.shared_by.len());
            for name in &entry.shared_by {
                let person = bill
                    .person_by_name(name)
                    .ok_or_else(|| BillFileError::UnknownPerson {
                        item: entry.name.clone(),
                        person: name.clone(),
                    })?;
                shared_by.push(person.id);
            }

            let mut item = Item::new(entry.name, entry.price).shared_with(shared_by);
            item.quantity = entry.quantity;
            item.tax_percent = entry.tax_percent;
            bill.append_items([item]);
        }

        Ok(bill)
    }
}
