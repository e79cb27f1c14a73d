//! Coercion of loosely-typed numeric input into values safe for arithmetic.
//!
//! Item prices, quantities and tax rates arrive from manual entry or OCR and
//! may be missing or non-numeric. They are stored as raw `f64` (NaN marks an
//! unusable value) and coerced with [`to_safe_number`] at the point of use:
//!
//! | field         | fallback |
//! |---------------|----------|
//! | `price`       | 0        |
//! | `quantity`    | 1        |
//! | `tax_percent` | 0        |
//!
//! Products and sums of coerced values that would exceed the `Decimal` range
//! saturate at `Decimal::MAX` (or `Decimal::MIN`) instead of overflowing.

use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};

pub const PRICE_FALLBACK: Decimal = Decimal::ZERO;
pub const QUANTITY_FALLBACK: Decimal = Decimal::ONE;
pub const TAX_PERCENT_FALLBACK: Decimal = Decimal::ZERO;

/// Returns `value` as a `Decimal`, or `fallback` when it is NaN, infinite, or
/// outside the range a `Decimal` can hold.
pub fn to_safe_number(value: f64, fallback: Decimal) -> Decimal {
    if !value.is_finite() {
        return fallback;
    }
    Decimal::from_f64(value).unwrap_or(fallback)
}

/// Parses user-entered text as a number. Anything unparseable becomes NaN.
pub fn parse_lenient(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Serde adapter: numbers pass through, numeric strings are parsed, and
/// every other value (null, bool, free text) deserializes to NaN.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientF64)
}

struct LenientF64;

impl<'de> Visitor<'de> for LenientF64 {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a number or numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(parse_lenient(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<f64, E> {
        Ok(f64::NAN)
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(f64::NAN)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(f64::NAN)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<f64, D::Error> {
        d.deserialize_any(LenientF64)
    }
}
