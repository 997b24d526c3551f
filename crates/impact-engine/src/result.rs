//! Per-country result records.

use serde::{Serialize, Serializer};

use crate::damage::damage;

/// Mean change and damage for one country.
///
/// Serializes non-finite numbers as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryResult {
    pub country: String,
    #[serde(serialize_with = "finite_or_null")]
    pub change: f64,
    #[serde(serialize_with = "finite_or_null")]
    pub damage: f64,
}

impl CountryResult {
    /// Build a record, deriving damage from the change.
    pub fn new(country: impl Into<String>, change: f64) -> Self {
        Self {
            country: country.into(),
            change,
            damage: damage(change),
        }
    }
}

fn finite_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}
