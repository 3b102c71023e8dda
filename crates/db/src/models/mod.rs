//! Row models and DTOs, one module per table.

pub mod customer;
pub mod expense;
pub mod order;
pub mod payment;
pub mod quotation;

use serde::{Deserialize, Deserializer};

/// Deserializer for `Option<Option<T>>` update fields: an absent field stays
/// `None` (via `#[serde(default)]`) while an explicit `null` becomes
/// `Some(None)` and clears the column.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
