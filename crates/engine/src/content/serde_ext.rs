//! Lenient deserialization helpers for content-store values.

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like a missing field.
///
/// Pair with `#[serde(default)]` so both absent and null values become
/// `T::default()`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Non-blank, trimmed view of an optional string.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
