//! Item arrays inside page sections.
//!
//! Slides, spec rows, features, steps, and FAQ entries are parsed one by one.
//! An item that does not match its shape is set aside with its position key;
//! the items around it are kept in order.

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// An item that could not be parsed, keyed by its `_key` or `#<index>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedItem {
    pub key: String,
    pub reason: String,
}

/// Parsed items in stored order, plus the ones that were set aside.
#[derive(Debug, Clone, PartialEq)]
pub struct Items<T> {
    ready: Vec<T>,
    rejected: Vec<RejectedItem>,
}

impl<T> Default for Items<T> {
    fn default() -> Self {
        Self {
            ready: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T> From<Vec<T>> for Items<T> {
    fn from(ready: Vec<T>) -> Self {
        Self {
            ready,
            rejected: Vec::new(),
        }
    }
}

impl<T: DeserializeOwned> Items<T> {
    /// Parse stored item values. Never fails.
    pub fn from_values(values: &[Value]) -> Self {
        let mut items = Self::default();
        for (index, value) in values.iter().enumerate() {
            match T::deserialize(value) {
                Ok(item) => items.ready.push(item),
                Err(e) => {
                    let key = item_key(value, index);
                    debug!(key = %key, error = %e, "stored item rejected");
                    items.rejected.push(RejectedItem {
                        key,
                        reason: e.to_string(),
                    });
                }
            }
        }
        items
    }
}

impl<T> Items<T> {
    pub fn rejected(&self) -> &[RejectedItem] {
        &self.rejected
    }
}

impl<T> Deref for Items<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.ready
    }
}

impl<'a, T> IntoIterator for &'a Items<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.ready.iter()
    }
}

/// A missing or `null` array is empty. Anything else that is not an array
/// fails the enclosing section.
impl<'de, T: DeserializeOwned> Deserialize<'de> for Items<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Option::<Vec<Value>>::deserialize(deserializer)?;
        Ok(values.map_or_else(Self::default, |values| Self::from_values(&values)))
    }
}

fn item_key(value: &Value, index: usize) -> String {
    value
        .get("_key")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map_or_else(|| format!("#{index}"), str::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        #[serde(default)]
        label: Option<String>,
    }

    #[test]
    fn bad_items_are_set_aside_in_order() {
        let items: Items<Row> = Items::from_values(&[
            json!({ "label": "a" }),
            json!({ "_key": "bad", "label": 7 }),
            json!("not an object"),
            json!({ "label": "d" }),
        ]);
        let labels: Vec<_> = items.iter().map(|r| r.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("a"), Some("d")]);
        let keys: Vec<&str> = items.rejected().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["bad", "#2"]);
        assert!(items.rejected()[0].reason.contains("invalid type"));
    }

    #[test]
    fn missing_or_null_is_empty() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default)]
            rows: Items<Row>,
        }
        let absent: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(absent.rows.is_empty());
        let null: Holder = serde_json::from_value(json!({ "rows": null })).unwrap();
        assert!(null.rows.is_empty());
        assert!(serde_json::from_value::<Holder>(json!({ "rows": "x" })).is_err());
    }
}
