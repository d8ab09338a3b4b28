//! Keyed, ordered block lists.
//!
//! A [`BlockList`] keeps every stored block in an arena keyed by its stable
//! `_key`, plus the ordered list of keys. Render order comes from the key list
//! alone; keys are never used to resequence.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use super::blocks::Block;
use crate::error::ContentError;

/// Stable identity of a block, independent of its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key assigned to a stored block that has no `_key`.
    pub fn positional(index: usize) -> Self {
        Self(format!("#{index}"))
    }
}

impl From<&str> for BlockKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BlockKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a stored value could not be turned into a typed block or section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// The stored tag, when one could be read.
    pub tag: Option<String>,
    pub reason: String,
}

impl Rejection {
    pub fn new(tag: Option<&str>, error: &ContentError) -> Self {
        Self {
            tag: tag.map(str::to_string),
            reason: error.to_string(),
        }
    }
}

/// A parsed slot: either a typed value or the reason it was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<T> {
    Ready(T),
    Rejected(Rejection),
}

impl<T> Entry<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Entry::Ready(value) => Some(value),
            Entry::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Entry::Rejected(_))
    }
}

/// Ordered list of blocks, stored as key order plus a key→block arena.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockList {
    order: Vec<BlockKey>,
    entries: HashMap<BlockKey, Entry<Block>>,
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse stored block values. Never fails: unusable values are kept as
    /// rejected entries in their original position.
    pub fn from_values(values: &[Value]) -> Self {
        let mut list = Self::new();
        for (index, value) in values.iter().enumerate() {
            let key = list.key_for(value, index);
            let entry = match Block::from_value(key.clone(), value) {
                Ok(block) => Entry::Ready(block),
                Err(e) => {
                    let tag = value.get("_type").and_then(Value::as_str);
                    debug!(key = %key, tag = ?tag, error = %e, "stored block rejected");
                    Entry::Rejected(Rejection::new(tag, &e))
                }
            };
            list.order.push(key.clone());
            list.entries.insert(key, entry);
        }
        list
    }

    /// Build a list from already-typed blocks, keeping their order.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        let mut list = Self::new();
        for (index, mut block) in blocks.into_iter().enumerate() {
            if list.entries.contains_key(&block.key) {
                block.key = list.unique_key(&block.key, index);
            }
            list.order.push(block.key.clone());
            list.entries.insert(block.key.clone(), Entry::Ready(block));
        }
        list
    }

    /// Choose the arena key for the stored value at `index`.
    fn key_for(&self, value: &Value, index: usize) -> BlockKey {
        let stored = value
            .get("_key")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|k| !k.is_empty());

        let key = match stored {
            Some(stored) => BlockKey::from(stored),
            None => {
                let key = BlockKey::positional(index);
                debug!(key = %key, "block has no _key; using positional key");
                key
            }
        };

        if self.entries.contains_key(&key) {
            let unique = self.unique_key(&key, index);
            warn!(key = %key, assigned = %unique, "duplicate block _key");
            unique
        } else {
            key
        }
    }

    /// `<key>#<index>`, extended until it collides with nothing in the arena.
    fn unique_key(&self, key: &BlockKey, index: usize) -> BlockKey {
        let mut candidate = BlockKey(format!("{key}#{index}"));
        while self.entries.contains_key(&candidate) {
            candidate.0.push('+');
        }
        candidate
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in render order.
    pub fn keys(&self) -> impl Iterator<Item = &BlockKey> {
        self.order.iter()
    }

    pub fn get(&self, key: &BlockKey) -> Option<&Entry<Block>> {
        self.entries.get(key)
    }

    /// Entries in render order.
    pub fn iter(&self) -> impl Iterator<Item = (&BlockKey, Option<&Entry<Block>>)> {
        self.order.iter().map(|key| (key, self.entries.get(key)))
    }

    /// Successfully parsed blocks in render order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.iter()
            .filter_map(|(_, entry)| entry.and_then(Entry::ready))
    }

    pub fn rejected_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_rejected()).count()
    }
}

/// Accepts any stored value: arrays are parsed, `null`/missing is empty, and
/// anything else is logged and treated as empty.
impl<'de> Deserialize<'de> for BlockList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Array(values)) => BlockList::from_values(&values),
            None | Some(Value::Null) => BlockList::new(),
            Some(other) => {
                warn!(found = %value_kind(&other), "block list is not an array; treating as empty");
                BlockList::new()
            }
        })
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::blocks::{BlockKind, BlockTag, QuoteBlock};
    use serde_json::json;

    fn tags(list: &BlockList) -> Vec<Option<BlockTag>> {
        list.iter()
            .map(|(_, e)| e.and_then(Entry::ready).map(Block::tag))
            .collect()
    }

    #[test]
    fn preserves_stored_order() {
        let list = BlockList::from_values(&[
            json!({ "_type": "quoteBlock", "_key": "z", "quote": "1" }),
            json!({ "_type": "specsBlock", "_key": "a", "items": [] }),
            json!({ "_type": "detailBlock", "_key": "m", "text": "" }),
        ]);
        let keys: Vec<&str> = list.keys().map(BlockKey::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(
            tags(&list),
            vec![
                Some(BlockTag::Quote),
                Some(BlockTag::Specs),
                Some(BlockTag::Detail)
            ]
        );
    }

    #[test]
    fn unknown_tag_kept_in_position() {
        let list = BlockList::from_values(&[
            json!({ "_type": "gridBlock", "_key": "g" }),
            json!({ "_type": "foo", "_key": "f" }),
            json!({ "_type": "quoteBlock", "_key": "q", "quote": "x" }),
        ]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.rejected_count(), 1);
        assert_eq!(
            tags(&list),
            vec![Some(BlockTag::Grid), None, Some(BlockTag::Quote)]
        );
        let Some(Entry::Rejected(rejection)) = list.get(&BlockKey::from("f")) else {
            panic!("expected rejection");
        };
        assert_eq!(rejection.tag.as_deref(), Some("foo"));
        assert!(rejection.reason.contains("unknown block type 'foo'"));
    }

    #[test]
    fn missing_key_gets_positional_key() {
        let list = BlockList::from_values(&[
            json!({ "_type": "quoteBlock", "quote": "a" }),
            json!({ "_type": "quoteBlock", "_key": "", "quote": "b" }),
        ]);
        let keys: Vec<&str> = list.keys().map(BlockKey::as_str).collect();
        assert_eq!(keys, vec!["#0", "#1"]);
    }

    #[test]
    fn duplicate_keys_are_disambiguated() {
        let list = BlockList::from_values(&[
            json!({ "_type": "quoteBlock", "_key": "dup", "quote": "first" }),
            json!({ "_type": "quoteBlock", "_key": "dup", "quote": "second" }),
        ]);
        let keys: Vec<&str> = list.keys().map(BlockKey::as_str).collect();
        assert_eq!(keys, vec!["dup", "dup#1"]);
        assert_eq!(list.blocks().count(), 2);
    }

    #[test]
    fn deserialize_tolerates_null_and_non_arrays() {
        let list: BlockList = serde_json::from_value(json!(null)).unwrap();
        assert!(list.is_empty());
        let list: BlockList = serde_json::from_value(json!("oops")).unwrap();
        assert!(list.is_empty());
        let list: BlockList =
            serde_json::from_value(json!([{ "_type": "quoteBlock", "quote": "hi" }])).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn from_blocks_keeps_order() {
        let quote = |k: &str| {
            Block::new(
                k,
                BlockKind::Quote(QuoteBlock {
                    quote: k.to_string(),
                    author: None,
                }),
            )
        };
        let list = BlockList::from_blocks(vec![quote("b"), quote("a"), quote("b")]);
        let keys: Vec<&str> = list.keys().map(BlockKey::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "b#2"]);
    }
}
