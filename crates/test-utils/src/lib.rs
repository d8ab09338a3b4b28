//! Vitrine test utilities.
//!
//! Helpers for integration testing: stored-document fixtures, block and
//! feature builders, and assertion utilities for rendered markup.

use serde_json::{Map, Value as JsonValue, json};

/// Create a stored block with the given tag, key, and fields.
pub fn test_block(block_type: &str, key: &str, fields: JsonValue) -> JsonValue {
    let mut block = Map::new();
    block.insert("_type".to_string(), json!(block_type));
    block.insert("_key".to_string(), json!(key));
    if let JsonValue::Object(fields) = fields {
        block.extend(fields);
    }
    JsonValue::Object(block)
}

/// Create a test page document builder.
pub fn test_document(title: &str) -> TestDocument {
    let mut fields = Map::new();
    fields.insert("_type".to_string(), json!("productPage"));
    fields.insert("title".to_string(), json!(title));
    TestDocument { fields }
}

/// A stored page builder. Sections keep the order they are added in.
#[derive(Debug, Clone)]
pub struct TestDocument {
    fields: Map<String, JsonValue>,
}

impl TestDocument {
    /// Add a section (or any other top-level key).
    pub fn with_section(mut self, name: &str, value: JsonValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Add a hero section with `n` titled slides.
    pub fn with_hero_slides(self, n: usize) -> Self {
        self.with_section("hero", json!({ "slides": slides(n) }))
    }

    /// Add a premium-details section holding the given features.
    pub fn with_features(self, features: Vec<TestFeature>) -> Self {
        let features: Vec<JsonValue> = features.into_iter().map(TestFeature::build).collect();
        self.with_section(
            "premiumDetails",
            json!({ "title": "Premium details", "features": features }),
        )
    }

    /// Add a process-steps section with `n` titled steps.
    pub fn with_process_steps(self, n: usize) -> Self {
        let steps: Vec<JsonValue> = (0..n)
            .map(|i| json!({ "_key": format!("step{i}"), "title": format!("Step {}", i + 1) }))
            .collect();
        self.with_section("processSteps", json!({ "steps": steps }))
    }

    pub fn build(self) -> JsonValue {
        JsonValue::Object(self.fields)
    }
}

/// Create a premium feature builder.
pub fn test_feature(key: &str, title: &str) -> TestFeature {
    TestFeature {
        fields: json!({ "_key": key, "title": title }),
    }
}

/// A premium feature builder.
#[derive(Debug, Clone)]
pub struct TestFeature {
    fields: JsonValue,
}

impl TestFeature {
    /// Add a single field.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        if let Some(obj) = self.fields.as_object_mut() {
            obj.insert(name.to_string(), value);
        }
        self
    }

    /// Attach an uploaded asset image.
    pub fn with_asset(self, reference: &str) -> Self {
        self.with_field("image", asset_image(reference))
    }

    /// Attach a plain image URL.
    pub fn with_image_url(self, url: &str) -> Self {
        self.with_field("imageUrl", json!(url))
    }

    /// Set the modal content blocks.
    pub fn with_modal(self, blocks: Vec<JsonValue>) -> Self {
        self.with_field("modalContent", JsonValue::Array(blocks))
    }

    pub fn build(self) -> JsonValue {
        self.fields
    }
}

/// `n` features keyed `f0..`, each without modal content.
pub fn features(n: usize) -> Vec<TestFeature> {
    (0..n)
        .map(|i| test_feature(&format!("f{i}"), &format!("Feature {}", i + 1)))
        .collect()
}

/// `n` hero slides keyed `s0..`.
pub fn slides(n: usize) -> Vec<JsonValue> {
    (0..n)
        .map(|i| json!({ "_key": format!("s{i}"), "title": format!("Slide {}", i + 1) }))
        .collect()
}

/// Stored uploaded-image object for an asset reference.
pub fn asset_image(reference: &str) -> JsonValue {
    json!({ "_type": "image", "asset": { "_type": "reference", "_ref": reference } })
}

/// The three image-pair shapes: both sources, URL only, and neither.
pub mod image_pairs {
    use serde_json::{Value, json};

    use super::asset_image;

    pub const ASSET_REF: &str = "image-abc123-800x600-png";
    pub const PLAIN_URL: &str = "https://example.com/plain.png";

    /// Merge an image pair into an object.
    fn with_pair(mut item: Value, pair: Value) -> Value {
        if let (Some(obj), Value::Object(pair)) = (item.as_object_mut(), pair) {
            obj.extend(pair);
        }
        item
    }

    pub fn both(item: Value) -> Value {
        with_pair(
            item,
            json!({ "image": asset_image(ASSET_REF), "imageUrl": PLAIN_URL }),
        )
    }

    pub fn url_only(item: Value) -> Value {
        with_pair(item, json!({ "imageUrl": PLAIN_URL }))
    }

    pub fn neither(item: Value) -> Value {
        item
    }
}

/// Assertion helpers for rendered markup.
pub mod assert {
    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that the needles appear in the haystack in the given order.
    pub fn in_order(haystack: &str, needles: &[&str]) {
        let mut from = 0;
        for needle in needles {
            match haystack[from..].find(needle) {
                Some(pos) => from += pos + needle.len(),
                None => panic!(
                    "Expected '{needle}' after byte {from} (order {needles:?})\nActual: {haystack}"
                ),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_block_merges_fields() {
        let block = test_block("quoteBlock", "q1", json!({ "quote": "Hi" }));
        assert_eq!(block["_type"], "quoteBlock");
        assert_eq!(block["_key"], "q1");
        assert_eq!(block["quote"], "Hi");
    }

    #[test]
    fn test_document_keeps_section_order() {
        let doc = test_document("Lamp")
            .with_section("faq", json!({}))
            .with_hero_slides(3)
            .build();
        let keys: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["_type", "title", "faq", "hero"]);
        assert_eq!(doc["hero"]["slides"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_feature_builder() {
        let feature = test_feature("f1", "Battery")
            .with_asset("image-a-1x1-png")
            .with_modal(vec![test_block("detailBlock", "d", json!({ "text": "x" }))])
            .build();
        assert_eq!(feature["image"]["asset"]["_ref"], "image-a-1x1-png");
        assert_eq!(feature["modalContent"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_image_pairs() {
        let both = image_pairs::both(json!({ "title": "t" }));
        assert_eq!(both["imageUrl"], image_pairs::PLAIN_URL);
        assert!(image_pairs::url_only(json!({})).get("image").is_none());
    }

    #[test]
    fn test_in_order() {
        assert::in_order("a b c", &["a", "c"]);
    }

    #[test]
    #[should_panic]
    fn test_in_order_fails_when_reversed() {
        assert::in_order("a b c", &["c", "a"]);
    }
}
