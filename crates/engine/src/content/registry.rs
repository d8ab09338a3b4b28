//! Content type registry and authoring-side validation.
//!
//! Provides:
//! - `ContentTypeRegistry`: every known block variant and page section with
//!   its field shape, validation rules, and preview rule
//! - `preview`: the `{title, subtitle, media}` summary used in authoring lists
//! - `validate` / `validate_document`: human-readable rule violations
//!
//! Validation belongs to the authoring boundary. Nothing on the render path
//! calls it; the renderer accepts whatever the content store holds.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use vitrine_schema::prelude::*;

use super::blocks::{BlockTag, read_tag};
use super::catalog::{block_definition, section_definition};
use super::document::SectionKind;
use super::image::{ImagePair, resolve_image};
use super::serde_ext::non_blank;
use crate::render::html::is_safe_url;

/// Longest subtitle shown in a preview before it is cut.
const SUBTITLE_EXCERPT_CHARS: usize = 80;

/// Registry of catalog definitions, keyed by type name.
///
/// Block variants are keyed by their `_type` value and sections by their
/// top-level document key; the two namespaces do not overlap.
#[derive(Debug, Clone)]
pub struct ContentTypeRegistry {
    types: HashMap<String, TypeDefinition>,
}

impl Default for ContentTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Create a registry holding the fifteen block variants and six sections.
    pub fn with_standard_catalog() -> Self {
        let mut registry = Self::new();
        for tag in BlockTag::ALL {
            registry.register(block_definition(tag));
        }
        for kind in SectionKind::ALL {
            registry.register(section_definition(kind));
        }
        registry
    }

    /// Register one catalog entry, replacing any previous definition.
    pub fn register(&mut self, definition: TypeDefinition) {
        self.types.insert(definition.type_name.clone(), definition);
    }

    /// Declare a block variant from its parts.
    pub fn define_variant(
        &mut self,
        tag: BlockTag,
        fields: Vec<FieldDefinition>,
        rules: Vec<ValidationRule>,
        preview: PreviewRule,
    ) {
        let mut definition =
            TypeDefinition::new(tag.as_str(), tag.label(), Scope::Block).preview(preview);
        definition.fields = fields;
        definition.rules = rules;
        self.register(definition);
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeDefinition> {
        self.types.get(type_name)
    }

    pub fn block(&self, tag: BlockTag) -> Option<&TypeDefinition> {
        self.get(tag.as_str())
    }

    pub fn section(&self, kind: SectionKind) -> Option<&TypeDefinition> {
        self.get(kind.as_str())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    /// Definitions with blocks first, then sections, each sorted by name.
    pub fn definitions(&self) -> Vec<&TypeDefinition> {
        let mut definitions: Vec<&TypeDefinition> = self.types.values().collect();
        definitions.sort_by(|a, b| {
            let rank = |d: &TypeDefinition| matches!(d.scope, Scope::Section);
            rank(a)
                .cmp(&rank(b))
                .then_with(|| a.type_name.cmp(&b.type_name))
        });
        definitions
    }

    // -----------------------------------------------------------------------
    // Preview
    // -----------------------------------------------------------------------

    /// Summarize stored data of a registered type.
    pub fn preview(&self, type_name: &str, data: &Value) -> Option<Preview> {
        let rule = &self.get(type_name)?.preview;

        let explicit = rule
            .title_field
            .as_deref()
            .and_then(|field| data.get(field))
            .and_then(Value::as_str);
        let count = rule
            .count
            .as_ref()
            .and_then(|label| data.get(&label.field))
            .and_then(Value::as_array)
            .map(Vec::len);
        let subtitle = rule
            .subtitle_field
            .as_deref()
            .and_then(|field| non_blank(data.get(field).and_then(Value::as_str)))
            .map(excerpt);
        let media = rule
            .media
            .as_ref()
            .and_then(|source| preview_media(source, data));

        Some(Preview {
            title: rule.resolve_title(explicit, count),
            subtitle,
            media,
        })
    }

    /// Summarize a stored block, reading its tag from `_type`.
    pub fn preview_block(&self, value: &Value) -> Option<Preview> {
        let tag = read_tag(value).ok()?;
        self.preview(tag.as_str(), value)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Check data against the rules of a registered type.
    ///
    /// Returns a list of validation messages. An empty list means the data
    /// satisfies every authoring constraint.
    pub fn validate(&self, type_name: &str, data: &Value) -> Vec<String> {
        let mut errors = Vec::new();
        self.validate_into(type_name, type_name, data, &mut errors);
        errors
    }

    /// Check a stored block, reading its tag from `_type`.
    pub fn validate_block(&self, value: &Value) -> Vec<String> {
        let mut errors = Vec::new();
        self.validate_block_into("block", value, &mut errors);
        errors
    }

    /// Check every known section of a stored page, including the modal
    /// blocks of each premium feature.
    pub fn validate_document(&self, document: &Value) -> Vec<String> {
        let Some(root) = document.as_object() else {
            return vec!["document: expected a JSON object".to_string()];
        };
        let mut errors = Vec::new();
        for (key, value) in root {
            let Some(kind) = SectionKind::parse(key) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            self.validate_into(kind.as_str(), kind.as_str(), value, &mut errors);
        }
        errors
    }

    fn validate_into(&self, context: &str, type_name: &str, data: &Value, errors: &mut Vec<String>) {
        let Some(definition) = self.get(type_name) else {
            errors.push(format!("{context}: unknown block type '{type_name}'"));
            return;
        };
        if !data.is_object() {
            errors.push(format!("{context}: expected an object"));
            return;
        }

        for rule in definition.validation_rules() {
            check_rule(context, definition, &rule, data, errors);
        }
        for field in &definition.fields {
            self.check_field(context, field, data, errors);
        }
    }

    fn validate_block_into(&self, context: &str, value: &Value, errors: &mut Vec<String>) {
        match read_tag(value) {
            Ok(tag) => {
                let context = format!("{context}: {tag}");
                self.validate_into(&context, tag.as_str(), value, errors);
            }
            Err(e) => errors.push(format!("{context}: {e}")),
        }
    }

    /// Type checks for one field of `parent`. Absent values pass; presence is
    /// handled by the `Required` rules.
    fn check_field(
        &self,
        context: &str,
        field: &FieldDefinition,
        parent: &Value,
        errors: &mut Vec<String>,
    ) {
        let name = &field.field_name;

        if matches!(field.field_type, FieldType::Image) {
            if let Some(url) = parent.get("imageUrl").and_then(Value::as_str)
                && !url.trim().is_empty()
                && !is_safe_url(url)
            {
                errors.push(format!(
                    "{context}: 'imageUrl' must be an http(s) or root-relative URL"
                ));
            }
            return;
        }

        let Some(value) = parent.get(name).filter(|v| !v.is_null()) else {
            return;
        };

        match &field.field_type {
            FieldType::Text { max_length } => match value.as_str() {
                Some(text) => {
                    if let Some(max) = max_length
                        && text.chars().count() > *max
                    {
                        errors.push(format!(
                            "{context}: '{name}' must be at most {max} characters"
                        ));
                    }
                }
                None => errors.push(format!("{context}: '{name}' must be a string")),
            },
            FieldType::TextLong => {
                if !value.is_string() {
                    errors.push(format!("{context}: '{name}' must be a string"));
                }
            }
            FieldType::RichText => match value.as_str() {
                Some(html) => {
                    if ammonia::clean(html) != html {
                        errors.push(format!(
                            "{context}: '{name}' contains disallowed HTML that will be removed"
                        ));
                    }
                }
                None => errors.push(format!("{context}: '{name}' must be a string")),
            },
            FieldType::StringList => match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        if !item.is_string() {
                            errors.push(format!("{context}: '{name}' item {i} must be a string"));
                        }
                    }
                }
                None => errors.push(format!("{context}: '{name}' must be a list")),
            },
            FieldType::ObjectList(item_fields) => match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        let item_context = format!("{context}: {name}[{i}]");
                        if !item.is_object() {
                            errors.push(format!("{item_context}: expected an object"));
                            continue;
                        }
                        for item_field in item_fields {
                            if item_field.required && !field_present(item_field, item) {
                                errors.push(format!(
                                    "{item_context}: '{}' is required",
                                    item_field.field_name
                                ));
                            }
                            self.check_field(&item_context, item_field, item, errors);
                        }
                    }
                }
                None => errors.push(format!("{context}: '{name}' must be a list")),
            },
            FieldType::Url => match value.as_str() {
                Some(url) if url.trim().is_empty() || is_safe_url(url) => {}
                Some(_) => errors.push(format!(
                    "{context}: '{name}' must be an http(s) or root-relative URL"
                )),
                None => errors.push(format!("{context}: '{name}' must be a string")),
            },
            FieldType::Integer => {
                if value.as_i64().is_none() {
                    errors.push(format!("{context}: '{name}' must be an integer"));
                }
            }
            FieldType::Choice(choices) => match value.as_str() {
                Some(choice) if choices.iter().any(|c| c == choice) => {}
                Some(choice) => errors.push(format!(
                    "{context}: '{name}' must be one of [{}], got '{choice}'",
                    choices.join(", ")
                )),
                None => errors.push(format!("{context}: '{name}' must be a string")),
            },
            FieldType::BlockList => match value.as_array() {
                Some(blocks) => {
                    for (i, block) in blocks.iter().enumerate() {
                        self.validate_block_into(&format!("{context}: {name}[{i}]"), block, errors);
                    }
                }
                None => errors.push(format!("{context}: '{name}' must be a list of blocks")),
            },
            FieldType::Image => {}
        }
    }
}

fn check_rule(
    context: &str,
    definition: &TypeDefinition,
    rule: &ValidationRule,
    data: &Value,
    errors: &mut Vec<String>,
) {
    match rule {
        ValidationRule::Required { field } => {
            let present = match definition.get_field(field) {
                Some(field_def) => field_present(field_def, data),
                None => data.get(field).is_some_and(value_present),
            };
            if !present {
                errors.push(format!("{context}: '{field}' is required"));
            }
        }
        ValidationRule::Count { field, min, max } => {
            let count = data
                .get(field)
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            let too_few = min.is_some_and(|min| count < min);
            let too_many = max.is_some_and(|max| count > max);
            if too_few || too_many {
                let expected = match (min, max) {
                    (Some(min), Some(max)) if min == max => format!("exactly {min}"),
                    (Some(min), Some(max)) => format!("{min}-{max}"),
                    (Some(min), None) => format!("at least {min}"),
                    (None, Some(max)) => format!("at most {max}"),
                    (None, None) => "any number of".to_string(),
                };
                errors.push(format!(
                    "{context}: '{field}' must have {expected} items, found {count}"
                ));
            }
        }
    }
}

/// Whether `parent` holds a usable value for `field`.
fn field_present(field: &FieldDefinition, parent: &Value) -> bool {
    match field.field_type {
        FieldType::Image => ImagePair::deserialize(parent)
            .ok()
            .is_some_and(|pair| resolve_image(&pair).is_some()),
        _ => parent.get(&field.field_name).is_some_and(value_present),
    }
}

fn value_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn preview_media(source: &MediaSource, data: &Value) -> Option<MediaRef> {
    let holder = match source {
        MediaSource::Own => data,
        MediaSource::FirstItem(field) => data.get(field)?.as_array()?.first()?,
    };
    let pair = ImagePair::deserialize(holder).ok()?;
    resolve_image(&pair).map(|source| source.to_media_ref())
}

/// First line of `text`, cut to a preview-sized excerpt.
fn excerpt(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() > SUBTITLE_EXCERPT_CHARS {
        let cut: String = line.chars().take(SUBTITLE_EXCERPT_CHARS - 1).collect();
        format!("{}…", cut.trim_end())
    } else {
        line.to_string()
    }
}
