//! Field and type definitions for the content catalog.
//!
//! A [`TypeDefinition`] is one catalog entry: a block variant or a page
//! section. It lists its fields, the validation rules the authoring tool
//! enforces, and the preview rule used outside of rendering.

use serde::{Deserialize, Serialize};

use crate::preview::PreviewRule;

/// Semantic type of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Single-line text.
    Text { max_length: Option<usize> },
    /// Multi-line plain text; line breaks are significant.
    TextLong,
    /// Inline HTML, sanitized before display.
    RichText,
    /// Ordered list of strings.
    StringList,
    /// Ordered list of objects with the given item shape.
    ObjectList(Vec<FieldDefinition>),
    /// Image offered as an uploaded asset reference and/or a plain URL.
    Image,
    /// External link.
    Url,
    Integer,
    /// One of a fixed set of string values.
    Choice(Vec<String>),
    /// Ordered list of catalog blocks (modal content).
    BlockList,
}

impl FieldType {
    /// Short human-readable name used in catalog listings.
    pub fn describe(&self) -> String {
        match self {
            FieldType::Text { max_length: Some(n) } => format!("text(max {n})"),
            FieldType::Text { max_length: None } => "text".to_string(),
            FieldType::TextLong => "long text".to_string(),
            FieldType::RichText => "rich text".to_string(),
            FieldType::StringList => "string list".to_string(),
            FieldType::ObjectList(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.field_name.as_str()).collect();
                format!("list of {{{}}}", names.join(", "))
            }
            FieldType::Image => "image-or-url".to_string(),
            FieldType::Url => "url".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::Choice(values) => format!("one of [{}]", values.join(", ")),
            FieldType::BlockList => "block list".to_string(),
        }
    }

    /// Whether values of this type are stored as JSON arrays.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            FieldType::StringList | FieldType::ObjectList(_) | FieldType::BlockList
        )
    }
}

/// A single field within a type definition.
///
/// `field_name` is the key used in the content store; image fields are stored
/// as the pair `image` / `imageUrl` and are declared once under `image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub field_name: String,
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

impl FieldDefinition {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            field_name: name.into(),
            field_type,
            label: name.into(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.into();
        self
    }
}

/// An authoring-time constraint on a type's data.
///
/// Rules are enforced by the authoring tool. The render path never rejects
/// content because of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationRule {
    /// The field must be present and non-empty.
    Required { field: String },
    /// The array field's length must fall within the inclusive bounds.
    Count {
        field: String,
        min: Option<usize>,
        max: Option<usize>,
    },
}

impl ValidationRule {
    pub fn required(field: &str) -> Self {
        ValidationRule::Required {
            field: field.into(),
        }
    }

    pub fn count_between(field: &str, min: usize, max: usize) -> Self {
        ValidationRule::Count {
            field: field.into(),
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn exact_count(field: &str, n: usize) -> Self {
        Self::count_between(field, n, n)
    }

    /// Field this rule applies to.
    pub fn field(&self) -> &str {
        match self {
            ValidationRule::Required { field } | ValidationRule::Count { field, .. } => field,
        }
    }

    /// Human-readable summary, e.g. "slides: 3-10 items".
    pub fn describe(&self) -> String {
        match self {
            ValidationRule::Required { field } => format!("{field}: required"),
            ValidationRule::Count {
                field,
                min: Some(min),
                max: Some(max),
            } if min == max => format!("{field}: exactly {min} items"),
            ValidationRule::Count {
                field,
                min: Some(min),
                max: Some(max),
            } => format!("{field}: {min}-{max} items"),
            ValidationRule::Count {
                field,
                min: Some(min),
                max: None,
            } => format!("{field}: at least {min} items"),
            ValidationRule::Count {
                field,
                min: None,
                max: Some(max),
            } => format!("{field}: at most {max} items"),
            ValidationRule::Count {
                field,
                min: None,
                max: None,
            } => format!("{field}: any number of items"),
        }
    }
}

/// Where a type may appear in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// A catalog block, usable inside modal content.
    Block,
    /// A named top-level page section.
    Section,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Identifier stored in `_type` (blocks) or the top-level key (sections).
    pub type_name: String,
    pub label: String,
    pub scope: Scope,
    pub fields: Vec<FieldDefinition>,
    pub rules: Vec<ValidationRule>,
    pub preview: PreviewRule,
}

impl TypeDefinition {
    pub fn new(type_name: &str, label: &str, scope: Scope) -> Self {
        Self {
            type_name: type_name.into(),
            label: label.into(),
            scope,
            fields: Vec::new(),
            rules: Vec::new(),
            preview: PreviewRule::new(label),
        }
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn preview(mut self, preview: PreviewRule) -> Self {
        self.preview = preview;
        self
    }

    /// Look up a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    /// Every rule that applies to this type: the explicit rules followed by a
    /// `Required` rule for each field marked required without one.
    pub fn validation_rules(&self) -> Vec<ValidationRule> {
        let mut rules = self.rules.clone();
        for field in self.fields.iter().filter(|f| f.required) {
            let covered = rules.iter().any(|r| {
                matches!(r, ValidationRule::Required { field: name } if *name == field.field_name)
            });
            if !covered {
                rules.push(ValidationRule::required(&field.field_name));
            }
        }
        rules
    }
}
