//! Preview rules and the title fallback chain.
//!
//! A preview is the `{title, subtitle, media}` summary shown in authoring
//! lists. The title always follows the same chain: the explicit title field,
//! then a label derived from an array's length, then the variant's default.

use serde::{Deserialize, Serialize};

/// Label derived from the length of an array field, e.g. "4 slides".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountLabel {
    pub field: String,
    pub singular: String,
    pub plural: String,
}

impl CountLabel {
    /// Count label using "item"/"items".
    pub fn items(field: &str) -> Self {
        Self::new(field, "item", "items")
    }

    pub fn new(field: &str, singular: &str, plural: &str) -> Self {
        Self {
            field: field.into(),
            singular: singular.into(),
            plural: plural.into(),
        }
    }

    pub fn format(&self, count: usize) -> String {
        let noun = if count == 1 {
            &self.singular
        } else {
            &self.plural
        };
        format!("{count} {noun}")
    }
}

/// Where a preview finds its media reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaSource {
    /// The previewed object carries the image pair itself.
    Own,
    /// The first item of the named array field carries the image pair.
    FirstItem(String),
}

/// Declarative preview rule for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRule {
    pub title_field: Option<String>,
    pub count: Option<CountLabel>,
    pub subtitle_field: Option<String>,
    pub media: Option<MediaSource>,
    pub default_title: String,
}

impl PreviewRule {
    pub fn new(default_title: &str) -> Self {
        Self {
            title_field: None,
            count: None,
            subtitle_field: None,
            media: None,
            default_title: default_title.into(),
        }
    }

    pub fn title(mut self, field: &str) -> Self {
        self.title_field = Some(field.into());
        self
    }

    pub fn count(mut self, label: CountLabel) -> Self {
        self.count = Some(label);
        self
    }

    pub fn subtitle(mut self, field: &str) -> Self {
        self.subtitle_field = Some(field.into());
        self
    }

    pub fn media(mut self, source: MediaSource) -> Self {
        self.media = Some(source);
        self
    }

    /// Resolve the preview title from already-extracted field values.
    pub fn resolve_title(&self, explicit: Option<&str>, count: Option<usize>) -> String {
        let count_label = self
            .count
            .as_ref()
            .and_then(|label| count_label(label, count));
        fallback_title(explicit, count_label, &self.default_title)
    }
}

/// Count-derived label, present only for a non-empty array.
pub fn count_label(label: &CountLabel, count: Option<usize>) -> Option<String> {
    count.filter(|&n| n > 0).map(|n| label.format(n))
}

/// The title fallback chain: explicit title, then count label, then default.
///
/// Blank explicit titles count as absent.
pub fn fallback_title(explicit: Option<&str>, count_label: Option<String>, default: &str) -> String {
    explicit
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or(count_label)
        .unwrap_or_else(|| default.to_string())
}

/// Reference to the media shown next to a preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaRef {
    Asset(String),
    Url(String),
}

/// Derived summary of a block or section for authoring-side display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub title: String,
    pub subtitle: Option<String>,
    pub media: Option<MediaRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_title_wins() {
        let title = fallback_title(Some("Specs"), Some("3 items".into()), "Specifications");
        assert_eq!(title, "Specs");
    }

    #[test]
    fn count_label_beats_default() {
        let title = fallback_title(None, Some("3 items".into()), "Specifications");
        assert_eq!(title, "3 items");
    }

    #[test]
    fn default_when_nothing_else() {
        assert_eq!(fallback_title(None, None, "Quote"), "Quote");
    }

    #[test]
    fn blank_title_is_absent() {
        let title = fallback_title(Some("   "), Some("2 items".into()), "Grid");
        assert_eq!(title, "2 items");
    }

    #[test]
    fn count_label_singular_and_plural() {
        let label = CountLabel::new("slides", "slide", "slides");
        assert_eq!(label.format(1), "1 slide");
        assert_eq!(label.format(4), "4 slides");
        assert_eq!(CountLabel::items("items").format(0), "0 items");
    }

    #[test]
    fn empty_array_has_no_count_label() {
        let label = CountLabel::items("items");
        assert_eq!(count_label(&label, Some(0)), None);
        assert_eq!(count_label(&label, None), None);
        assert_eq!(count_label(&label, Some(2)), Some("2 items".to_string()));
    }

    #[test]
    fn rule_resolves_full_chain() {
        let rule = PreviewRule::new("Grid")
            .title("title")
            .count(CountLabel::items("items"));
        assert_eq!(rule.resolve_title(Some("Ours"), Some(5)), "Ours");
        assert_eq!(rule.resolve_title(None, Some(5)), "5 items");
        assert_eq!(rule.resolve_title(None, Some(0)), "Grid");
        assert_eq!(rule.resolve_title(None, None), "Grid");
    }

    #[test]
    fn rule_without_count_skips_to_default() {
        let rule = PreviewRule::new("Detail").title("title");
        assert_eq!(rule.resolve_title(None, Some(3)), "Detail");
    }
}
