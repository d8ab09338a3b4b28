//! Document composition.
//!
//! A page is a JSON object whose top-level keys name its sections. The
//! composer maps each known key onto its typed section, keeps the order the
//! keys were stored in, and ignores everything else. The premium-details
//! section is the one composition point: each of its features owns a modal
//! [`BlockList`] drawn from the same catalog as the page blocks.

use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::block_list::{BlockList, Entry, Rejection};
use super::image::ImagePair;
use super::items::{Items, RejectedItem};
use super::serde_ext::nullable;
use crate::error::{ContentError, ContentResult};

/// Authoring bound on hero slides.
pub const HERO_SLIDE_BOUNDS: RangeInclusive<usize> = 3..=10;
/// Authoring bound on premium features.
pub const PREMIUM_FEATURE_COUNT: usize = 9;
/// Authoring bound on process steps.
pub const PROCESS_STEP_COUNT: usize = 6;

/// Top-level keys that carry document metadata rather than sections.
const METADATA_KEYS: &[&str] = &["title", "slug", "seo"];

/// The six named page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionKind {
    Hero,
    Specs,
    PremiumDetails,
    ProcessSteps,
    Faq,
    CallToAction,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Hero,
        SectionKind::Specs,
        SectionKind::PremiumDetails,
        SectionKind::ProcessSteps,
        SectionKind::Faq,
        SectionKind::CallToAction,
    ];

    /// Top-level key in the stored document.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Specs => "specs",
            SectionKind::PremiumDetails => "premiumDetails",
            SectionKind::ProcessSteps => "processSteps",
            SectionKind::Faq => "faq",
            SectionKind::CallToAction => "callToAction",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Hero => "Hero Slideshow",
            SectionKind::Specs => "Specifications",
            SectionKind::PremiumDetails => "Premium Details",
            SectionKind::ProcessSteps => "Process Steps",
            SectionKind::Faq => "FAQ",
            SectionKind::CallToAction => "Call to Action",
        }
    }

    pub fn css_name(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Specs => "specs",
            SectionKind::PremiumDetails => "premium-details",
            SectionKind::ProcessSteps => "process-steps",
            SectionKind::Faq => "faq",
            SectionKind::CallToAction => "call-to-action",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Section field sets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeroSection {
    #[serde(default)]
    pub slides: Items<HeroSlide>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub cta_url: Option<String>,
    #[serde(flatten)]
    pub image: ImagePair,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpecsSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Items<SpecRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpecRow {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
    #[serde(default, deserialize_with = "nullable")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PremiumDetailsSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub features: Items<Feature>,
}

/// A tappable feature card owning a modal sub-document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub teaser: Option<String>,
    #[serde(flatten)]
    pub image: ImagePair,
    #[serde(default)]
    pub modal_content: BlockList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProcessStepsSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub steps: Items<ProcessStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProcessStep {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(flatten)]
    pub image: ImagePair,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FaqSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Items<FaqItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FaqItem {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub question: String,
    /// Rich text (inline HTML).
    #[serde(default, deserialize_with = "nullable")]
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToActionSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub button_label: Option<String>,
    #[serde(default)]
    pub button_url: Option<String>,
}

/// A typed page section.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Hero(HeroSection),
    Specs(SpecsSection),
    PremiumDetails(PremiumDetailsSection),
    ProcessSteps(ProcessStepsSection),
    Faq(FaqSection),
    CallToAction(CallToActionSection),
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Hero(_) => SectionKind::Hero,
            Section::Specs(_) => SectionKind::Specs,
            Section::PremiumDetails(_) => SectionKind::PremiumDetails,
            Section::ProcessSteps(_) => SectionKind::ProcessSteps,
            Section::Faq(_) => SectionKind::Faq,
            Section::CallToAction(_) => SectionKind::CallToAction,
        }
    }

    /// Items of this section's array that could not be parsed.
    pub fn rejected_items(&self) -> &[RejectedItem] {
        match self {
            Section::Hero(hero) => hero.slides.rejected(),
            Section::Specs(specs) => specs.items.rejected(),
            Section::PremiumDetails(premium) => premium.features.rejected(),
            Section::ProcessSteps(steps) => steps.steps.rejected(),
            Section::Faq(faq) => faq.items.rejected(),
            Section::CallToAction(_) => &[],
        }
    }

    pub fn parse(kind: SectionKind, value: &Value) -> ContentResult<Self> {
        if !value.is_object() {
            return Err(ContentError::NotAnObject);
        }
        let malformed = |source| ContentError::Malformed {
            tag: kind.as_str().to_string(),
            source,
        };
        Ok(match kind {
            SectionKind::Hero => Section::Hero(HeroSection::deserialize(value).map_err(malformed)?),
            SectionKind::Specs => {
                Section::Specs(SpecsSection::deserialize(value).map_err(malformed)?)
            }
            SectionKind::PremiumDetails => Section::PremiumDetails(
                PremiumDetailsSection::deserialize(value).map_err(malformed)?,
            ),
            SectionKind::ProcessSteps => {
                Section::ProcessSteps(ProcessStepsSection::deserialize(value).map_err(malformed)?)
            }
            SectionKind::Faq => Section::Faq(FaqSection::deserialize(value).map_err(malformed)?),
            SectionKind::CallToAction => {
                Section::CallToAction(CallToActionSection::deserialize(value).map_err(malformed)?)
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

fn read_slug(value: &Value) -> Option<String> {
    let slug = value
        .as_str()
        .or_else(|| value.get("current").and_then(Value::as_str))?
        .trim();
    (!slug.is_empty()).then(|| slug.to_string())
}

/// A composed page: metadata plus its sections in stored order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: Option<String>,
    /// URL slug, stored either as a string or as `{ "current": "..." }`.
    pub slug: Option<String>,
    order: Vec<SectionKind>,
    sections: HashMap<SectionKind, Entry<Section>>,
}

impl Document {
    /// Compose a document from a stored page value.
    ///
    /// Fails only when the root is not an object. Unknown top-level keys are
    /// ignored, `null` sections are treated as absent, and sections that do
    /// not match their declared shape are kept as rejected entries so the
    /// renderer can report them in place.
    pub fn from_value(value: &Value) -> ContentResult<Self> {
        let root = value.as_object().ok_or(ContentError::NotAnObject)?;
        let mut document = Document {
            title: root
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string),
            slug: root.get("slug").and_then(read_slug),
            ..Document::default()
        };

        for (key, section_value) in root {
            let Some(kind) = SectionKind::parse(key) else {
                if !key.starts_with('_') && !METADATA_KEYS.contains(&key.as_str()) {
                    debug!(key = %key, "ignoring unknown top-level key");
                }
                continue;
            };
            if section_value.is_null() {
                continue;
            }
            let entry = match Section::parse(kind, section_value) {
                Ok(section) => Entry::Ready(section),
                Err(e) => {
                    warn!(section = %kind, error = %e, "section does not match its declared shape");
                    Entry::Rejected(Rejection::new(Some(kind.as_str()), &e))
                }
            };
            document.order.push(kind);
            document.sections.insert(kind, entry);
        }

        Ok(document)
    }

    /// Section kinds present, in stored order.
    pub fn section_order(&self) -> &[SectionKind] {
        &self.order
    }

    pub fn get(&self, kind: SectionKind) -> Option<&Entry<Section>> {
        self.sections.get(&kind)
    }

    /// Sections in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, Option<&Entry<Section>>)> {
        self.order
            .iter()
            .map(|kind| (*kind, self.sections.get(kind)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Build a document from typed sections; later duplicates replace earlier
    /// ones but keep the first position.
    pub fn from_sections(title: Option<&str>, sections: impl IntoIterator<Item = Section>) -> Self {
        let mut document = Document {
            title: title.map(str::to_string),
            ..Document::default()
        };
        for section in sections {
            let kind = section.kind();
            if !document.sections.contains_key(&kind) {
                document.order.push(kind);
            }
            document.sections.insert(kind, Entry::Ready(section));
        }
        document
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::blocks::BlockTag;
    use serde_json::json;

    #[test]
    fn sections_keep_stored_order() {
        let value = json!({
            "title": "Aurora Lamp",
            "faq": { "items": [] },
            "hero": { "slides": [] },
            "callToAction": { "title": "Buy" },
            "specs": { "items": [] }
        });
        let doc = Document::from_value(&value).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Aurora Lamp"));
        assert_eq!(
            doc.section_order(),
            &[
                SectionKind::Faq,
                SectionKind::Hero,
                SectionKind::CallToAction,
                SectionKind::Specs
            ]
        );
    }

    #[test]
    fn unknown_keys_ignored_and_missing_sections_absent() {
        let value = json!({
            "_id": "page-1",
            "_type": "productPage",
            "slug": { "current": "aurora" },
            "newsletter": { "title": "ignored" },
            "hero": null,
            "specs": { "title": "Specs", "items": [{ "label": "Weight", "value": "1 kg" }] }
        });
        let doc = Document::from_value(&value).unwrap();
        assert_eq!(doc.section_order(), &[SectionKind::Specs]);
        assert!(doc.get(SectionKind::Hero).is_none());
        assert_eq!(doc.slug.as_deref(), Some("aurora"));
    }

    #[test]
    fn non_object_root_is_an_error() {
        assert!(matches!(
            Document::from_value(&json!([1, 2])),
            Err(ContentError::NotAnObject)
        ));
    }

    #[test]
    fn malformed_section_is_rejected_in_place() {
        let value = json!({
            "hero": "not an object",
            "specs": { "items": "not a list" },
            "faq": { "items": [] }
        });
        let doc = Document::from_value(&value).unwrap();
        assert_eq!(doc.len(), 3);
        assert!(doc.get(SectionKind::Hero).unwrap().is_rejected());
        assert!(doc.get(SectionKind::Specs).unwrap().is_rejected());
        assert!(!doc.get(SectionKind::Faq).unwrap().is_rejected());
    }

    #[test]
    fn features_own_modal_block_lists() {
        let value = json!({
            "premiumDetails": {
                "title": "Premium",
                "features": [{
                    "_key": "f1",
                    "title": "Battery",
                    "imageUrl": "https://example.com/battery.png",
                    "modalContent": [
                        { "_type": "detailBlock", "_key": "d", "text": "Lasts all day" },
                        { "_type": "mystery", "_key": "m" },
                        { "_type": "quoteBlock", "_key": "q", "quote": "Wow" }
                    ]
                }]
            }
        });
        let doc = Document::from_value(&value).unwrap();
        let Some(Entry::Ready(Section::PremiumDetails(premium))) =
            doc.get(SectionKind::PremiumDetails)
        else {
            panic!("expected premium details");
        };
        let modal = &premium.features[0].modal_content;
        assert_eq!(modal.len(), 3);
        assert_eq!(modal.rejected_count(), 1);
        let tags: Vec<BlockTag> = modal.blocks().map(|b| b.tag()).collect();
        assert_eq!(tags, vec![BlockTag::Detail, BlockTag::Quote]);
    }

    #[test]
    fn malformed_feature_is_set_aside_not_the_section() {
        let value = json!({ "premiumDetails": { "features": [
            { "_key": "a", "title": "Battery", "modalContent": [
                { "_type": "detailBlock", "_key": "d", "text": "All day" }
            ]},
            { "_key": "b", "title": "Glass", "teaser": 42 }
        ]}});
        let doc = Document::from_value(&value).unwrap();
        let Some(Entry::Ready(section @ Section::PremiumDetails(premium))) =
            doc.get(SectionKind::PremiumDetails)
        else {
            panic!("expected premium details");
        };
        assert_eq!(premium.features.len(), 1);
        assert_eq!(premium.features[0].modal_content.len(), 1);
        assert_eq!(section.rejected_items().len(), 1);
        assert_eq!(section.rejected_items()[0].key, "b");
    }

    #[test]
    fn feature_without_modal_content_has_empty_list() {
        let value = json!({ "premiumDetails": { "features": [{ "title": "Plain" }] } });
        let doc = Document::from_value(&value).unwrap();
        let Some(Entry::Ready(Section::PremiumDetails(premium))) =
            doc.get(SectionKind::PremiumDetails)
        else {
            panic!("expected premium details");
        };
        assert!(premium.features[0].modal_content.is_empty());
    }

    #[test]
    fn composing_does_not_mutate_input() {
        let value = json!({
            "hero": { "slides": [{ "title": "One" }] },
            "unknown": 1
        });
        let before = value.clone();
        let _ = Document::from_value(&value).unwrap();
        assert_eq!(value, before);
    }

    #[test]
    fn from_sections_keeps_first_position() {
        let doc = Document::from_sections(
            Some("Page"),
            vec![
                Section::Faq(FaqSection::default()),
                Section::Hero(HeroSection::default()),
                Section::Faq(FaqSection {
                    title: Some("Questions".into()),
                    items: Items::default(),
                }),
            ],
        );
        assert_eq!(doc.section_order(), &[SectionKind::Faq, SectionKind::Hero]);
        let Some(Entry::Ready(Section::Faq(faq))) = doc.get(SectionKind::Faq) else {
            panic!("expected faq");
        };
        assert_eq!(faq.title.as_deref(), Some("Questions"));
    }
}
