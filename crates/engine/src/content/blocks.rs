//! The closed block catalog.
//!
//! Each stored block is a JSON object carrying `_type`, `_key`, and a
//! variant-specific field set. [`Block::from_value`] is the validated parse
//! step: it maps `_type` onto [`BlockTag`] and deserializes the fields into
//! the matching typed struct. Renderers only ever see these typed values.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::block_list::BlockKey;
use super::image::ImagePair;
use super::serde_ext::nullable;
use crate::error::{ContentError, ContentResult};

/// Identifier of one of the fifteen block variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockTag {
    Grid,
    Engineering,
    SpecsGrid,
    FeatureCards,
    ImageShowcase,
    Specs,
    Detail,
    Quote,
    Diagram,
    Solution,
    AppDownload,
    HowItWorks,
    Testimonials,
    Philosophy,
    CommercialSpecs,
}

impl BlockTag {
    /// Every variant, in catalog order.
    pub const ALL: [BlockTag; 15] = [
        BlockTag::Grid,
        BlockTag::Engineering,
        BlockTag::SpecsGrid,
        BlockTag::FeatureCards,
        BlockTag::ImageShowcase,
        BlockTag::Specs,
        BlockTag::Detail,
        BlockTag::Quote,
        BlockTag::Diagram,
        BlockTag::Solution,
        BlockTag::AppDownload,
        BlockTag::HowItWorks,
        BlockTag::Testimonials,
        BlockTag::Philosophy,
        BlockTag::CommercialSpecs,
    ];

    /// The `_type` value stored in the content store.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockTag::Grid => "gridBlock",
            BlockTag::Engineering => "engineeringBlock",
            BlockTag::SpecsGrid => "specsGridBlock",
            BlockTag::FeatureCards => "featureCardsBlock",
            BlockTag::ImageShowcase => "imageShowcaseBlock",
            BlockTag::Specs => "specsBlock",
            BlockTag::Detail => "detailBlock",
            BlockTag::Quote => "quoteBlock",
            BlockTag::Diagram => "diagramBlock",
            BlockTag::Solution => "solutionBlock",
            BlockTag::AppDownload => "appDownloadBlock",
            BlockTag::HowItWorks => "howItWorksBlock",
            BlockTag::Testimonials => "testimonialsBlock",
            BlockTag::Philosophy => "philosophyBlock",
            BlockTag::CommercialSpecs => "commercialSpecsBlock",
        }
    }

    /// Human-readable label, also the default preview title.
    pub fn label(self) -> &'static str {
        match self {
            BlockTag::Grid => "Grid",
            BlockTag::Engineering => "Engineering",
            BlockTag::SpecsGrid => "Specs Grid",
            BlockTag::FeatureCards => "Feature Cards",
            BlockTag::ImageShowcase => "Image Showcase",
            BlockTag::Specs => "Specifications",
            BlockTag::Detail => "Detail",
            BlockTag::Quote => "Quote",
            BlockTag::Diagram => "Diagram",
            BlockTag::Solution => "Solution",
            BlockTag::AppDownload => "App Download",
            BlockTag::HowItWorks => "How It Works",
            BlockTag::Testimonials => "Testimonials",
            BlockTag::Philosophy => "Philosophy",
            BlockTag::CommercialSpecs => "Commercial Specs",
        }
    }

    /// Look up a tag by its stored `_type` value.
    pub fn parse(type_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == type_name)
    }

    /// CSS modifier used in rendered markup, e.g. `specs-grid`.
    pub fn css_name(self) -> &'static str {
        match self {
            BlockTag::Grid => "grid",
            BlockTag::Engineering => "engineering",
            BlockTag::SpecsGrid => "specs-grid",
            BlockTag::FeatureCards => "feature-cards",
            BlockTag::ImageShowcase => "image-showcase",
            BlockTag::Specs => "specs",
            BlockTag::Detail => "detail",
            BlockTag::Quote => "quote",
            BlockTag::Diagram => "diagram",
            BlockTag::Solution => "solution",
            BlockTag::AppDownload => "app-download",
            BlockTag::HowItWorks => "how-it-works",
            BlockTag::Testimonials => "testimonials",
            BlockTag::Philosophy => "philosophy",
            BlockTag::CommercialSpecs => "commercial-specs",
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon choices for feature cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureIcon {
    Sun,
    Moon,
    Bolt,
    Leaf,
    Drop,
    Shield,
    Star,
    Heart,
    Sparkles,
}

impl FeatureIcon {
    pub const ALL: [FeatureIcon; 9] = [
        FeatureIcon::Sun,
        FeatureIcon::Moon,
        FeatureIcon::Bolt,
        FeatureIcon::Leaf,
        FeatureIcon::Drop,
        FeatureIcon::Shield,
        FeatureIcon::Star,
        FeatureIcon::Heart,
        FeatureIcon::Sparkles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureIcon::Sun => "sun",
            FeatureIcon::Moon => "moon",
            FeatureIcon::Bolt => "bolt",
            FeatureIcon::Leaf => "leaf",
            FeatureIcon::Drop => "drop",
            FeatureIcon::Shield => "shield",
            FeatureIcon::Star => "star",
            FeatureIcon::Heart => "heart",
            FeatureIcon::Sparkles => "sparkles",
        }
    }

    /// The fixed symbol displayed for this icon.
    pub fn symbol(self) -> &'static str {
        match self {
            FeatureIcon::Sun => "☀️",
            FeatureIcon::Moon => "🌙",
            FeatureIcon::Bolt => "⚡",
            FeatureIcon::Leaf => "🌿",
            FeatureIcon::Drop => "💧",
            FeatureIcon::Shield => "🛡️",
            FeatureIcon::Star => "⭐",
            FeatureIcon::Heart => "❤️",
            FeatureIcon::Sparkles => "✨",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|icon| icon.as_str() == name)
    }
}

/// Any value outside the known icon set, including non-strings, is absent.
fn lenient_icon<'de, D>(deserializer: D) -> Result<Option<FeatureIcon>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(FeatureIcon::parse))
}

// ---------------------------------------------------------------------------
// Variant field sets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<GridItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridItem {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineeringBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<EngineeringItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineeringItem {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub subtitle: String,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(flatten)]
    pub image: ImagePair,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecsGridBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub columns: Vec<SpecsColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecsColumn {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCardsBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<FeatureCard>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCard {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient_icon")]
    pub icon: Option<FeatureIcon>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(flatten)]
    pub image: ImagePair,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageShowcaseBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub images: Vec<ShowcaseImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseImage {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(flatten)]
    pub image: ImagePair,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecsBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub quote: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<SolutionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionItem {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDownloadBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub app_store_url: Option<String>,
    #[serde(default)]
    pub google_play_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HowItWorksBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonialsBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<Testimonial>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub quote: String,
    #[serde(default, deserialize_with = "nullable")]
    pub author: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhilosophyBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommercialSpecsBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<CommercialSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommercialSpec {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
    #[serde(default, deserialize_with = "nullable")]
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// Typed field set of a block, one arm per catalog variant.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Grid(GridBlock),
    Engineering(EngineeringBlock),
    SpecsGrid(SpecsGridBlock),
    FeatureCards(FeatureCardsBlock),
    ImageShowcase(ImageShowcaseBlock),
    Specs(SpecsBlock),
    Detail(DetailBlock),
    Quote(QuoteBlock),
    Diagram(DiagramBlock),
    Solution(SolutionBlock),
    AppDownload(AppDownloadBlock),
    HowItWorks(HowItWorksBlock),
    Testimonials(TestimonialsBlock),
    Philosophy(PhilosophyBlock),
    CommercialSpecs(CommercialSpecsBlock),
}

impl BlockKind {
    pub fn tag(&self) -> BlockTag {
        match self {
            BlockKind::Grid(_) => BlockTag::Grid,
            BlockKind::Engineering(_) => BlockTag::Engineering,
            BlockKind::SpecsGrid(_) => BlockTag::SpecsGrid,
            BlockKind::FeatureCards(_) => BlockTag::FeatureCards,
            BlockKind::ImageShowcase(_) => BlockTag::ImageShowcase,
            BlockKind::Specs(_) => BlockTag::Specs,
            BlockKind::Detail(_) => BlockTag::Detail,
            BlockKind::Quote(_) => BlockTag::Quote,
            BlockKind::Diagram(_) => BlockTag::Diagram,
            BlockKind::Solution(_) => BlockTag::Solution,
            BlockKind::AppDownload(_) => BlockTag::AppDownload,
            BlockKind::HowItWorks(_) => BlockTag::HowItWorks,
            BlockKind::Testimonials(_) => BlockTag::Testimonials,
            BlockKind::Philosophy(_) => BlockTag::Philosophy,
            BlockKind::CommercialSpecs(_) => BlockTag::CommercialSpecs,
        }
    }

    /// Deserialize the field set for `tag` from a stored object.
    pub fn parse(tag: BlockTag, value: &Value) -> Result<Self, serde_json::Error> {
        Ok(match tag {
            BlockTag::Grid => BlockKind::Grid(GridBlock::deserialize(value)?),
            BlockTag::Engineering => BlockKind::Engineering(EngineeringBlock::deserialize(value)?),
            BlockTag::SpecsGrid => BlockKind::SpecsGrid(SpecsGridBlock::deserialize(value)?),
            BlockTag::FeatureCards => {
                BlockKind::FeatureCards(FeatureCardsBlock::deserialize(value)?)
            }
            BlockTag::ImageShowcase => {
                BlockKind::ImageShowcase(ImageShowcaseBlock::deserialize(value)?)
            }
            BlockTag::Specs => BlockKind::Specs(SpecsBlock::deserialize(value)?),
            BlockTag::Detail => BlockKind::Detail(DetailBlock::deserialize(value)?),
            BlockTag::Quote => BlockKind::Quote(QuoteBlock::deserialize(value)?),
            BlockTag::Diagram => BlockKind::Diagram(DiagramBlock::deserialize(value)?),
            BlockTag::Solution => BlockKind::Solution(SolutionBlock::deserialize(value)?),
            BlockTag::AppDownload => BlockKind::AppDownload(AppDownloadBlock::deserialize(value)?),
            BlockTag::HowItWorks => BlockKind::HowItWorks(HowItWorksBlock::deserialize(value)?),
            BlockTag::Testimonials => {
                BlockKind::Testimonials(TestimonialsBlock::deserialize(value)?)
            }
            BlockTag::Philosophy => BlockKind::Philosophy(PhilosophyBlock::deserialize(value)?),
            BlockTag::CommercialSpecs => {
                BlockKind::CommercialSpecs(CommercialSpecsBlock::deserialize(value)?)
            }
        })
    }
}

/// A parsed catalog block with its stable key.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub key: BlockKey,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(key: impl Into<BlockKey>, kind: BlockKind) -> Self {
        Self {
            key: key.into(),
            kind,
        }
    }

    pub fn tag(&self) -> BlockTag {
        self.kind.tag()
    }

    /// Parse a stored block. The caller supplies the key so that positional
    /// and duplicate-key handling stays with the list that owns the block.
    pub fn from_value(key: BlockKey, value: &Value) -> ContentResult<Self> {
        let tag = read_tag(value)?;
        let kind = BlockKind::parse(tag, value).map_err(|source| ContentError::Malformed {
            tag: tag.as_str().to_string(),
            source,
        })?;
        Ok(Self { key, kind })
    }
}

/// Read and resolve the `_type` tag of a stored block.
pub fn read_tag(value: &Value) -> ContentResult<BlockTag> {
    let object = value.as_object().ok_or(ContentError::NotAnObject)?;
    let type_name = object
        .get("_type")
        .and_then(Value::as_str)
        .ok_or(ContentError::MissingTag)?;
    BlockTag::parse(type_name).ok_or_else(|| ContentError::UnknownTag(type_name.to_string()))
}
