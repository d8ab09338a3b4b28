//! Standard catalog definitions.
//!
//! One definition per block variant and per page section. Both functions
//! match exhaustively, so adding a variant without declaring its fields is a
//! compile error.

use vitrine_schema::prelude::*;

use super::blocks::{BlockTag, FeatureIcon};
use super::document::{
    HERO_SLIDE_BOUNDS, PREMIUM_FEATURE_COUNT, PROCESS_STEP_COUNT, SectionKind,
};

fn text(name: &str) -> FieldDefinition {
    FieldDefinition::new(name, FieldType::Text { max_length: None })
}

fn title() -> FieldDefinition {
    text("title").label("Title")
}

fn long_text(name: &str) -> FieldDefinition {
    FieldDefinition::new(name, FieldType::TextLong)
}

fn string_list(name: &str) -> FieldDefinition {
    FieldDefinition::new(name, FieldType::StringList)
}

fn object_list(name: &str, item: Vec<FieldDefinition>) -> FieldDefinition {
    FieldDefinition::new(name, FieldType::ObjectList(item))
}

fn image() -> FieldDefinition {
    FieldDefinition::new("image", FieldType::Image).label("Image")
}

fn url(name: &str) -> FieldDefinition {
    FieldDefinition::new(name, FieldType::Url)
}

fn icon_choice() -> FieldDefinition {
    let values = FeatureIcon::ALL
        .iter()
        .map(|icon| icon.as_str().to_string())
        .collect();
    FieldDefinition::new("icon", FieldType::Choice(values)).label("Icon")
}

/// Fields, rules, and preview rule for one block variant.
pub fn block_definition(tag: BlockTag) -> TypeDefinition {
    let def = TypeDefinition::new(tag.as_str(), tag.label(), Scope::Block);
    let preview = PreviewRule::new(tag.label());

    match tag {
        BlockTag::Grid => def
            .field(title())
            .field(
                object_list(
                    "items",
                    vec![
                        text("title").label("Title").required(),
                        string_list("bullets").label("Bullets"),
                    ],
                )
                .label("Items"),
            )
            .preview(preview.title("title").count(CountLabel::items("items"))),

        BlockTag::Engineering => def
            .field(title())
            .field(
                object_list(
                    "items",
                    vec![
                        text("subtitle").label("Subtitle").required(),
                        long_text("text").label("Text"),
                        image(),
                    ],
                )
                .label("Items"),
            )
            .preview(
                preview
                    .title("title")
                    .count(CountLabel::items("items"))
                    .media(MediaSource::FirstItem("items".into())),
            ),

        BlockTag::SpecsGrid => def
            .field(
                object_list(
                    "columns",
                    vec![
                        text("title").label("Column title").required(),
                        string_list("items").label("Items"),
                    ],
                )
                .label("Columns"),
            )
            .preview(preview.count(CountLabel::new("columns", "column", "columns"))),

        BlockTag::FeatureCards => def
            .field(
                object_list(
                    "items",
                    vec![
                        icon_choice(),
                        text("title").label("Title").required(),
                        long_text("text").label("Text"),
                        image(),
                    ],
                )
                .label("Cards"),
            )
            .preview(
                preview
                    .count(CountLabel::new("items", "card", "cards"))
                    .media(MediaSource::FirstItem("items".into())),
            ),

        BlockTag::ImageShowcase => def
            .field(title())
            .field(
                object_list("images", vec![image(), text("caption").label("Caption")])
                    .label("Images"),
            )
            .preview(
                preview
                    .title("title")
                    .count(CountLabel::new("images", "image", "images"))
                    .media(MediaSource::FirstItem("images".into())),
            ),

        BlockTag::Specs => def
            .field(title())
            .field(string_list("items").label("Items"))
            .preview(preview.title("title").count(CountLabel::items("items"))),

        BlockTag::Detail => def
            .field(title())
            .field(long_text("text").label("Text").required())
            .preview(preview.title("title").subtitle("text")),

        BlockTag::Quote => def
            .field(long_text("quote").label("Quote").required())
            .field(text("author").label("Author"))
            .preview(preview.title("quote").subtitle("author")),

        BlockTag::Diagram => def
            .field(title())
            .field(string_list("steps").label("Steps"))
            .preview(
                preview
                    .title("title")
                    .count(CountLabel::new("steps", "step", "steps")),
            ),

        BlockTag::Solution => def
            .field(
                object_list(
                    "items",
                    vec![
                        text("title").label("Title").required(),
                        long_text("text").label("Text"),
                    ],
                )
                .label("Solutions"),
            )
            .preview(preview.count(CountLabel::new("items", "solution", "solutions"))),

        BlockTag::AppDownload => def
            .field(title())
            .field(text("subtitle").label("Subtitle"))
            .field(url("appStoreUrl").label("App Store URL"))
            .field(url("googlePlayUrl").label("Google Play URL"))
            .preview(preview.title("title").subtitle("subtitle")),

        BlockTag::HowItWorks => def
            .field(title())
            .field(string_list("steps").label("Steps"))
            .preview(
                preview
                    .title("title")
                    .count(CountLabel::new("steps", "step", "steps")),
            ),

        BlockTag::Testimonials => def
            .field(title())
            .field(
                object_list(
                    "items",
                    vec![
                        long_text("quote").label("Quote").required(),
                        text("author").label("Author").required(),
                    ],
                )
                .label("Testimonials"),
            )
            .preview(
                preview
                    .title("title")
                    .count(CountLabel::new("items", "testimonial", "testimonials")),
            ),

        BlockTag::Philosophy => def
            .field(title())
            .field(long_text("text").label("Text").required())
            .preview(preview.title("title").subtitle("text")),

        BlockTag::CommercialSpecs => def
            .field(title())
            .field(
                object_list(
                    "items",
                    vec![
                        text("label").label("Spec label").required(),
                        long_text("detail").label("Detail"),
                    ],
                )
                .label("Specs"),
            )
            .preview(
                preview
                    .title("title")
                    .count(CountLabel::new("items", "spec", "specs")),
            ),
    }
}

/// Fields, rules, and preview rule for one page section.
pub fn section_definition(kind: SectionKind) -> TypeDefinition {
    let def = TypeDefinition::new(kind.as_str(), kind.label(), Scope::Section);
    let preview = PreviewRule::new(kind.label());

    match kind {
        SectionKind::Hero => def
            .field(
                object_list(
                    "slides",
                    vec![
                        text("title").label("Title").required(),
                        text("subtitle").label("Subtitle"),
                        text("ctaLabel").label("Button label"),
                        url("ctaUrl").label("Button URL"),
                        image(),
                    ],
                )
                .label("Slides"),
            )
            .rule(ValidationRule::count_between(
                "slides",
                *HERO_SLIDE_BOUNDS.start(),
                *HERO_SLIDE_BOUNDS.end(),
            ))
            .preview(
                preview
                    .count(CountLabel::new("slides", "slide", "slides"))
                    .media(MediaSource::FirstItem("slides".into())),
            ),

        SectionKind::Specs => def
            .field(title())
            .field(
                object_list(
                    "items",
                    vec![
                        text("label").label("Label").required(),
                        text("value").label("Value").required(),
                    ],
                )
                .label("Specs"),
            )
            .preview(
                preview
                    .title("title")
                    .count(CountLabel::new("items", "spec", "specs")),
            ),

        SectionKind::PremiumDetails => def
            .field(title())
            .field(text("subtitle").label("Subtitle"))
            .field(
                object_list(
                    "features",
                    vec![
                        text("title").label("Title").required(),
                        text("teaser").label("Teaser"),
                        image(),
                        FieldDefinition::new("modalContent", FieldType::BlockList)
                            .label("Modal content"),
                    ],
                )
                .label("Features"),
            )
            .rule(ValidationRule::exact_count(
                "features",
                PREMIUM_FEATURE_COUNT,
            ))
            .preview(
                preview
                    .title("title")
                    .count(CountLabel::new("features", "feature", "features"))
                    .subtitle("subtitle")
                    .media(MediaSource::FirstItem("features".into())),
            ),

        SectionKind::ProcessSteps => def
            .field(title())
            .field(
                object_list(
                    "steps",
                    vec![
                        text("title").label("Title").required(),
                        long_text("text").label("Text"),
                        image(),
                    ],
                )
                .label("Steps"),
            )
            .rule(ValidationRule::exact_count("steps", PROCESS_STEP_COUNT))
            .preview(
                preview
                    .title("title")
                    .count(CountLabel::new("steps", "step", "steps"))
                    .media(MediaSource::FirstItem("steps".into())),
            ),

        SectionKind::Faq => def
            .field(title())
            .field(
                object_list(
                    "items",
                    vec![
                        text("question").label("Question").required(),
                        FieldDefinition::new("answer", FieldType::RichText)
                            .label("Answer")
                            .required(),
                    ],
                )
                .label("Questions"),
            )
            .preview(
                preview
                    .title("title")
                    .count(CountLabel::new("items", "question", "questions")),
            ),

        SectionKind::CallToAction => def
            .field(title())
            .field(long_text("text").label("Text"))
            .field(text("buttonLabel").label("Button label"))
            .field(url("buttonUrl").label("Button URL"))
            .preview(preview.title("title").subtitle("text")),
    }
}
