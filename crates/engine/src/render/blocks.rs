//! Per-variant block renderers.
//!
//! Each renderer is a pure function of its typed field set. Optional fields
//! that are absent or blank are omitted; required fields that are missing
//! were already defaulted to empty values by the parse step.

use super::RenderContext;
use super::html::{html_escape, multiline, safe_url, text};
use crate::content::blocks::*;

/// Render one block's markup. The match is exhaustive over the catalog.
pub fn render_block(kind: &BlockKind, ctx: &RenderContext<'_>) -> String {
    match kind {
        BlockKind::Grid(block) => render_grid(block),
        BlockKind::Engineering(block) => render_engineering(block, ctx),
        BlockKind::SpecsGrid(block) => render_specs_grid(block),
        BlockKind::FeatureCards(block) => render_feature_cards(block, ctx),
        BlockKind::ImageShowcase(block) => render_image_showcase(block, ctx),
        BlockKind::Specs(block) => render_specs(block),
        BlockKind::Detail(block) => render_detail(block),
        BlockKind::Quote(block) => render_quote(block),
        BlockKind::Diagram(block) => render_diagram(block),
        BlockKind::Solution(block) => render_solution(block),
        BlockKind::AppDownload(block) => render_app_download(block),
        BlockKind::HowItWorks(block) => render_how_it_works(block),
        BlockKind::Testimonials(block) => render_testimonials(block),
        BlockKind::Philosophy(block) => render_philosophy(block),
        BlockKind::CommercialSpecs(block) => render_commercial_specs(block),
    }
}

/// `<h2>` for an optional title; empty when the title is absent or blank.
pub(super) fn heading(title: Option<&str>, class: &str) -> String {
    text(title)
        .map(|t| format!("<h2 class=\"{class}__title\">{t}</h2>\n"))
        .unwrap_or_default()
}

/// `<p>` holding long text with its line breaks, or nothing for blank text.
pub(super) fn paragraph(body: &str, class: &str) -> String {
    if body.trim().is_empty() {
        return String::new();
    }
    format!("<p class=\"{class}\">{}</p>\n", multiline(body))
}

// ---------------------------------------------------------------------------
// Individual block renderers
// ---------------------------------------------------------------------------

/// Titled items, each with an optional bullet list.
fn render_grid(block: &GridBlock) -> String {
    let mut html = String::from("<section class=\"grid\">\n");
    html.push_str(&heading(block.title.as_deref(), "grid"));
    html.push_str("<div class=\"grid__items\">\n");
    for item in &block.items {
        html.push_str("<div class=\"grid__item\">\n");
        html.push_str(&format!(
            "<h3 class=\"grid__item-title\">{}</h3>\n",
            html_escape(&item.title)
        ));
        if !item.bullets.is_empty() {
            html.push_str("<ul class=\"grid__bullets\">\n");
            for bullet in &item.bullets {
                html.push_str(&format!("<li>{}</li>\n", html_escape(bullet)));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</section>\n");
    html
}

/// Alternating image/text rows: even positions put the image on the left.
fn render_engineering(block: &EngineeringBlock, ctx: &RenderContext<'_>) -> String {
    let mut html = String::from("<section class=\"engineering\">\n");
    html.push_str(&heading(block.title.as_deref(), "engineering"));
    for (index, item) in block.items.iter().enumerate() {
        let side = if index % 2 == 0 {
            "image-left"
        } else {
            "image-right"
        };
        html.push_str(&format!(
            "<div class=\"engineering__item engineering__item--{side}\">\n"
        ));
        if let Some(img) = ctx.image_tag(&item.image, "engineering__image", &item.subtitle) {
            html.push_str(&format!("<div class=\"engineering__media\">{img}</div>\n"));
        }
        html.push_str("<div class=\"engineering__body\">\n");
        html.push_str(&format!(
            "<h3 class=\"engineering__subtitle\">{}</h3>\n",
            html_escape(&item.subtitle)
        ));
        html.push_str(&paragraph(&item.text, "engineering__text"));
        html.push_str("</div>\n</div>\n");
    }
    html.push_str("</section>\n");
    html
}

fn render_specs_grid(block: &SpecsGridBlock) -> String {
    let mut html = String::from("<div class=\"specs-grid\">\n");
    for column in &block.columns {
        html.push_str("<div class=\"specs-grid__column\">\n");
        html.push_str(&format!(
            "<h3 class=\"specs-grid__column-title\">{}</h3>\n",
            html_escape(&column.title)
        ));
        html.push_str("<ul class=\"specs-grid__items\">\n");
        for item in &column.items {
            html.push_str(&format!("<li>{}</li>\n", html_escape(item)));
        }
        html.push_str("</ul>\n</div>\n");
    }
    html.push_str("</div>\n");
    html
}

fn render_feature_cards(block: &FeatureCardsBlock, ctx: &RenderContext<'_>) -> String {
    let mut html = String::from("<div class=\"feature-cards\">\n");
    for card in &block.items {
        html.push_str("<article class=\"feature-card\">\n");
        if let Some(img) = ctx.image_tag(&card.image, "feature-card__image", &card.title) {
            html.push_str(&img);
            html.push('\n');
        }
        let icon = card
            .icon
            .map(|icon| {
                format!(
                    "<span class=\"feature-card__icon\" aria-hidden=\"true\">{}</span> ",
                    icon.symbol()
                )
            })
            .unwrap_or_default();
        html.push_str(&format!(
            "<h3 class=\"feature-card__title\">{icon}{}</h3>\n",
            html_escape(&card.title)
        ));
        html.push_str(&paragraph(&card.text, "feature-card__text"));
        html.push_str("</article>\n");
    }
    html.push_str("</div>\n");
    html
}

fn render_image_showcase(block: &ImageShowcaseBlock, ctx: &RenderContext<'_>) -> String {
    let mut html = String::from("<section class=\"image-showcase\">\n");
    html.push_str(&heading(block.title.as_deref(), "image-showcase"));
    html.push_str("<div class=\"image-showcase__images\">\n");
    for image in &block.images {
        let caption = text(image.caption.as_deref());
        html.push_str("<figure class=\"image-showcase__item\">\n");
        let alt = image.caption.as_deref().unwrap_or_default();
        if let Some(img) = ctx.image_tag(&image.image, "image-showcase__image", alt) {
            html.push_str(&img);
            html.push('\n');
        }
        if let Some(caption) = caption {
            html.push_str(&format!("<figcaption>{caption}</figcaption>\n"));
        }
        html.push_str("</figure>\n");
    }
    html.push_str("</div>\n</section>\n");
    html
}

/// Checkmark bullet per item.
fn render_specs(block: &SpecsBlock) -> String {
    let mut html = String::from("<section class=\"specs\">\n");
    html.push_str(&heading(block.title.as_deref(), "specs"));
    html.push_str("<ul class=\"specs__list\">\n");
    for item in &block.items {
        html.push_str(&format!(
            "<li class=\"specs__item\"><span class=\"specs__check\" aria-hidden=\"true\">✓</span> {}</li>\n",
            html_escape(item)
        ));
    }
    html.push_str("</ul>\n</section>\n");
    html
}

fn render_detail(block: &DetailBlock) -> String {
    let mut html = String::from("<section class=\"detail\">\n");
    html.push_str(&heading(block.title.as_deref(), "detail"));
    html.push_str(&paragraph(&block.text, "detail__text"));
    html.push_str("</section>\n");
    html
}

/// Quoted text; the attribution line appears only with an author.
fn render_quote(block: &QuoteBlock) -> String {
    let mut html = format!(
        "<blockquote class=\"quote\">\n<p class=\"quote__text\">“{}”</p>\n",
        multiline(block.quote.trim())
    );
    if let Some(author) = text(block.author.as_deref()) {
        html.push_str(&format!("<footer class=\"quote__author\">— {author}</footer>\n"));
    }
    html.push_str("</blockquote>\n");
    html
}

/// Arrow bullet per step, in stored order.
fn render_diagram(block: &DiagramBlock) -> String {
    let mut html = String::from("<section class=\"diagram\">\n");
    html.push_str(&heading(block.title.as_deref(), "diagram"));
    html.push_str("<ul class=\"diagram__steps\">\n");
    for step in &block.steps {
        html.push_str(&format!(
            "<li class=\"diagram__step\"><span class=\"diagram__arrow\" aria-hidden=\"true\">→</span> {}</li>\n",
            html_escape(step)
        ));
    }
    html.push_str("</ul>\n</section>\n");
    html
}

fn render_solution(block: &SolutionBlock) -> String {
    let mut html = String::from("<div class=\"solution\">\n");
    for item in &block.items {
        html.push_str("<div class=\"solution__item solution__item--bordered\">\n");
        html.push_str(&format!(
            "<h3 class=\"solution__title\">{}</h3>\n",
            html_escape(&item.title)
        ));
        html.push_str(&paragraph(&item.text, "solution__text"));
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
    html
}

/// Each store button appears only when its link is present and safe.
fn render_app_download(block: &AppDownloadBlock) -> String {
    let mut html = String::from("<section class=\"app-download\">\n");
    html.push_str(&heading(block.title.as_deref(), "app-download"));
    if let Some(subtitle) = text(block.subtitle.as_deref()) {
        html.push_str(&format!("<p class=\"app-download__subtitle\">{subtitle}</p>\n"));
    }
    html.push_str("<div class=\"app-download__buttons\">\n");
    let stores = [
        (block.app_store_url.as_deref(), "app-store", "Download on the App Store"),
        (block.google_play_url.as_deref(), "google-play", "Get it on Google Play"),
    ];
    for (url, modifier, label) in stores {
        if let Some(url) = safe_url(url) {
            html.push_str(&format!(
                "<a class=\"app-download__button app-download__button--{modifier}\" href=\"{}\" rel=\"noopener\">{label}</a>\n",
                html_escape(url)
            ));
        }
    }
    html.push_str("</div>\n</section>\n");
    html
}

/// Numbered steps; the number is the step's position.
fn render_how_it_works(block: &HowItWorksBlock) -> String {
    let mut html = String::from("<section class=\"how-it-works\">\n");
    html.push_str(&heading(block.title.as_deref(), "how-it-works"));
    html.push_str("<ol class=\"how-it-works__steps\">\n");
    for (index, step) in block.steps.iter().enumerate() {
        let number = index + 1;
        html.push_str(&format!(
            "<li class=\"how-it-works__step\" value=\"{number}\"><span class=\"how-it-works__number\">{number}</span> {}</li>\n",
            html_escape(step)
        ));
    }
    html.push_str("</ol>\n</section>\n");
    html
}

/// The author line is always shown, and the items region is always present.
fn render_testimonials(block: &TestimonialsBlock) -> String {
    let mut html = String::from("<section class=\"testimonials\">\n");
    html.push_str(&heading(block.title.as_deref(), "testimonials"));
    html.push_str("<div class=\"testimonials__items\">\n");
    for item in &block.items {
        html.push_str(&format!(
            "<figure class=\"testimonial\">\n<blockquote class=\"testimonial__quote\">“{}”</blockquote>\n<figcaption class=\"testimonial__author\">— {}</figcaption>\n</figure>\n",
            multiline(item.quote.trim()),
            html_escape(item.author.trim())
        ));
    }
    html.push_str("</div>\n</section>\n");
    html
}

fn render_philosophy(block: &PhilosophyBlock) -> String {
    let mut html = String::from("<section class=\"philosophy\">\n");
    html.push_str(&heading(block.title.as_deref(), "philosophy"));
    html.push_str("<div class=\"philosophy__text\">\n");
    html.push_str(&paragraph(&block.text, "philosophy__paragraph"));
    html.push_str("</div>\n</section>\n");
    html
}

fn render_commercial_specs(block: &CommercialSpecsBlock) -> String {
    let mut html = String::from("<section class=\"commercial-specs\">\n");
    html.push_str(&heading(block.title.as_deref(), "commercial-specs"));
    html.push_str("<div class=\"commercial-specs__items\">\n");
    for spec in &block.items {
        html.push_str("<div class=\"commercial-specs__item commercial-specs__item--boxed\">\n");
        html.push_str(&format!(
            "<h3 class=\"commercial-specs__label\">{}</h3>\n",
            html_escape(&spec.label)
        ));
        html.push_str(&paragraph(&spec.detail, "commercial-specs__detail"));
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</section>\n");
    html
}
