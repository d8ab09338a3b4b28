//! Page section renderers.
//!
//! Sections wrap their markup in `<section class="section section--{name}">`.
//! Counted arrays (slides, features, steps) render whatever is present.

use tracing::warn;

use super::blocks::{heading, paragraph};
use super::dispatch::render_blocks;
use super::html::{html_escape, multiline, safe_url, sanitize_rich_text, text};
use super::{Diagnostic, RenderContext, Rendered};
use crate::content::block_list::Entry;
use crate::content::document::*;

const DEFAULT_LINK_LABEL: &str = "Learn more";

pub(crate) fn render_section_entry(
    ctx: &RenderContext<'_>,
    kind: SectionKind,
    entry: Option<&Entry<Section>>,
    out: &mut Rendered,
) {
    match entry {
        Some(Entry::Ready(section)) => render_section(ctx, section, out),
        Some(Entry::Rejected(rejection)) => {
            warn!(section = %kind, reason = %rejection.reason, "skipping section that cannot be rendered");
            out.diagnostics.push(Diagnostic {
                key: kind.as_str().to_string(),
                tag: rejection.tag.clone(),
                message: rejection.reason.clone(),
            });
        }
        None => {
            warn!(section = %kind, "section has no entry");
            out.diagnostics.push(Diagnostic {
                key: kind.as_str().to_string(),
                tag: None,
                message: "section has no entry".to_string(),
            });
        }
    }
}

fn render_section(ctx: &RenderContext<'_>, section: &Section, out: &mut Rendered) {
    let kind = section.kind();
    out.html.push_str(&format!(
        "<section class=\"section section--{}\" data-section=\"{}\">\n",
        kind.css_name(),
        kind.as_str()
    ));
    match section {
        Section::Hero(hero) => out.html.push_str(&render_hero(hero, ctx)),
        Section::Specs(specs) => out.html.push_str(&render_specs_table(specs)),
        Section::PremiumDetails(premium) => render_premium_details(premium, ctx, out),
        Section::ProcessSteps(steps) => out.html.push_str(&render_process_steps(steps, ctx)),
        Section::Faq(faq) => out.html.push_str(&render_faq(faq)),
        Section::CallToAction(cta) => out.html.push_str(&render_call_to_action(cta)),
    }
    out.html.push_str("</section>\n");

    for item in section.rejected_items() {
        warn!(section = %kind, key = %item.key, reason = %item.reason, "skipping section item that cannot be rendered");
        out.diagnostics.push(Diagnostic {
            key: format!("{}/{}", kind.as_str(), item.key),
            tag: None,
            message: item.reason.clone(),
        });
    }
}

/// A link button, shown only when the URL is present and safe.
fn link_button(url: Option<&str>, label: Option<&str>, class: &str) -> String {
    let Some(url) = safe_url(url) else {
        return String::new();
    };
    let label = text(label).unwrap_or_else(|| DEFAULT_LINK_LABEL.to_string());
    format!(
        "<a class=\"{class}\" href=\"{}\">{label}</a>\n",
        html_escape(url)
    )
}

fn render_hero(hero: &HeroSection, ctx: &RenderContext<'_>) -> String {
    let mut html = String::from("<div class=\"hero__slides\">\n");
    for (index, slide) in hero.slides.iter().enumerate() {
        html.push_str(&format!(
            "<div class=\"hero__slide\" data-slide-index=\"{index}\">\n"
        ));
        if let Some(img) = ctx.image_tag(&slide.image, "hero__image", &slide.title) {
            html.push_str(&img);
            html.push('\n');
        }
        html.push_str("<div class=\"hero__content\">\n");
        html.push_str(&format!(
            "<h2 class=\"hero__title\">{}</h2>\n",
            html_escape(slide.title.trim())
        ));
        if let Some(subtitle) = text(slide.subtitle.as_deref()) {
            html.push_str(&format!("<p class=\"hero__subtitle\">{subtitle}</p>\n"));
        }
        html.push_str(&link_button(
            slide.cta_url.as_deref(),
            slide.cta_label.as_deref(),
            "hero__cta",
        ));
        html.push_str("</div>\n</div>\n");
    }
    html.push_str("</div>\n");
    html
}

fn render_specs_table(specs: &SpecsSection) -> String {
    let mut html = heading(specs.title.as_deref(), "specs-table");
    html.push_str("<dl class=\"specs-table\">\n");
    for row in &specs.items {
        html.push_str(&format!(
            "<div class=\"specs-table__row\"><dt>{}</dt><dd>{}</dd></div>\n",
            html_escape(&row.label),
            html_escape(&row.value)
        ));
    }
    html.push_str("</dl>\n");
    html
}

/// Feature cards followed by one `<dialog>` per feature holding its modal
/// blocks. Diagnostics from modal blocks are keyed `<feature>/<block>`.
fn render_premium_details(
    premium: &PremiumDetailsSection,
    ctx: &RenderContext<'_>,
    out: &mut Rendered,
) {
    out.html
        .push_str(&heading(premium.title.as_deref(), "premium-details"));
    if let Some(subtitle) = text(premium.subtitle.as_deref()) {
        out.html.push_str(&format!(
            "<p class=\"premium-details__subtitle\">{subtitle}</p>\n"
        ));
    }

    out.html.push_str("<div class=\"premium-details__features\">\n");
    for (index, feature) in premium.features.iter().enumerate() {
        out.html.push_str(&format!(
            "<button type=\"button\" class=\"premium-feature\" data-modal-target=\"{}\" aria-haspopup=\"dialog\">\n",
            modal_id(index)
        ));
        if let Some(img) = ctx.image_tag(&feature.image, "premium-feature__image", &feature.title) {
            out.html.push_str(&img);
            out.html.push('\n');
        }
        out.html.push_str(&format!(
            "<h3 class=\"premium-feature__title\">{}</h3>\n",
            html_escape(feature.title.trim())
        ));
        if let Some(teaser) = text(feature.teaser.as_deref()) {
            out.html
                .push_str(&format!("<p class=\"premium-feature__teaser\">{teaser}</p>\n"));
        }
        out.html.push_str("</button>\n");
    }
    out.html.push_str("</div>\n");

    for (index, feature) in premium.features.iter().enumerate() {
        let mut modal = Rendered::default();
        render_blocks(ctx, &feature.modal_content, &mut modal);

        let feature_key = feature
            .key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map_or_else(|| format!("#{index}"), str::to_string);
        for diagnostic in &mut modal.diagnostics {
            diagnostic.key = format!("{feature_key}/{}", diagnostic.key);
        }

        out.html.push_str(&format!(
            "<dialog class=\"premium-feature__modal\" id=\"{}\" aria-label=\"{}\">\n<div class=\"premium-feature__modal-body\">\n",
            modal_id(index),
            html_escape(feature.title.trim())
        ));
        out.append(modal);
        out.html.push_str(
            "</div>\n<form method=\"dialog\"><button class=\"premium-feature__close\">Close</button></form>\n</dialog>\n",
        );
    }
}

fn modal_id(index: usize) -> String {
    format!("feature-modal-{index}")
}

fn render_process_steps(steps: &ProcessStepsSection, ctx: &RenderContext<'_>) -> String {
    let mut html = heading(steps.title.as_deref(), "process-steps");
    html.push_str("<ol class=\"process-steps__list\">\n");
    for (index, step) in steps.steps.iter().enumerate() {
        let number = index + 1;
        html.push_str(&format!(
            "<li class=\"process-step\" value=\"{number}\">\n<span class=\"process-step__number\">{number}</span>\n"
        ));
        if let Some(img) = ctx.image_tag(&step.image, "process-step__image", &step.title) {
            html.push_str(&img);
            html.push('\n');
        }
        html.push_str(&format!(
            "<h3 class=\"process-step__title\">{}</h3>\n",
            html_escape(step.title.trim())
        ));
        html.push_str(&paragraph(&step.text, "process-step__text"));
        html.push_str("</li>\n");
    }
    html.push_str("</ol>\n");
    html
}

/// Answers are rich text and pass through the sanitizer.
fn render_faq(faq: &FaqSection) -> String {
    let mut html = heading(faq.title.as_deref(), "faq");
    html.push_str("<div class=\"faq__items\">\n");
    for item in &faq.items {
        html.push_str(&format!(
            "<details class=\"faq__item\">\n<summary class=\"faq__question\">{}</summary>\n<div class=\"faq__answer\">{}</div>\n</details>\n",
            html_escape(item.question.trim()),
            sanitize_rich_text(&item.answer)
        ));
    }
    html.push_str("</div>\n");
    html
}

fn render_call_to_action(cta: &CallToActionSection) -> String {
    let mut html = heading(cta.title.as_deref(), "call-to-action");
    if let Some(body) = cta.text.as_deref().filter(|t| !t.trim().is_empty()) {
        html.push_str(&format!(
            "<p class=\"call-to-action__text\">{}</p>\n",
            multiline(body)
        ));
    }
    html.push_str(&link_button(
        cta.button_url.as_deref(),
        cta.button_label.as_deref(),
        "call-to-action__button",
    ));
    html
}
