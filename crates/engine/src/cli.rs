//! CLI command implementations.
//!
//! Each command takes an already-parsed document value and writes its report
//! to the given writer, so the binary only deals with argument parsing and
//! file I/O.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;
use vitrine_schema::prelude::*;

use crate::config::Config;
use crate::content::document::SectionKind;
use crate::content::{BlockList, ContentTypeRegistry, Document, non_blank};
use crate::content::image::CdnAssetResolver;
use crate::render::{Rendered, Renderer};
use crate::theme::{PageContext, ThemeEngine};

/// Read a JSON document from a file, or from stdin when the path is `-`.
pub fn load_document(path: &Path) -> Result<Value> {
    let raw = if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read document from stdin")?;
        raw
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Render a document. Unless `fragment` is set, the markup is wrapped in the
/// page shell.
pub fn cmd_render(config: &Config, value: &Value, fragment: bool) -> Result<Rendered> {
    let document = Document::from_value(value).context("failed to compose document")?;
    let renderer = Renderer::new(CdnAssetResolver::new(&config.asset_base_url));
    let mut rendered = renderer.render(&document);

    info!(
        sections = document.len(),
        diagnostics = rendered.diagnostics.len(),
        "document rendered"
    );

    if !fragment {
        let theme = ThemeEngine::from_dir(config.template_dir.as_deref())?;
        rendered.html = theme.render_page(&PageContext {
            site_name: &config.site_name,
            title: document.title.as_deref(),
            slug: document.slug.as_deref(),
            lang: &config.lang,
            body: &rendered.html,
        })?;
    }
    Ok(rendered)
}

/// One preview line per section, plus one per modal block of each premium
/// feature.
pub fn cmd_preview(registry: &ContentTypeRegistry, value: &Value, out: &mut impl Write) -> Result<()> {
    let document = Document::from_value(value).context("failed to compose document")?;
    let root = value.as_object().context("document root must be a JSON object")?;

    writeln!(out, "{:<28} {:<32} {:<32} MEDIA", "TYPE", "TITLE", "SUBTITLE")?;
    writeln!(out, "{}", "-".repeat(100))?;

    for (kind, _) in document.iter() {
        let Some(section_value) = root.get(kind.as_str()) else {
            continue;
        };
        write_preview_line(out, kind.as_str(), registry.preview(kind.as_str(), section_value))?;

        if kind == SectionKind::PremiumDetails {
            let stored_features = section_value
                .get("features")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for (index, feature) in stored_features.iter().enumerate() {
                let title = non_blank(feature.get("title").and_then(Value::as_str))
                    .map_or_else(|| format!("#{index}"), str::to_string);
                let modal = feature
                    .get("modalContent")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let blocks = BlockList::from_values(modal);
                for (key, block) in blocks.keys().zip(modal) {
                    let tag = block.get("_type").and_then(Value::as_str).unwrap_or("?");
                    let label = format!("  {title}/{key} {tag}");
                    write_preview_line(out, &label, registry.preview_block(block))?;
                }
            }
        }
    }
    Ok(())
}

fn write_preview_line(out: &mut impl Write, label: &str, preview: Option<Preview>) -> Result<()> {
    match preview {
        Some(preview) => {
            let media = match &preview.media {
                Some(MediaRef::Asset(reference)) => format!("asset:{reference}"),
                Some(MediaRef::Url(url)) => format!("url:{url}"),
                None => String::new(),
            };
            writeln!(
                out,
                "{:<28} {:<32} {:<32} {}",
                label,
                preview.title,
                preview.subtitle.unwrap_or_default(),
                media
            )?;
        }
        None => writeln!(out, "{label:<28} (unknown type)")?,
    }
    Ok(())
}

/// Report authoring-rule violations. Returns the number found.
pub fn cmd_validate(registry: &ContentTypeRegistry, value: &Value, out: &mut impl Write) -> Result<usize> {
    let errors = registry.validate_document(value);
    if errors.is_empty() {
        writeln!(out, "Document satisfies all authoring rules.")?;
    } else {
        for error in &errors {
            writeln!(out, "  {error}")?;
        }
        writeln!(out, "{} violation(s) found.", errors.len())?;
    }
    Ok(errors.len())
}

/// List every registered block variant and section with its fields and
/// rules.
pub fn cmd_catalog(registry: &ContentTypeRegistry, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:<24} {:<8} LABEL", "TYPE", "SCOPE")?;
    writeln!(out, "{}", "-".repeat(60))?;
    for definition in registry.definitions() {
        let scope = match definition.scope {
            Scope::Block => "block",
            Scope::Section => "section",
        };
        writeln!(
            out,
            "{:<24} {:<8} {}",
            definition.type_name, scope, definition.label
        )?;
        for field in &definition.fields {
            let required = if field.required { " (required)" } else { "" };
            writeln!(
                out,
                "    {}: {}{required}",
                field.field_name,
                field.field_type.describe()
            )?;
        }
        for rule in &definition.rules {
            writeln!(out, "    rule: {}", rule.describe())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn render_fragment_skips_page_shell() {
        let value = json!({ "title": "Lamp", "callToAction": { "title": "Buy now" } });
        let rendered = cmd_render(&Config::default(), &value, true).unwrap();
        assert!(rendered.html.starts_with("<section class=\"section section--call-to-action\""));
        assert!(!rendered.html.contains("<html"));
    }

    #[test]
    fn render_full_page_uses_site_name() {
        let value = json!({ "title": "Lamp", "callToAction": { "title": "Buy now" } });
        let rendered = cmd_render(&Config::default(), &value, false).unwrap();
        assert!(rendered.html.contains("<title>Lamp | Vitrine</title>"));
        assert!(rendered.html.contains("Buy now"));
    }

    #[test]
    fn render_returns_diagnostics_to_the_caller() {
        let value = json!({ "premiumDetails": { "features": [
            { "_key": "f", "title": "Battery", "modalContent": [{ "_type": "mystery", "_key": "m" }] }
        ]}});
        let rendered = cmd_render(&Config::default(), &value, true).unwrap();
        assert_eq!(rendered.diagnostics.len(), 1);
        assert_eq!(rendered.diagnostics[0].key, "f/m");
    }

    #[test]
    fn preview_keeps_modal_lines_aligned_with_stored_features() {
        let registry = ContentTypeRegistry::with_standard_catalog();
        let value = json!({ "premiumDetails": { "features": [
            { "title": "Broken", "teaser": 42, "modalContent": [{ "_type": "detailBlock", "_key": "a", "text": "First" }] },
            { "title": "Glass", "modalContent": [{ "_type": "detailBlock", "_key": "b", "text": "Second" }] }
        ]}});
        let text = output(|out| cmd_preview(&registry, &value, out));
        assert!(text.contains("Broken/a detailBlock"));
        assert!(text.contains("Glass/b detailBlock"));
    }

    #[test]
    fn render_rejects_non_object_root() {
        assert!(cmd_render(&Config::default(), &json!([]), true).is_err());
    }

    #[test]
    fn preview_lists_sections_and_modal_blocks() {
        let registry = ContentTypeRegistry::with_standard_catalog();
        let value = json!({
            "faq": { "items": [{ "question": "Q" }] },
            "premiumDetails": { "features": [{
                "title": "Battery",
                "modalContent": [{ "_type": "quoteBlock", "_key": "q", "quote": "Lasts" }]
            }]}
        });
        let text = output(|out| cmd_preview(&registry, &value, out));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[2].starts_with("faq"));
        assert!(lines[2].contains("1 question"));
        assert!(lines[3].starts_with("premiumDetails"));
        assert!(lines[4].contains("Battery/q quoteBlock"));
        assert!(lines[4].contains("Lasts"));
    }

    #[test]
    fn validate_counts_violations() {
        let registry = ContentTypeRegistry::with_standard_catalog();
        let mut count = 0;
        let text = output(|out| {
            count = cmd_validate(&registry, &json!({ "hero": { "slides": [] } }), out)?;
            Ok(())
        });
        assert_eq!(count, 1);
        assert!(text.contains("'slides' must have 3-10 items, found 0"));
    }

    #[test]
    fn catalog_lists_every_type() {
        let registry = ContentTypeRegistry::with_standard_catalog();
        let text = output(|out| cmd_catalog(&registry, out));
        assert!(text.contains("quoteBlock"));
        assert!(text.contains("quote: long text (required)"));
        assert!(text.contains("rule: features: exactly 9 items"));
        assert_eq!(text.lines().filter(|l| !l.starts_with(' ')).count(), 2 + 21);
    }
}
