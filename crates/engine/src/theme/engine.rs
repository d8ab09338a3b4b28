//! Theme engine with Tera templates and suggestion resolution.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tera::Tera;
use tracing::debug;

/// Built-in page shell, used when no template directory overrides it.
const DEFAULT_PAGE_TEMPLATE: &str = include_str!("../../templates/page.html");

/// Values available to page templates.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext<'a> {
    pub site_name: &'a str,
    pub title: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub lang: &'a str,
    /// Rendered document markup, inserted unescaped.
    pub body: &'a str,
}

/// Theme engine for rendering page shells.
pub struct ThemeEngine {
    tera: Tera,
}

impl ThemeEngine {
    /// Create a theme engine with only the built-in page template.
    pub fn builtin() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("page.html", DEFAULT_PAGE_TEMPLATE)
            .context("failed to parse built-in page template")?;
        Ok(Self { tera })
    }

    /// Load templates from a directory. Built-in templates fill in any name
    /// the directory does not provide.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let mut tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;
        let builtin = Self::builtin()?;
        tera.extend(&builtin.tera)
            .context("failed to merge built-in templates")?;

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    /// Directory-backed engine when a directory is configured, built-in
    /// otherwise.
    pub fn from_dir(template_dir: Option<&Path>) -> Result<Self> {
        match template_dir {
            Some(dir) => Self::new(dir),
            None => Self::builtin(),
        }
    }

    /// Template suggestions for a page, most specific first.
    ///
    /// Example: slug `aurora-lamp` yields `["page--aurora-lamp", "page"]`.
    pub fn page_suggestions(slug: Option<&str>) -> Vec<String> {
        let mut suggestions = Vec::new();
        if let Some(normalized) = slug.and_then(Self::normalize_slug) {
            suggestions.push(format!("page--{normalized}"));
        }
        suggestions.push("page".to_string());
        suggestions
    }

    /// Slug as used in template names and the body class: outer slashes
    /// trimmed, anything but ASCII alphanumerics and `-` replaced by `-`.
    pub fn normalize_slug(slug: &str) -> Option<String> {
        let normalized: String = slug
            .trim()
            .trim_matches('/')
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
            .collect();
        (!normalized.is_empty()).then_some(normalized)
    }

    /// Resolve the first suggestion that names a loaded template.
    pub fn resolve_template(&self, suggestions: &[String]) -> Option<String> {
        suggestions
            .iter()
            .map(|suggestion| format!("{suggestion}.html"))
            .find(|name| self.tera.get_template(name).is_ok())
    }

    /// Render a full page around already-rendered body markup.
    pub fn render_page(&self, page: &PageContext<'_>) -> Result<String> {
        let suggestions = Self::page_suggestions(page.slug);
        let template = self
            .resolve_template(&suggestions)
            .context("no page template available")?;
        debug!(template = %template, "rendering page shell");

        let mut context =
            tera::Context::from_serialize(page).context("failed to build template context")?;
        context.insert("slug", &page.slug.and_then(Self::normalize_slug));
        self.tera
            .render(&template, &context)
            .with_context(|| format!("failed to render template '{template}'"))
    }
}
