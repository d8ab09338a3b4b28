//! Rendering of composed documents and block lists to HTML.
//!
//! Both entry points are total: they never fail and never panic. Blocks or
//! sections that could not be parsed contribute nothing to the markup and
//! one [`Diagnostic`] each.

mod blocks;
mod dispatch;
pub mod html;
mod sections;

use std::fmt;

use serde::Serialize;

use crate::content::block_list::BlockList;
use crate::content::document::Document;
use crate::content::image::{AssetResolver, CdnAssetResolver, ImagePair, ImageSource, resolve_image};

pub use blocks::render_block;

/// A non-fatal problem found while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Block key, or the section name for section-level problems.
    pub key: String,
    /// The stored tag, when one could be read.
    pub tag: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{} ({tag}): {}", self.key, self.message),
            None => write!(f, "{}: {}", self.key, self.message),
        }
    }
}

/// Rendered markup plus the diagnostics collected while producing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub html: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    /// Append another rendered fragment, keeping its diagnostics.
    pub fn append(&mut self, other: Rendered) {
        self.html.push_str(&other.html);
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Read-only state shared by every renderer during one pass.
pub struct RenderContext<'a> {
    assets: &'a dyn AssetResolver,
}

impl<'a> RenderContext<'a> {
    pub fn new(assets: &'a dyn AssetResolver) -> Self {
        Self { assets }
    }

    /// Displayable URL for an image pair: asset first, then a safe plain URL.
    pub fn image_url(&self, pair: &ImagePair) -> Option<String> {
        match resolve_image(pair)? {
            source @ ImageSource::Asset(_) => Some(source.to_url(self.assets)),
            ImageSource::Url(url) => html::safe_url(Some(url)).map(str::to_string),
        }
    }

    /// `<img>` element for an image pair, or `None` when it has no source.
    pub fn image_tag(&self, pair: &ImagePair, class: &str, fallback_alt: &str) -> Option<String> {
        let src = self.image_url(pair)?;
        let alt = pair.alt().unwrap_or(fallback_alt.trim());
        Some(format!(
            "<img class=\"{class}\" src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            html::html_escape(&src),
            html::html_escape(alt)
        ))
    }
}

/// Renders documents and block lists against an asset resolver.
///
/// Holds no mutable state; one renderer can serve any number of concurrent
/// render calls.
pub struct Renderer {
    assets: Box<dyn AssetResolver>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(CdnAssetResolver::default())
    }
}

impl Renderer {
    pub fn new(assets: impl AssetResolver + 'static) -> Self {
        Self {
            assets: Box::new(assets),
        }
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext::new(self.assets.as_ref())
    }

    /// Render every section of a document in stored order.
    pub fn render(&self, document: &Document) -> Rendered {
        let ctx = self.context();
        let mut out = Rendered::default();
        for (kind, entry) in document.iter() {
            sections::render_section_entry(&ctx, kind, entry, &mut out);
        }
        out
    }

    /// Render an ordered block list. An empty list renders as nothing.
    pub fn render_block_list(&self, blocks: &BlockList) -> Rendered {
        let mut out = Rendered::default();
        dispatch::render_blocks(&self.context(), blocks, &mut out);
        out
    }
}

/// Render a document with the default asset resolver.
pub fn render(document: &Document) -> Rendered {
    Renderer::default().render(document)
}

/// Render a block list with the default asset resolver.
pub fn render_block_list(blocks: &BlockList) -> Rendered {
    Renderer::default().render_block_list(blocks)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::image::CdnAssetResolver;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn renderer_is_shareable_across_threads() {
        assert_send_sync::<Renderer>();
    }

    #[test]
    fn image_url_prefers_asset() {
        let resolver = CdnAssetResolver::new("https://cdn.test");
        let ctx = RenderContext::new(&resolver);
        let pair = ImagePair {
            url: Some("https://example.com/b.png".into()),
            ..ImagePair::from_asset("image-a-2x3-png")
        };
        assert_eq!(
            ctx.image_url(&pair).as_deref(),
            Some("https://cdn.test/a-2x3.png")
        );
    }

    #[test]
    fn unsafe_plain_url_is_no_image() {
        let resolver = CdnAssetResolver::default();
        let ctx = RenderContext::new(&resolver);
        let pair = ImagePair::from_url("javascript:alert(1)");
        assert_eq!(ctx.image_url(&pair), None);
        assert_eq!(ctx.image_tag(&pair, "x", "alt"), None);
    }

    #[test]
    fn image_tag_escapes_and_uses_fallback_alt() {
        let resolver = CdnAssetResolver::default();
        let ctx = RenderContext::new(&resolver);
        let tag = ctx
            .image_tag(&ImagePair::from_url("/img/a.png?x=1&y=2"), "card__image", "Lamp \"A\"")
            .unwrap();
        assert_eq!(
            tag,
            "<img class=\"card__image\" src=\"/img/a.png?x=1&amp;y=2\" alt=\"Lamp &quot;A&quot;\" loading=\"lazy\">"
        );
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic {
            key: "b2".into(),
            tag: Some("foo".into()),
            message: "unknown block type 'foo'".into(),
        };
        assert_eq!(d.to_string(), "b2 (foo): unknown block type 'foo'");
    }
}
