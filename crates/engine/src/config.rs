//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::content::image::DEFAULT_ASSET_BASE_URL;
use crate::render::html::is_safe_url;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL asset references resolve against
    /// (default: the production CDN image path).
    pub asset_base_url: String,

    /// Directory of Tera templates overriding the built-in page shell.
    pub template_dir: Option<PathBuf>,

    /// Site name used in the page `<title>` (default: "Vitrine").
    pub site_name: String,

    /// Page language attribute (default: "en").
    pub lang: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            template_dir: None,
            site_name: "Vitrine".to_string(),
            lang: "en".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables. Every variable is
    /// optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let asset_base_url = var("VITRINE_ASSET_BASE_URL").unwrap_or(defaults.asset_base_url);
        Self::check_base_url(&asset_base_url)
            .context("VITRINE_ASSET_BASE_URL must be an http(s) URL")?;

        let template_dir = var("VITRINE_TEMPLATE_DIR").map(PathBuf::from);
        let site_name = var("VITRINE_SITE_NAME").unwrap_or(defaults.site_name);
        let lang = var("VITRINE_LANG").unwrap_or(defaults.lang);

        Ok(Self {
            asset_base_url,
            template_dir,
            site_name,
            lang,
        })
    }

    /// Asset bases must be absolute http(s) URLs.
    pub fn check_base_url(url: &str) -> Result<()> {
        if is_safe_url(url) && !url.trim_start().starts_with('/') {
            Ok(())
        } else {
            anyhow::bail!("invalid asset base URL '{url}'")
        }
    }
}
