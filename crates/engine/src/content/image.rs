//! Image resolution.
//!
//! Every image field in the content store is a pair: an uploaded asset
//! (`image.asset._ref`) and a plain URL (`imageUrl`). [`resolve_image`] is the
//! single precedence rule all renderers share: asset first, then URL, then
//! nothing.

use serde::{Deserialize, Serialize};

use vitrine_schema::preview::MediaRef;

/// Uploaded image object as stored by the content store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetImage {
    #[serde(default)]
    pub asset: Option<AssetReference>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Pointer to a hosted asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReference {
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
}

/// The two alternative sources of an image field.
///
/// Flattened into the owning object, so a stored item looks like
/// `{ "image": { "asset": { "_ref": "..." } }, "imageUrl": "..." }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePair {
    #[serde(rename = "image", default)]
    pub asset: Option<AssetImage>,
    #[serde(rename = "imageUrl", default)]
    pub url: Option<String>,
}

impl ImagePair {
    pub fn from_asset(reference: &str) -> Self {
        Self {
            asset: Some(AssetImage {
                asset: Some(AssetReference {
                    reference: Some(reference.into()),
                }),
                alt: None,
            }),
            url: None,
        }
    }

    pub fn from_url(url: &str) -> Self {
        Self {
            asset: None,
            url: Some(url.into()),
        }
    }

    /// Non-blank asset reference, if any.
    pub fn asset_reference(&self) -> Option<&str> {
        self.asset
            .as_ref()
            .and_then(|image| image.asset.as_ref())
            .and_then(|asset| asset.reference.as_deref())
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    /// Non-blank plain URL, if any.
    pub fn plain_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// Alt text attached to the uploaded asset.
    pub fn alt(&self) -> Option<&str> {
        self.asset
            .as_ref()
            .and_then(|image| image.alt.as_deref())
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

/// The source chosen for an image field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    Asset(&'a str),
    Url(&'a str),
}

impl ImageSource<'_> {
    /// Turn the chosen source into a displayable URL.
    pub fn to_url(self, resolver: &dyn AssetResolver) -> String {
        match self {
            ImageSource::Asset(reference) => resolver.url_for(reference),
            ImageSource::Url(url) => url.to_string(),
        }
    }

    pub fn to_media_ref(self) -> MediaRef {
        match self {
            ImageSource::Asset(reference) => MediaRef::Asset(reference.to_string()),
            ImageSource::Url(url) => MediaRef::Url(url.to_string()),
        }
    }
}

/// Asset reference if present, else the URL if present, else no image.
pub fn resolve_image(pair: &ImagePair) -> Option<ImageSource<'_>> {
    pair.asset_reference()
        .map(ImageSource::Asset)
        .or_else(|| pair.plain_url().map(ImageSource::Url))
}

/// Maps an asset reference to the URL it is served from.
pub trait AssetResolver: Send + Sync {
    fn url_for(&self, reference: &str) -> String;
}

/// Default CDN base for asset references.
pub const DEFAULT_ASSET_BASE_URL: &str = "https://cdn.sanity.io/images/vitrine/production";

/// Resolves references of the form `image-<id>-<w>x<h>-<ext>` against a CDN
/// base URL, producing `<base>/<id>-<w>x<h>.<ext>`.
#[derive(Debug, Clone)]
pub struct CdnAssetResolver {
    base_url: String,
}

impl CdnAssetResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for CdnAssetResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_BASE_URL)
    }
}

impl AssetResolver for CdnAssetResolver {
    fn url_for(&self, reference: &str) -> String {
        match file_name_for(reference) {
            Some(file) => format!("{}/{file}", self.base_url),
            None => format!("{}/{reference}", self.base_url),
        }
    }
}

/// `image-abc123-800x600-png` -> `abc123-800x600.png`.
fn file_name_for(reference: &str) -> Option<String> {
    let rest = reference.strip_prefix("image-")?;
    let (stem, ext) = rest.rsplit_once('-')?;
    let (id, dims) = stem.rsplit_once('-')?;
    let (w, h) = dims.split_once('x')?;
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if id.is_empty() || ext.is_empty() || !numeric(w) || !numeric(h) {
        return None;
    }
    Some(format!("{id}-{dims}.{ext}"))
}
