//! Content model.
//!
//! This module provides:
//! - BlockTag / BlockKind / Block: the closed fifteen-variant block catalog
//! - BlockList: keyed, ordered block storage for modal content
//! - Document: the six-section page composer
//! - Items: section arrays parsed item by item
//! - resolve_image / AssetResolver: shared image precedence and asset URLs
//! - ContentTypeRegistry: field shapes, authoring rules, and previews

pub mod block_list;
pub mod blocks;
pub mod catalog;
pub mod document;
pub mod image;
pub mod items;
pub mod registry;
mod serde_ext;

pub use block_list::{BlockKey, BlockList, Entry, Rejection};
pub use blocks::{Block, BlockKind, BlockTag, FeatureIcon};
pub use document::{Document, Section, SectionKind};
pub use image::{AssetResolver, CdnAssetResolver, ImagePair, ImageSource, resolve_image};
pub use items::{Items, RejectedItem};
pub use registry::ContentTypeRegistry;
pub use serde_ext::non_blank;
