//! Vitrine content engine library.
//!
//! Composes stored page documents from a closed catalog of content blocks and
//! renders them to HTML. The `vitrine` binary wraps this library in a CLI.

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod render;
pub mod theme;

pub use content::{BlockList, ContentTypeRegistry, Document};
pub use error::{ContentError, ContentResult};
pub use render::{Diagnostic, Rendered, Renderer, render, render_block_list};
