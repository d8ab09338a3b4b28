//! Page shell rendering.
//!
//! Wraps rendered document markup in a full HTML page using Tera templates.
//! A built-in `page.html` is always available; a template directory can
//! override it or add slug-specific `page--<slug>.html` variants.

mod engine;

pub use engine::{PageContext, ThemeEngine};
