//! Vitrine content schema.
//!
//! Declarative types describing the closed content catalog: the shape of each
//! field, the authoring-time validation rules, and the rules used to build an
//! authoring-side preview. Nothing here renders; the engine and the authoring
//! tool both consult these definitions.

pub mod preview;
pub mod types;

pub mod prelude {
    pub use crate::preview::*;
    pub use crate::types::*;
}
