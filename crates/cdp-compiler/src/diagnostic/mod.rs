//! Diagnostic types for error reporting.

mod error;
mod origin;

pub use error::GeneratorError;
pub use origin::{EntityKind, EntityPath};
