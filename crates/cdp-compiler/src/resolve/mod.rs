//! Reference resolution and domain ordering.

pub mod graph;
mod order;
mod resolver;

pub use order::dependency_order;
pub use resolver::{Resolved, Resolver, Target, TypeHandle, TypeKey};
