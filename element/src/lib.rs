//! Polyedge Element
//!
//! The facade callers use: a [`HyperGraph`] owns a store, its edge type
//! registry and the codec configuration, and hands out [`Element`] handles
//! that enumerate relationships of every arity in one stream.

mod element;
mod error;
mod graph;
mod path;
mod query;

pub use element::{Element, ElementMut};
pub use error::{ElementError, ElementResult};
pub use graph::HyperGraph;
pub use path::{Connection, Path, PathEntity, TraversalPath};
pub use query::RelationshipQuery;
