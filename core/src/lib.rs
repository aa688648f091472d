//! Polyedge Core Types
//!
//! This crate provides the foundational types shared by every layer:
//! - Identity types (VertexId, EdgeId)
//! - Value types (the Value enum and property maps)
//! - Entity structures (Vertex, BinaryEdge, Direction)
//! - The persisted fragment naming scheme (SEPARATOR)
//! - Common error types

mod entity;
mod error;
mod id;
mod naming;
mod value;

pub use entity::*;
pub use error::*;
pub use id::*;
pub use naming::*;
pub use value::*;
