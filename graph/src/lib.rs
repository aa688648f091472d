//! Polyedge Graph Substrate
//!
//! The binary graph storage engine is an external collaborator. This crate
//! defines the interface the hyper-relationship layer consumes from it
//! (`GraphStore`) and ships an in-memory implementation:
//! - Vertex and binary edge storage with key/value properties
//! - Adjacency index: find edges from/to a vertex, by type, in creation order
//! - Undo log: begin/commit/rollback with full restoration of deleted entities

mod index;
mod memory;
mod store;
mod undo;

pub use memory::MemoryGraph;
pub use store::{in_transaction, EdgeIter, GraphStore};
