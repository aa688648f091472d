//! Common error types for substrate operations.

use crate::{EdgeId, VertexId};
use thiserror::Error;

/// Errors that can occur during graph operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Vertex not found.
    #[error("Vertex not found: {0}")]
    VertexNotFound(VertexId),

    /// Edge not found.
    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// Cannot delete vertex because edges reference it.
    #[error("Cannot delete vertex {0}: referenced by edges")]
    VertexHasEdges(VertexId),

    /// The root vertex cannot be deleted.
    #[error("Cannot delete the root vertex {0}")]
    RootVertex(VertexId),

    /// A transaction is already open.
    #[error("transaction already active")]
    TransactionActive,

    /// No transaction is open.
    #[error("no transaction is active")]
    NoTransaction,
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
