//! Element error types.

use polyedge_codec::CodecError;
use polyedge_core::{GraphError, VertexId};
use polyedge_registry::RegistryError;
use thiserror::Error;

/// Errors surfaced by the element facade.
#[derive(Debug, Error)]
pub enum ElementError {
    /// No vertex with this id.
    #[error("Vertex not found: {0}")]
    VertexNotFound(VertexId),

    /// A path step does not connect to the current end of the path.
    #[error("{relationship} relationship does not connect {from} to {to}")]
    DisconnectedPath {
        relationship: String,
        from: VertexId,
        to: VertexId,
    },

    /// A connection names a role its relationship does not fill.
    #[error("Relationship {anchor} has no participant in role '{role}'")]
    NotAParticipant { anchor: VertexId, role: String },

    /// Encoding or decoding error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Edge type resolution error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Substrate error.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Result type for element operations.
pub type ElementResult<T> = Result<T, ElementError>;
