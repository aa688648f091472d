//! Codec error types.

use polyedge_core::{EdgeId, GraphError, VertexId};
use polyedge_registry::{ConnectionMode, EdgeKind, RegistryError};
use thiserror::Error;

/// Errors that can occur while encoding or decoding relationships.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Expected at most one {edge_type} relationship with role '{role}' on {vertex}, found {count}")]
    Multiplicity {
        vertex: VertexId,
        edge_type: String,
        role: String,
        count: usize,
    },

    #[error("Malformed fragment {edge}: type name '{type_name}'")]
    MalformedFragment { edge: EdgeId, type_name: String },

    #[error("Missing participant for role '{role}' of {edge_type}")]
    MissingRole { edge_type: String, role: String },

    #[error("Unknown role '{role}' for {edge_type}")]
    UnknownRole { edge_type: String, role: String },

    #[error("Role '{role}' of {edge_type} supplied more than once")]
    DuplicateRole { edge_type: String, role: String },

    #[error("{vertex} already fills {mode} role '{role}' of {edge_type}")]
    CardinalityViolation {
        edge_type: String,
        role: String,
        vertex: VertexId,
        mode: ConnectionMode,
    },

    #[error("{operation} is not supported by {kind} edge type {edge_type}")]
    UnsupportedArity {
        edge_type: String,
        kind: EdgeKind,
        operation: &'static str,
    },

    #[error("Unknown edge type {0}")]
    UnknownEdgeType(String),

    #[error("{0} is not a relationship anchor")]
    NotAnAnchor(VertexId),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("invalid codec configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl CodecError {
    pub fn missing_role(edge_type: impl Into<String>, role: impl Into<String>) -> Self {
        Self::MissingRole {
            edge_type: edge_type.into(),
            role: role.into(),
        }
    }

    pub fn unknown_role(edge_type: impl Into<String>, role: impl Into<String>) -> Self {
        Self::UnknownRole {
            edge_type: edge_type.into(),
            role: role.into(),
        }
    }

    pub fn duplicate_role(edge_type: impl Into<String>, role: impl Into<String>) -> Self {
        Self::DuplicateRole {
            edge_type: edge_type.into(),
            role: role.into(),
        }
    }

    pub fn unsupported_arity(
        edge_type: impl Into<String>,
        kind: EdgeKind,
        operation: &'static str,
    ) -> Self {
        Self::UnsupportedArity {
            edge_type: edge_type.into(),
            kind,
            operation,
        }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
