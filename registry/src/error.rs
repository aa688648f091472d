//! Registry error types.

use crate::{ConnectionMode, DescriptorKind, EdgeKind};
use polyedge_core::{GraphError, VertexId};
use thiserror::Error;

/// Errors that can occur while resolving edge and connector types.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown role '{role}' on edge type {edge_type}")]
    UnknownRole { edge_type: String, role: String },

    #[error("{operation} is not supported by {kind} edge type {edge_type}")]
    UnsupportedArity {
        edge_type: String,
        kind: EdgeKind,
        operation: &'static str,
    },

    #[error("Type {name} is registered as {actual}, requested as {expected}")]
    KindMismatch {
        name: String,
        expected: DescriptorKind,
        actual: DescriptorKind,
    },

    #[error("Hyper edge type {name} is registered with a different role set")]
    RoleSetMismatch { name: String },

    #[error("Connector type {name} is registered as {actual}, requested as {expected}")]
    ConnectorModeMismatch {
        name: String,
        expected: ConnectionMode,
        actual: ConnectionMode,
    },

    #[error("Name '{name}' contains the reserved fragment separator")]
    ReservedSeparator { name: String },

    #[error("Type and role names must not be empty")]
    EmptyName,

    #[error("Duplicate role '{role}' on edge type {edge_type}")]
    DuplicateRole { edge_type: String, role: String },

    #[error("Hyper edge type {edge_type} declares no roles")]
    NoRoles { edge_type: String },

    #[error("Corrupt descriptor {vertex}: {reason}")]
    CorruptDescriptor { vertex: VertexId, reason: String },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

impl RegistryError {
    pub fn unknown_role(edge_type: impl Into<String>, role: impl Into<String>) -> Self {
        Self::UnknownRole {
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

    pub fn corrupt(vertex: VertexId, reason: impl Into<String>) -> Self {
        Self::CorruptDescriptor {
            vertex,
            reason: reason.into(),
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
