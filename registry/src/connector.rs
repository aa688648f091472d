//! Connector types and connectors.

use crate::ConnectionMode;
use polyedge_core::VertexId;

/// A named role kind, persisted as its own descriptor vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorType {
    /// Role name.
    pub name: String,
    /// Cardinality constraint.
    pub mode: ConnectionMode,
    /// Descriptor vertex.
    pub descriptor: VertexId,
}

impl ConnectorType {
    pub fn new(name: impl Into<String>, mode: ConnectionMode, descriptor: VertexId) -> Self {
        Self {
            name: name.into(),
            mode,
            descriptor,
        }
    }
}

/// A connector type bound to the edge type that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    connector_type: ConnectorType,
    edge_type: String,
}

impl Connector {
    pub fn new(connector_type: ConnectorType, edge_type: impl Into<String>) -> Self {
        Self {
            connector_type,
            edge_type: edge_type.into(),
        }
    }

    pub fn connector_type(&self) -> &ConnectorType {
        &self.connector_type
    }

    /// Role name of this connector.
    pub fn role(&self) -> &str {
        &self.connector_type.name
    }

    /// Name of the owning edge type.
    pub fn edge_type(&self) -> &str {
        &self.edge_type
    }

    pub fn connection_mode(&self) -> ConnectionMode {
        self.connector_type.mode
    }
}
