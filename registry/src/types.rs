//! Edge type definitions.

use crate::{ConnectionMode, Connector, ConnectorType, RegistryError, RegistryResult};
use polyedge_core::{fragment_type_name, VertexId};
use std::fmt;

/// Name of the singleton nullary edge type.
pub const NULLARY_EDGE_TYPE: &str = "NullaryEdgeType";
/// Connector type of the nullary edge type.
pub const NULLARY_CONNECTOR: &str = "NullaryConnector";
/// Role of the participant of a unary edge.
pub const SUBJECT_ROLE: &str = "subject";
/// Start role of a binary edge.
pub const START_ROLE: &str = "start";
/// End role of a binary edge.
pub const END_ROLE: &str = "end";

/// Arity tag of an edge type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Nullary,
    Unary,
    Binary,
    Hyper,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeKind::Nullary => "nullary",
            EdgeKind::Unary => "unary",
            EdgeKind::Binary => "binary",
            EdgeKind::Hyper => "hyper",
        };
        f.write_str(name)
    }
}

/// Arity-specific connector set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arity {
    /// A marker with no distinguishable participants.
    Nullary { connector: ConnectorType },
    /// One participant, encoded through an anchor.
    Unary { connector: ConnectorType },
    /// Plain substrate edges.
    Binary {
        start: ConnectorType,
        end: ConnectorType,
    },
    /// Any number of named roles, encoded through an anchor.
    Hyper { connectors: Vec<ConnectorType> },
}

impl Arity {
    pub fn kind(&self) -> EdgeKind {
        match self {
            Arity::Nullary { .. } => EdgeKind::Nullary,
            Arity::Unary { .. } => EdgeKind::Unary,
            Arity::Binary { .. } => EdgeKind::Binary,
            Arity::Hyper { .. } => EdgeKind::Hyper,
        }
    }

    fn connector_types(&self) -> Vec<&ConnectorType> {
        match self {
            Arity::Nullary { connector } | Arity::Unary { connector } => vec![connector],
            Arity::Binary { start, end } => vec![start, end],
            Arity::Hyper { connectors } => connectors.iter().collect(),
        }
    }
}

/// A resolved edge type, backed by its descriptor vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeType {
    name: String,
    descriptor: VertexId,
    arity: Arity,
}

impl EdgeType {
    pub fn new(name: impl Into<String>, descriptor: VertexId, arity: Arity) -> Self {
        Self {
            name: name.into(),
            descriptor,
            arity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The descriptor vertex; its id is the edge type's persistent identity.
    pub fn descriptor(&self) -> VertexId {
        self.descriptor
    }

    pub fn arity(&self) -> &Arity {
        &self.arity
    }

    pub fn kind(&self) -> EdgeKind {
        self.arity.kind()
    }

    /// Whether instances are stored as an anchor plus fragments.
    pub fn is_anchored(&self) -> bool {
        matches!(self.kind(), EdgeKind::Unary | EdgeKind::Hyper)
    }

    /// All connectors, in declaration order.
    pub fn connectors(&self) -> Vec<Connector> {
        self.arity
            .connector_types()
            .into_iter()
            .map(|ct| Connector::new(ct.clone(), &self.name))
            .collect()
    }

    /// Role names, in declaration order.
    pub fn roles(&self) -> Vec<&str> {
        self.arity
            .connector_types()
            .into_iter()
            .map(|ct| ct.name.as_str())
            .collect()
    }

    /// The connector for `role`. Undefined roles are an error.
    pub fn connector(&self, role: &str) -> RegistryResult<Connector> {
        self.arity
            .connector_types()
            .into_iter()
            .find(|ct| ct.name == role)
            .map(|ct| Connector::new(ct.clone(), &self.name))
            .ok_or_else(|| RegistryError::unknown_role(&self.name, role))
    }

    pub fn start_connector(&self) -> RegistryResult<Connector> {
        match &self.arity {
            Arity::Binary { start, .. } => Ok(Connector::new(start.clone(), &self.name)),
            _ => Err(RegistryError::unsupported_arity(
                &self.name,
                self.kind(),
                "start connector",
            )),
        }
    }

    pub fn end_connector(&self) -> RegistryResult<Connector> {
        match &self.arity {
            Arity::Binary { end, .. } => Ok(Connector::new(end.clone(), &self.name)),
            _ => Err(RegistryError::unsupported_arity(
                &self.name,
                self.kind(),
                "end connector",
            )),
        }
    }

    /// Substrate type name of the fragment for `role`.
    pub fn fragment_type_name(&self, role: &str) -> RegistryResult<String> {
        if !self.is_anchored() {
            return Err(RegistryError::unsupported_arity(
                &self.name,
                self.kind(),
                "fragment encoding",
            ));
        }
        let connector = self.connector(role)?;
        Ok(fragment_type_name(&self.name, connector.role()))
    }

    /// Substrate type names of every fragment; empty for plain types.
    pub fn fragment_type_names(&self) -> Vec<String> {
        if !self.is_anchored() {
            return Vec::new();
        }
        self.roles()
            .into_iter()
            .map(|role| fragment_type_name(&self.name, role))
            .collect()
    }

    /// Whether this type was declared by `def`.
    pub(crate) fn matches_def(&self, def: &EdgeTypeDef) -> bool {
        if self.kind() != def.kind() {
            return false;
        }
        match &self.arity {
            Arity::Hyper { connectors } => {
                connectors.len() == def.roles().len()
                    && connectors
                        .iter()
                        .zip(def.roles())
                        .all(|(ct, role)| ct.name == role.name && ct.mode == role.mode)
            }
            _ => true,
        }
    }
}

/// A role declared on a hyper edge type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDef {
    pub name: String,
    pub mode: ConnectionMode,
}

/// Declaration of an edge type to resolve through the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeTypeDef {
    name: String,
    kind: EdgeKind,
    roles: Vec<RoleDef>,
}

impl EdgeTypeDef {
    /// The singleton nullary edge type.
    pub fn nullary() -> Self {
        Self {
            name: NULLARY_EDGE_TYPE.to_string(),
            kind: EdgeKind::Nullary,
            roles: Vec::new(),
        }
    }

    pub fn unary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EdgeKind::Unary,
            roles: Vec::new(),
        }
    }

    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EdgeKind::Binary,
            roles: Vec::new(),
        }
    }

    /// A hyper edge type; declare its roles with [`EdgeTypeDef::role`].
    pub fn hyper(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EdgeKind::Hyper,
            roles: Vec::new(),
        }
    }

    /// Add a role.
    pub fn role(mut self, name: impl Into<String>, mode: ConnectionMode) -> Self {
        self.roles.push(RoleDef {
            name: name.into(),
            mode,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn roles(&self) -> &[RoleDef] {
        &self.roles
    }
}
