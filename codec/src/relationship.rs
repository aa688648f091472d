//! Decoded relationships.

use polyedge_core::{BinaryEdge, EdgeId, VertexId};

/// A binary edge that is itself the relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainRelationship {
    pub edge: EdgeId,
    pub type_name: String,
    pub start: VertexId,
    pub end: VertexId,
}

impl From<&BinaryEdge> for PlainRelationship {
    fn from(edge: &BinaryEdge) -> Self {
        Self {
            edge: edge.id,
            type_name: edge.type_name.clone(),
            start: edge.start,
            end: edge.end,
        }
    }
}

/// One vertex filling one role of a hyper-relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub role: String,
    pub vertex: VertexId,
    /// The fragment edge `anchor -> vertex`.
    pub fragment: EdgeId,
}

/// An n-ary relationship, identified by its anchor vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperRelationship {
    pub anchor: VertexId,
    pub type_name: String,
    /// Descriptor vertex of the resolved edge type.
    pub descriptor: VertexId,
    /// Participants in fragment creation order.
    pub participants: Vec<Participant>,
}

impl HyperRelationship {
    /// The vertex filling `role`, if any.
    pub fn participant(&self, role: &str) -> Option<VertexId> {
        self.participants
            .iter()
            .find(|p| p.role == role)
            .map(|p| p.vertex)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> + '_ {
        self.participants.iter().map(|p| p.role.as_str())
    }

    /// Roles `vertex` fills in this relationship.
    pub fn roles_of(&self, vertex: VertexId) -> Vec<&str> {
        self.participants
            .iter()
            .filter(|p| p.vertex == vertex)
            .map(|p| p.role.as_str())
            .collect()
    }

    pub fn arity(&self) -> usize {
        self.participants.len()
    }
}

/// A relationship as seen from one of its vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relationship {
    Plain(PlainRelationship),
    Hyper(HyperRelationship),
}

impl Relationship {
    pub fn type_name(&self) -> &str {
        match self {
            Relationship::Plain(rel) => &rel.type_name,
            Relationship::Hyper(rel) => &rel.type_name,
        }
    }

    pub fn is_hyper(&self) -> bool {
        matches!(self, Relationship::Hyper(_))
    }

    pub fn as_plain(&self) -> Option<&PlainRelationship> {
        match self {
            Relationship::Plain(rel) => Some(rel),
            Relationship::Hyper(_) => None,
        }
    }

    pub fn as_hyper(&self) -> Option<&HyperRelationship> {
        match self {
            Relationship::Hyper(rel) => Some(rel),
            Relationship::Plain(_) => None,
        }
    }

    /// Every vertex taking part, anchors excluded.
    pub fn vertices(&self) -> Vec<VertexId> {
        match self {
            Relationship::Plain(rel) => vec![rel.start, rel.end],
            Relationship::Hyper(rel) => rel.participants.iter().map(|p| p.vertex).collect(),
        }
    }

    pub fn involves(&self, vertex: VertexId) -> bool {
        self.vertices().contains(&vertex)
    }
}
