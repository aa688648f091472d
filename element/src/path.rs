//! Paths through relationships.

use crate::{ElementError, ElementResult};
use polyedge_codec::{HyperRelationship, Relationship};
use polyedge_core::VertexId;

/// An alternating sequence of vertices and the relationships joining them.
///
/// Always holds at least one vertex; `len` counts relationships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    vertices: Vec<VertexId>,
    relationships: Vec<Relationship>,
}

/// One entity along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEntity<'a> {
    Vertex(VertexId),
    Relationship(&'a Relationship),
}

impl Path {
    /// The zero-length path of one element.
    pub fn single(vertex: VertexId) -> Self {
        Self {
            vertices: vec![vertex],
            relationships: Vec::new(),
        }
    }

    pub fn start(&self) -> VertexId {
        self.vertices[0]
    }

    pub fn end(&self) -> VertexId {
        self.vertices[self.vertices.len() - 1]
    }

    pub fn last_relationship(&self) -> Option<&Relationship> {
        self.relationships.last()
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Step through `relationship` to `vertex`.
    pub fn extend(&mut self, relationship: Relationship, vertex: VertexId) -> ElementResult<()> {
        let from = self.end();
        if !relationship.involves(from) || !relationship.involves(vertex) {
            return Err(ElementError::DisconnectedPath {
                relationship: relationship.type_name().to_string(),
                from,
                to: vertex,
            });
        }
        self.relationships.push(relationship);
        self.vertices.push(vertex);
        Ok(())
    }

    /// Vertices and relationships in path order.
    pub fn entities(&self) -> impl Iterator<Item = PathEntity<'_>> + '_ {
        let steps = self
            .relationships
            .iter()
            .zip(self.vertices.iter().skip(1))
            .flat_map(|(rel, &v)| [PathEntity::Relationship(rel), PathEntity::Vertex(v)]);
        std::iter::once(PathEntity::Vertex(self.start())).chain(steps)
    }
}

/// A hyper-relationship entered through one of its roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    relationship: HyperRelationship,
    role: String,
    vertex: VertexId,
}

impl Connection {
    /// Enter `relationship` through `role`, which it must fill.
    pub fn new(relationship: HyperRelationship, role: impl Into<String>) -> ElementResult<Self> {
        let role = role.into();
        let vertex = relationship
            .participant(&role)
            .ok_or_else(|| ElementError::NotAParticipant {
                anchor: relationship.anchor,
                role: role.clone(),
            })?;
        Ok(Self {
            relationship,
            role,
            vertex,
        })
    }

    pub fn relationship(&self) -> &HyperRelationship {
        &self.relationship
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// The vertex filling the entered role.
    pub fn vertex(&self) -> VertexId {
        self.vertex
    }
}

/// An ordered sequence of connections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalPath {
    connections: Vec<Connection>,
}

impl TraversalPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn first(&self) -> Option<&Connection> {
        self.connections.first()
    }

    pub fn last(&self) -> Option<&Connection> {
        self.connections.last()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Connection> {
        self.connections.iter()
    }
}

impl<'a> IntoIterator for &'a TraversalPath {
    type Item = &'a Connection;
    type IntoIter = std::slice::Iter<'a, Connection>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
