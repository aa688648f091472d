//! Entity structures for the binary substrate.
//!
//! Vertices and directed binary edges are the only primitives the storage
//! engine understands. Everything richer is encoded on top of them.

use crate::{EdgeId, Properties, Value, VertexId};
use serde::{Deserialize, Serialize};

/// A vertex in the substrate graph.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Unique identifier for this vertex.
    pub id: VertexId,
    /// Property values.
    pub properties: Properties,
}

impl Vertex {
    /// Create a new vertex with no properties.
    pub fn new(id: VertexId) -> Self {
        Self {
            id,
            properties: Properties::new(),
        }
    }

    /// Get a property value by key.
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Set a property value, returning the previous one.
    pub fn set_property(&mut self, key: String, value: Value) -> Option<Value> {
        self.properties.insert(key, value)
    }

    /// Remove a property.
    pub fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }
}

/// A directed, typed binary edge.
///
/// The type name is fixed at creation. Hyper-relationship fragments are
/// ordinary binary edges whose type name carries the separator.
#[derive(Debug, Clone)]
pub struct BinaryEdge {
    /// Unique identifier for this edge.
    pub id: EdgeId,
    /// Edge type name.
    pub type_name: String,
    /// Start vertex.
    pub start: VertexId,
    /// End vertex.
    pub end: VertexId,
    /// Property values.
    pub properties: Properties,
}

impl BinaryEdge {
    /// Create a new edge with no properties.
    pub fn new(id: EdgeId, type_name: impl Into<String>, start: VertexId, end: VertexId) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            start,
            end,
            properties: Properties::new(),
        }
    }

    /// The endpoint opposite to `vertex`, or None if `vertex` is not an endpoint.
    pub fn other_end(&self, vertex: VertexId) -> Option<VertexId> {
        if self.start == vertex {
            Some(self.end)
        } else if self.end == vertex {
            Some(self.start)
        } else {
            None
        }
    }

    /// Check if this edge touches a vertex at either end.
    pub fn involves(&self, vertex: VertexId) -> bool {
        self.start == vertex || self.end == vertex
    }

    /// Get a property value by key.
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Direction of an edge relative to a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// The vertex is the start of the edge.
    Outgoing,
    /// The vertex is the end of the edge.
    Incoming,
    /// Either end.
    #[default]
    Both,
}

impl Direction {
    /// The opposite direction (Both stays Both).
    pub fn reverse(self) -> Self {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
            Direction::Both => Direction::Both,
        }
    }

    /// Check whether `edge` is seen in this direction from `vertex`.
    pub fn matches(self, vertex: VertexId, edge: &BinaryEdge) -> bool {
        match self {
            Direction::Outgoing => edge.start == vertex,
            Direction::Incoming => edge.end == vertex,
            Direction::Both => edge.involves(vertex),
        }
    }
}
