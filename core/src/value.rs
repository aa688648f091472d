//! Property values.
//!
//! Vertex and edge properties hold scalars. Index vertices in the registry
//! hold `VertexRef`s pointing at descriptors, and descriptors hold their
//! tags as strings.

use crate::VertexId;
use std::collections::HashMap;

/// A property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// A vertex id stored as data, not as an edge.
    VertexRef(VertexId),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_vertex_ref(&self) -> Option<VertexId> {
        match self {
            Value::VertexRef(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<VertexId> for Value {
    fn from(id: VertexId) -> Self {
        Value::VertexRef(id)
    }
}

/// Properties of one vertex or edge, by key.
pub type Properties = HashMap<String, Value>;
