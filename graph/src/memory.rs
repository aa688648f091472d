//! In-memory substrate implementation.

use crate::index::AdjacencyIndex;
use crate::store::{EdgeIter, GraphStore};
use crate::undo::{UndoEntry, UndoLog};
use polyedge_core::{
    BinaryEdge, Direction, EdgeId, GraphError, GraphResult, Value, Vertex, VertexId,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// ID allocator for vertices and edges.
///
/// Ids are never reused, not even after a rollback.
#[derive(Debug)]
struct IdAllocator {
    next_vertex_id: u64,
    next_edge_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self {
            next_vertex_id: 0,
            next_edge_id: 1,
        }
    }

    fn alloc_vertex_id(&mut self) -> VertexId {
        let id = VertexId::new(self.next_vertex_id);
        self.next_vertex_id += 1;
        id
    }

    fn alloc_edge_id(&mut self) -> EdgeId {
        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        id
    }
}

/// The in-memory graph storage.
#[derive(Debug)]
pub struct MemoryGraph {
    /// Vertex storage
    vertices: HashMap<VertexId, Vertex>,
    /// Edge storage
    edges: HashMap<EdgeId, BinaryEdge>,
    /// ID allocator
    id_alloc: IdAllocator,
    /// Adjacency index
    adj_index: AdjacencyIndex,
    /// Well-known root vertex
    root: VertexId,
    /// Present while a transaction is open
    undo: Option<UndoLog>,
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGraph {
    /// Create a graph holding only the root vertex.
    pub fn new() -> Self {
        let mut id_alloc = IdAllocator::new();
        let root = id_alloc.alloc_vertex_id();
        let mut vertices = HashMap::new();
        vertices.insert(root, Vertex::new(root));

        Self {
            vertices,
            edges: HashMap::new(),
            id_alloc,
            adj_index: AdjacencyIndex::new(),
            root,
            undo: None,
        }
    }

    /// Get a vertex by ID.
    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Number of vertices, root included.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges, in no particular order.
    pub fn all_edges(&self) -> impl Iterator<Item = &BinaryEdge> + '_ {
        self.edges.values()
    }

    fn record(&mut self, entry: UndoEntry) {
        if let Some(log) = self.undo.as_mut() {
            log.record(entry);
        }
    }

    fn vertex_mut(&mut self, id: VertexId) -> GraphResult<&mut Vertex> {
        self.vertices
            .get_mut(&id)
            .ok_or(GraphError::VertexNotFound(id))
    }

    fn insert_edge(&mut self, edge: BinaryEdge) {
        self.adj_index.insert(edge.id, edge.start, edge.end);
        self.edges.insert(edge.id, edge);
    }

    fn remove_edge(&mut self, id: EdgeId) -> Option<BinaryEdge> {
        let edge = self.edges.remove(&id)?;
        self.adj_index.remove(id, edge.start, edge.end);
        Some(edge)
    }

    fn revert(&mut self, entry: UndoEntry) {
        match entry {
            UndoEntry::CreatedVertex(id) => {
                self.vertices.remove(&id);
            }
            UndoEntry::DeletedVertex(vertex) => {
                self.vertices.insert(vertex.id, vertex);
            }
            UndoEntry::CreatedEdge(id) => {
                self.remove_edge(id);
            }
            UndoEntry::DeletedEdge(edge) => {
                self.insert_edge(edge);
            }
            UndoEntry::VertexProperty {
                vertex,
                key,
                old_value,
            } => {
                if let Some(v) = self.vertices.get_mut(&vertex) {
                    match old_value {
                        Some(value) => v.set_property(key, value),
                        None => v.remove_property(&key),
                    };
                }
            }
            UndoEntry::EdgeProperty {
                edge,
                key,
                old_value,
            } => {
                if let Some(e) = self.edges.get_mut(&edge) {
                    match old_value {
                        Some(value) => e.properties.insert(key, value),
                        None => e.properties.remove(&key),
                    };
                }
            }
        }
    }
}

impl GraphStore for MemoryGraph {
    fn root(&self) -> VertexId {
        self.root
    }

    // ==================== Vertex Operations ====================

    fn create_vertex(&mut self) -> VertexId {
        let id = self.id_alloc.alloc_vertex_id();
        self.vertices.insert(id, Vertex::new(id));
        self.record(UndoEntry::CreatedVertex(id));
        id
    }

    fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    fn delete_vertex(&mut self, id: VertexId) -> GraphResult<()> {
        if id == self.root {
            return Err(GraphError::RootVertex(id));
        }
        if !self.vertices.contains_key(&id) {
            return Err(GraphError::VertexNotFound(id));
        }
        if self.adj_index.has_edges(id) {
            return Err(GraphError::VertexHasEdges(id));
        }

        if let Some(vertex) = self.vertices.remove(&id) {
            self.record(UndoEntry::DeletedVertex(vertex));
        }
        Ok(())
    }

    fn vertex_property(&self, id: VertexId, key: &str) -> GraphResult<Option<&Value>> {
        self.vertices
            .get(&id)
            .map(|v| v.get_property(key))
            .ok_or(GraphError::VertexNotFound(id))
    }

    fn set_vertex_property(
        &mut self,
        id: VertexId,
        key: &str,
        value: Value,
    ) -> GraphResult<Option<Value>> {
        let old_value = self.vertex_mut(id)?.set_property(key.to_string(), value);
        self.record(UndoEntry::VertexProperty {
            vertex: id,
            key: key.to_string(),
            old_value: old_value.clone(),
        });
        Ok(old_value)
    }

    fn remove_vertex_property(&mut self, id: VertexId, key: &str) -> GraphResult<Option<Value>> {
        let old_value = self.vertex_mut(id)?.remove_property(key);
        if old_value.is_some() {
            self.record(UndoEntry::VertexProperty {
                vertex: id,
                key: key.to_string(),
                old_value: old_value.clone(),
            });
        }
        Ok(old_value)
    }

    fn vertex_property_keys(&self, id: VertexId) -> GraphResult<Vec<String>> {
        let vertex = self.vertices.get(&id).ok_or(GraphError::VertexNotFound(id))?;
        let mut keys: Vec<String> = vertex.properties.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    // ==================== Edge Operations ====================

    fn create_edge(
        &mut self,
        type_name: &str,
        start: VertexId,
        end: VertexId,
    ) -> GraphResult<EdgeId> {
        for vertex in [start, end] {
            if !self.vertices.contains_key(&vertex) {
                return Err(GraphError::VertexNotFound(vertex));
            }
        }

        let id = self.id_alloc.alloc_edge_id();
        self.insert_edge(BinaryEdge::new(id, type_name, start, end));
        self.record(UndoEntry::CreatedEdge(id));
        trace!(edge = %id, type_name, %start, %end, "created edge");
        Ok(id)
    }

    fn edge(&self, id: EdgeId) -> Option<&BinaryEdge> {
        self.edges.get(&id)
    }

    fn set_edge_property(
        &mut self,
        id: EdgeId,
        key: &str,
        value: Value,
    ) -> GraphResult<Option<Value>> {
        let edge = self.edges.get_mut(&id).ok_or(GraphError::EdgeNotFound(id))?;
        let old_value = edge.properties.insert(key.to_string(), value);
        self.record(UndoEntry::EdgeProperty {
            edge: id,
            key: key.to_string(),
            old_value: old_value.clone(),
        });
        Ok(old_value)
    }

    fn delete_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        let edge = self.remove_edge(id).ok_or(GraphError::EdgeNotFound(id))?;
        self.record(UndoEntry::DeletedEdge(edge));
        Ok(())
    }

    // ==================== Query Operations ====================

    fn edges<'a>(
        &'a self,
        vertex: VertexId,
        direction: Direction,
        types: &[String],
    ) -> GraphResult<EdgeIter<'a>> {
        if !self.vertices.contains_key(&vertex) {
            return Err(GraphError::VertexNotFound(vertex));
        }

        let filter: HashSet<String> = types.iter().cloned().collect();
        let edges = &self.edges;
        Ok(Box::new(
            self.adj_index
                .edges(vertex, direction)
                .filter_map(move |id| edges.get(&id))
                .filter(move |edge| filter.is_empty() || filter.contains(&edge.type_name)),
        ))
    }

    // ==================== Transactions ====================

    fn begin(&mut self) -> GraphResult<()> {
        if self.undo.is_some() {
            return Err(GraphError::TransactionActive);
        }
        self.undo = Some(UndoLog::new());
        trace!("transaction started");
        Ok(())
    }

    fn commit(&mut self) -> GraphResult<()> {
        let log = self.undo.take().ok_or(GraphError::NoTransaction)?;
        trace!(changes = log.len(), "transaction committed");
        Ok(())
    }

    fn rollback(&mut self) -> GraphResult<()> {
        let mut log = self.undo.take().ok_or(GraphError::NoTransaction)?;
        debug!(changes = log.len(), "rolling back transaction");
        let entries: Vec<UndoEntry> = log.drain_reversed().collect();
        for entry in entries {
            self.revert(entry);
        }
        Ok(())
    }

    fn transaction_active(&self) -> bool {
        self.undo.is_some()
    }
}
