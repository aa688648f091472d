//! The substrate interface.

use polyedge_core::{BinaryEdge, Direction, EdgeId, GraphError, GraphResult, Value, VertexId};
use tracing::trace;

/// Lazy stream of a vertex's binary edges.
pub type EdgeIter<'a> = Box<dyn Iterator<Item = &'a BinaryEdge> + 'a>;

/// Operations consumed from a binary graph storage engine.
///
/// Mutations take `&mut self`, so holding the store exclusively serializes
/// writers. Edge streams borrow the store, so no writer can interleave with
/// a running traversal.
pub trait GraphStore {
    /// The well-known root vertex. It always exists.
    fn root(&self) -> VertexId;

    // ==================== Vertices ====================

    fn create_vertex(&mut self) -> VertexId;

    fn contains_vertex(&self, id: VertexId) -> bool;

    /// Delete a vertex. Fails if any edge still touches it.
    fn delete_vertex(&mut self, id: VertexId) -> GraphResult<()>;

    fn vertex_property(&self, id: VertexId, key: &str) -> GraphResult<Option<&Value>>;

    /// Set a property, returning the previous value.
    fn set_vertex_property(
        &mut self,
        id: VertexId,
        key: &str,
        value: Value,
    ) -> GraphResult<Option<Value>>;

    fn remove_vertex_property(&mut self, id: VertexId, key: &str) -> GraphResult<Option<Value>>;

    fn vertex_property_keys(&self, id: VertexId) -> GraphResult<Vec<String>>;

    // ==================== Edges ====================

    /// Create a directed edge `start -> end`. The type name is immutable.
    fn create_edge(&mut self, type_name: &str, start: VertexId, end: VertexId)
        -> GraphResult<EdgeId>;

    fn edge(&self, id: EdgeId) -> Option<&BinaryEdge>;

    fn set_edge_property(&mut self, id: EdgeId, key: &str, value: Value)
        -> GraphResult<Option<Value>>;

    fn delete_edge(&mut self, id: EdgeId) -> GraphResult<()>;

    /// Stream the edges of `vertex` seen in `direction`.
    ///
    /// An empty `types` slice means no type filter. Edges come in the store's
    /// natural order and each edge appears once, even a self-loop.
    fn edges<'a>(
        &'a self,
        vertex: VertexId,
        direction: Direction,
        types: &[String],
    ) -> GraphResult<EdgeIter<'a>>;

    // ==================== Transactions ====================

    fn begin(&mut self) -> GraphResult<()>;

    fn commit(&mut self) -> GraphResult<()>;

    /// Undo every change since `begin`.
    fn rollback(&mut self) -> GraphResult<()>;

    fn transaction_active(&self) -> bool;

    // ==================== Provided ====================

    /// Whether `vertex` has at least one edge matching the filter.
    fn has_edges(&self, vertex: VertexId, direction: Direction, types: &[String]) -> GraphResult<bool> {
        Ok(self.edges(vertex, direction, types)?.next().is_some())
    }
}

/// Run `f` atomically against `store`.
///
/// Opens a transaction, commits on `Ok` and rolls back on `Err`. When a
/// transaction is already active, `f` joins it and the outer owner decides.
pub fn in_transaction<S, T, E, F>(store: &mut S, f: F) -> Result<T, E>
where
    S: GraphStore + ?Sized,
    E: From<GraphError>,
    F: FnOnce(&mut S) -> Result<T, E>,
{
    if store.transaction_active() {
        trace!("joining active transaction");
        return f(store);
    }

    store.begin()?;
    match f(store) {
        Ok(value) => {
            store.commit()?;
            Ok(value)
        }
        Err(e) => {
            store.rollback()?;
            Err(e)
        }
    }
}
