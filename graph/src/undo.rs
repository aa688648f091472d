//! Undo log for transaction rollback.

use polyedge_core::{BinaryEdge, EdgeId, Value, Vertex, VertexId};

/// One reversible change.
///
/// Deleted entities are kept as full snapshots so rollback can restore them
/// under their original ids.
#[derive(Debug, Clone)]
pub enum UndoEntry {
    CreatedVertex(VertexId),
    DeletedVertex(Vertex),
    CreatedEdge(EdgeId),
    DeletedEdge(BinaryEdge),
    VertexProperty {
        vertex: VertexId,
        key: String,
        old_value: Option<Value>,
    },
    EdgeProperty {
        edge: EdgeId,
        key: String,
        old_value: Option<Value>,
    },
}

/// Changes recorded since the last `begin`.
#[derive(Debug, Default)]
pub struct UndoLog {
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drain entries newest first.
    pub fn drain_reversed(&mut self) -> impl Iterator<Item = UndoEntry> + '_ {
        self.entries.drain(..).rev()
    }
}
