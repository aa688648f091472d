//! Adjacency index for edge lookups.

use polyedge_core::{Direction, EdgeId, VertexId};
use std::collections::{BTreeSet, HashMap};

/// Adjacency index: VertexId -> { outbound: Set<EdgeId>, inbound: Set<EdgeId> }
///
/// Sets are ordered by EdgeId, which is allocated monotonically, so every
/// stream comes out in creation order.
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    /// Edges where the vertex is the start.
    outbound: HashMap<VertexId, BTreeSet<EdgeId>>,
    /// Edges where the vertex is the end.
    inbound: HashMap<VertexId, BTreeSet<EdgeId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge_id: EdgeId, start: VertexId, end: VertexId) {
        self.outbound.entry(start).or_default().insert(edge_id);
        self.inbound.entry(end).or_default().insert(edge_id);
    }

    pub fn remove(&mut self, edge_id: EdgeId, start: VertexId, end: VertexId) {
        Self::remove_from(&mut self.outbound, start, edge_id);
        Self::remove_from(&mut self.inbound, end, edge_id);
    }

    fn remove_from(index: &mut HashMap<VertexId, BTreeSet<EdgeId>>, vertex: VertexId, edge_id: EdgeId) {
        if let Some(set) = index.get_mut(&vertex) {
            set.remove(&edge_id);
            if set.is_empty() {
                index.remove(&vertex);
            }
        }
    }

    /// Get edges of a vertex in the given direction, ordered by id.
    pub fn edges(&self, vertex: VertexId, direction: Direction) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        match direction {
            Direction::Outgoing => Box::new(Self::ids(&self.outbound, vertex)),
            Direction::Incoming => Box::new(Self::ids(&self.inbound, vertex)),
            Direction::Both => match (self.outbound.get(&vertex), self.inbound.get(&vertex)) {
                (Some(out), Some(inc)) => Box::new(out.union(inc).copied()),
                (Some(out), None) => Box::new(out.iter().copied()),
                (None, Some(inc)) => Box::new(inc.iter().copied()),
                (None, None) => Box::new(std::iter::empty()),
            },
        }
    }

    fn ids(
        index: &HashMap<VertexId, BTreeSet<EdgeId>>,
        vertex: VertexId,
    ) -> impl Iterator<Item = EdgeId> + '_ {
        index
            .get(&vertex)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Check if a vertex has any edge at all.
    pub fn has_edges(&self, vertex: VertexId) -> bool {
        self.outbound.contains_key(&vertex) || self.inbound.contains_key(&vertex)
    }
}
