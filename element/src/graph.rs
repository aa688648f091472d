//! The hyper-relationship facade over a substrate store.

use crate::{Element, ElementError, ElementMut, ElementResult};
use polyedge_codec::{
    create_binary, create_relationship, delete_relationship, read_relationship, CodecConfig,
    HyperRelationship, PlainRelationship,
};
use polyedge_core::{Properties, VertexId};
use polyedge_graph::{in_transaction, GraphStore, MemoryGraph};
use polyedge_registry::{EdgeType, EdgeTypeDef, EdgeTypeRegistry};

/// A store, its edge type registry and the codec configuration.
#[derive(Debug)]
pub struct HyperGraph<S: GraphStore = MemoryGraph> {
    store: S,
    registry: EdgeTypeRegistry,
    config: CodecConfig,
}

impl HyperGraph<MemoryGraph> {
    /// A hypergraph over an empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryGraph::new())
    }
}

impl<S: GraphStore> HyperGraph<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, CodecConfig::default())
    }

    pub fn with_config(store: S, config: CodecConfig) -> Self {
        Self {
            store,
            registry: EdgeTypeRegistry::new(),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct store access, for transactions spanning several calls.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn registry(&self) -> &EdgeTypeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    // ==================== Types ====================

    /// Resolve an edge type, registering it on first use.
    pub fn edge_type(&mut self, def: &EdgeTypeDef) -> ElementResult<EdgeType> {
        Ok(self.registry.get_or_create(&mut self.store, def)?)
    }

    pub fn lookup_edge_type(&self, name: &str) -> ElementResult<Option<EdgeType>> {
        Ok(self.registry.lookup(&self.store, name)?)
    }

    // ==================== Mutation ====================

    pub fn create_vertex(&mut self) -> VertexId {
        self.store.create_vertex()
    }

    /// Create a vertex carrying `properties`, atomically.
    pub fn create_vertex_with(&mut self, properties: Properties) -> ElementResult<VertexId> {
        in_transaction(&mut self.store, |s| -> ElementResult<VertexId> {
            let id = s.create_vertex();
            for (key, value) in properties {
                s.set_vertex_property(id, &key, value)?;
            }
            Ok(id)
        })
    }

    /// Create a unary or hyper relationship.
    pub fn create_edge(
        &mut self,
        edge_type: &EdgeType,
        participants: &[(&str, VertexId)],
    ) -> ElementResult<HyperRelationship> {
        Ok(create_relationship(
            &mut self.store,
            edge_type,
            participants,
            &self.config,
        )?)
    }

    /// Create a plain edge of a binary type.
    pub fn create_binary_edge(
        &mut self,
        edge_type: &EdgeType,
        start: VertexId,
        end: VertexId,
    ) -> ElementResult<PlainRelationship> {
        Ok(create_binary(&mut self.store, edge_type, start, end)?)
    }

    /// Delete a hyper-relationship by its anchor.
    pub fn delete_relationship(&mut self, anchor: VertexId) -> ElementResult<HyperRelationship> {
        Ok(delete_relationship(&mut self.store, &self.registry, anchor)?)
    }

    // ==================== Access ====================

    /// Read the hyper-relationship anchored at `anchor`.
    pub fn relationship(&self, anchor: VertexId) -> ElementResult<HyperRelationship> {
        Ok(read_relationship(&self.store, &self.registry, anchor, &self.config)?)
    }

    pub fn element(&self, id: VertexId) -> ElementResult<Element<'_, S>> {
        if !self.store.contains_vertex(id) {
            return Err(ElementError::VertexNotFound(id));
        }
        Ok(Element::new(self, id))
    }

    pub fn element_mut(&mut self, id: VertexId) -> ElementResult<ElementMut<'_, S>> {
        if !self.store.contains_vertex(id) {
            return Err(ElementError::VertexNotFound(id));
        }
        Ok(ElementMut::new(self, id))
    }
}
