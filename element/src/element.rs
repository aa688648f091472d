//! Element handles.

use crate::{ElementResult, HyperGraph, Path, RelationshipQuery};
use polyedge_codec::{
    relationships, relationships_with_role, role_fragment_names, single, HyperRelationship,
    Relationships,
};
use polyedge_core::{Direction, Value, VertexId};
use polyedge_graph::GraphStore;

/// Read handle on one vertex.
pub struct Element<'g, S: GraphStore> {
    graph: &'g HyperGraph<S>,
    id: VertexId,
}

impl<'g, S: GraphStore> Element<'g, S> {
    pub(crate) fn new(graph: &'g HyperGraph<S>, id: VertexId) -> Self {
        Self { graph, id }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    // ==================== Relationships ====================

    /// Stream the relationships matching `query`.
    ///
    /// Hyper-relationships are seen through their fragments, which point at
    /// this vertex, so `Direction::Outgoing` yields plain edges only.
    pub fn relationships(&self, query: &RelationshipQuery) -> ElementResult<Relationships<'g, S>> {
        let store = self.graph.store();
        let types = self
            .graph
            .registry()
            .expand_type_names(store, query.get_types())?;
        Ok(relationships(
            store,
            self.graph.registry(),
            self.id,
            query.get_direction(),
            &types,
            self.graph.config(),
        )?)
    }

    /// Stream the hyper-relationships in which this vertex fills `role`.
    ///
    /// Each of `types` must be a registered unary or hyper type defining
    /// `role`. An empty `types` slice matches any type.
    pub fn relationships_with_role(
        &self,
        role: &str,
        types: &[&str],
    ) -> ElementResult<Relationships<'g, S>> {
        let types: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        Ok(relationships_with_role(
            self.graph.store(),
            self.graph.registry(),
            self.id,
            role,
            &types,
            self.graph.config(),
        )?)
    }

    /// The one `type_name` relationship in which this vertex fills `role`.
    pub fn single_relationship(
        &self,
        role: &str,
        type_name: &str,
    ) -> ElementResult<Option<HyperRelationship>> {
        Ok(single(
            self.graph.store(),
            self.graph.registry(),
            self.id,
            role,
            type_name,
            self.graph.config(),
        )?)
    }

    pub fn has_relationship(&self, query: &RelationshipQuery) -> ElementResult<bool> {
        let mut stream = self.relationships(query)?;
        Ok(stream.next().transpose()?.is_some())
    }

    /// Whether this vertex fills `role` in a relationship of any of `types`.
    pub fn has_role_relationship(&self, role: &str, types: &[&str]) -> ElementResult<bool> {
        if types.is_empty() {
            let mut stream = self.relationships_with_role(role, types)?;
            return Ok(stream.next().transpose()?.is_some());
        }
        let types: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        let encoded = role_fragment_names(self.graph.store(), self.graph.registry(), role, &types)?;
        Ok(self
            .graph
            .store()
            .has_edges(self.id, Direction::Incoming, &encoded)?)
    }

    // ==================== Properties ====================

    pub fn property(&self, key: &str) -> ElementResult<Option<&'g Value>> {
        Ok(self.graph.store().vertex_property(self.id, key)?)
    }

    pub fn has_property(&self, key: &str) -> ElementResult<bool> {
        Ok(self.property(key)?.is_some())
    }

    pub fn property_keys(&self) -> ElementResult<Vec<String>> {
        Ok(self.graph.store().vertex_property_keys(self.id)?)
    }

    /// This element as a zero-length path.
    pub fn as_path(&self) -> Path {
        Path::single(self.id)
    }
}

/// Write handle on one vertex.
pub struct ElementMut<'g, S: GraphStore> {
    graph: &'g mut HyperGraph<S>,
    id: VertexId,
}

impl<'g, S: GraphStore> ElementMut<'g, S> {
    pub(crate) fn new(graph: &'g mut HyperGraph<S>, id: VertexId) -> Self {
        Self { graph, id }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Set a property, returning the previous value.
    pub fn set_property(
        &mut self,
        key: &str,
        value: impl Into<Value>,
    ) -> ElementResult<Option<Value>> {
        Ok(self
            .graph
            .store_mut()
            .set_vertex_property(self.id, key, value.into())?)
    }

    pub fn remove_property(&mut self, key: &str) -> ElementResult<Option<Value>> {
        Ok(self.graph.store_mut().remove_vertex_property(self.id, key)?)
    }

    /// Reborrow as a read handle.
    pub fn as_element(&self) -> Element<'_, S> {
        Element::new(&*self.graph, self.id)
    }
}
