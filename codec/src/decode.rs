//! Decoding - substrate edge streams to relationships.
//!
//! For a vertex `v`, every substrate edge is classified by its type name:
//! - plain (no separator): the edge is the relationship;
//! - fragment `base/#/role` ending at `v`: `v` participates in the
//!   relationship anchored at the fragment's start vertex;
//! - fragment starting at `v`: `v` is itself an anchor, skipped;
//! - malformed: handled by the [`DecodePolicy`].
//!
//! A fragment is well formed only if its base names a registered unary or
//! hyper type that defines its role. Anything else is malformed.
//!
//! An anchor reached through several fragments (the same vertex in several
//! roles) is yielded once per stream.

use crate::{
    CodecConfig, CodecError, CodecResult, DecodePolicy, HyperRelationship, Participant,
    PlainRelationship, Relationship,
};
use polyedge_core::{fragment_prefix, Direction, EdgeId, FragmentName, TypeName, VertexId};
use polyedge_graph::{EdgeIter, GraphStore};
use polyedge_registry::{EdgeType, EdgeTypeRegistry};
use std::collections::HashSet;
use std::iter::FusedIterator;
use tracing::{trace, warn};

/// Lazy stream of the relationships of one vertex.
///
/// Built over the store's edge stream; the store stays borrowed until the
/// stream is dropped. Decode faults surface as `Err` items.
pub struct Relationships<'g, S: GraphStore + ?Sized> {
    store: &'g S,
    registry: &'g EdgeTypeRegistry,
    vertex: VertexId,
    edges: EdgeIter<'g>,
    visited: HashSet<VertexId>,
    role: Option<String>,
    policy: DecodePolicy,
    finished: bool,
}

impl<'g, S: GraphStore + ?Sized> Relationships<'g, S> {
    fn new(
        store: &'g S,
        registry: &'g EdgeTypeRegistry,
        vertex: VertexId,
        edges: EdgeIter<'g>,
        role: Option<String>,
        policy: DecodePolicy,
    ) -> Self {
        Self {
            store,
            registry,
            vertex,
            edges,
            visited: HashSet::new(),
            role,
            policy,
            finished: false,
        }
    }

    /// Number of distinct anchors yielded so far.
    pub fn anchors_seen(&self) -> usize {
        self.visited.len()
    }
}

impl<S: GraphStore + ?Sized> Iterator for Relationships<'_, S> {
    type Item = CodecResult<Relationship>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some(edge) = self.edges.next() else {
                self.finished = true;
                return None;
            };

            match TypeName::parse(&edge.type_name) {
                TypeName::Plain(_) => {
                    if self.role.is_some() {
                        continue;
                    }
                    return Some(Ok(Relationship::Plain(PlainRelationship::from(edge))));
                }
                TypeName::Malformed(type_name) => {
                    if let Some(err) = malformed(self.policy, edge.id, type_name) {
                        return Some(Err(err));
                    }
                }
                TypeName::Fragment(name) => {
                    if edge.end != self.vertex {
                        trace!(edge = %edge.id, "outgoing fragment, vertex is an anchor");
                        continue;
                    }
                    if self.role.as_deref().is_some_and(|role| role != name.role) {
                        continue;
                    }
                    if self.visited.contains(&edge.start) {
                        trace!(anchor = %edge.start, "anchor already yielded");
                        continue;
                    }
                    let edge_type = match resolve_fragment(self.store, self.registry, &name) {
                        Ok(Some(edge_type)) => edge_type,
                        Ok(None) => match malformed(self.policy, edge.id, &edge.type_name) {
                            Some(err) => return Some(Err(err)),
                            None => continue,
                        },
                        Err(err) => return Some(Err(err)),
                    };
                    self.visited.insert(edge.start);
                    let decoded = reconstruct(self.store, edge.start, &edge_type, self.policy);
                    return Some(decoded.map(Relationship::Hyper));
                }
            }
        }
    }
}

impl<S: GraphStore + ?Sized> FusedIterator for Relationships<'_, S> {}

/// Stream the relationships of `vertex`.
///
/// `types` filters the substrate edge types; an empty slice means all. To
/// match hyper types by name, pass names expanded through the registry.
pub fn relationships<'g, S: GraphStore + ?Sized>(
    store: &'g S,
    registry: &'g EdgeTypeRegistry,
    vertex: VertexId,
    direction: Direction,
    types: &[String],
    config: &CodecConfig,
) -> CodecResult<Relationships<'g, S>> {
    let edges = store.edges(vertex, direction, types)?;
    Ok(Relationships::new(
        store,
        registry,
        vertex,
        edges,
        None,
        config.decode_policy,
    ))
}

/// Stream the hyper-relationships in which `vertex` fills `role`.
///
/// `types` are base type names and must each define `role`. An empty slice
/// means any type and is not checked.
pub fn relationships_with_role<'g, S: GraphStore + ?Sized>(
    store: &'g S,
    registry: &'g EdgeTypeRegistry,
    vertex: VertexId,
    role: &str,
    types: &[String],
    config: &CodecConfig,
) -> CodecResult<Relationships<'g, S>> {
    let filter = role_fragment_names(store, registry, role, types)?;
    let edges = store.edges(vertex, Direction::Incoming, &filter)?;
    Ok(Relationships::new(
        store,
        registry,
        vertex,
        edges,
        Some(role.to_string()),
        config.decode_policy,
    ))
}

/// The fragment type names encoding `role` of each of `types`.
///
/// Every type must be a registered unary or hyper type defining `role`.
pub fn role_fragment_names<S: GraphStore + ?Sized>(
    store: &S,
    registry: &EdgeTypeRegistry,
    role: &str,
    types: &[String],
) -> CodecResult<Vec<String>> {
    types
        .iter()
        .map(|name| {
            let edge_type = registry
                .lookup(store, name)?
                .ok_or_else(|| CodecError::UnknownEdgeType(name.clone()))?;
            if !edge_type.is_anchored() {
                return Err(CodecError::unsupported_arity(
                    edge_type.name(),
                    edge_type.kind(),
                    "role-qualified query",
                ));
            }
            if edge_type.connector(role).is_err() {
                return Err(CodecError::unknown_role(edge_type.name(), role));
            }
            Ok(edge_type.fragment_type_name(role)?)
        })
        .collect()
}

/// The one relationship of `type_name` in which `vertex` fills `role`.
///
/// `Ok(None)` when there is none, `Multiplicity` when there are several.
pub fn single<S: GraphStore + ?Sized>(
    store: &S,
    registry: &EdgeTypeRegistry,
    vertex: VertexId,
    role: &str,
    type_name: &str,
    config: &CodecConfig,
) -> CodecResult<Option<HyperRelationship>> {
    let types = [type_name.to_string()];
    let mut stream = relationships_with_role(store, registry, vertex, role, &types, config)?;

    let Some(first) = stream.next().transpose()? else {
        return Ok(None);
    };
    if stream.next().transpose()?.is_none() {
        return Ok(first.as_hyper().cloned());
    }

    for item in stream.by_ref() {
        item?;
    }
    Err(CodecError::Multiplicity {
        vertex,
        edge_type: type_name.to_string(),
        role: role.to_string(),
        count: stream.anchors_seen(),
    })
}

/// Read the relationship anchored at `anchor`.
///
/// The first fragment leaving `anchor` that resolves to a registered type
/// decides the relationship type.
pub fn read_relationship<S: GraphStore + ?Sized>(
    store: &S,
    registry: &EdgeTypeRegistry,
    anchor: VertexId,
    config: &CodecConfig,
) -> CodecResult<HyperRelationship> {
    for edge in store.edges(anchor, Direction::Outgoing, &[])? {
        let TypeName::Fragment(name) = TypeName::parse(&edge.type_name) else {
            continue;
        };
        match resolve_fragment(store, registry, &name)? {
            Some(edge_type) => return reconstruct(store, anchor, &edge_type, config.decode_policy),
            None => {
                if let Some(err) = malformed(config.decode_policy, edge.id, &edge.type_name) {
                    return Err(err);
                }
            }
        }
    }
    Err(CodecError::NotAnAnchor(anchor))
}

/// The registered type a fragment belongs to.
///
/// `None` when the base is unknown, is not anchored, or lacks the role.
fn resolve_fragment<S: GraphStore + ?Sized>(
    store: &S,
    registry: &EdgeTypeRegistry,
    name: &FragmentName<'_>,
) -> CodecResult<Option<EdgeType>> {
    let Some(edge_type) = registry.lookup(store, name.base)? else {
        return Ok(None);
    };
    if !edge_type.is_anchored() || edge_type.connector(name.role).is_err() {
        return Ok(None);
    }
    Ok(Some(edge_type))
}

/// `Strict` turns a malformed fragment into an error; `Lenient` logs it.
fn malformed(policy: DecodePolicy, edge: EdgeId, type_name: &str) -> Option<CodecError> {
    match policy {
        DecodePolicy::Strict => Some(CodecError::MalformedFragment {
            edge,
            type_name: type_name.to_string(),
        }),
        DecodePolicy::Lenient => {
            warn!(%edge, type_name, "skipping malformed fragment");
            None
        }
    }
}

/// Collect every fragment of `edge_type` leaving `anchor`, in creation order.
fn reconstruct<S: GraphStore + ?Sized>(
    store: &S,
    anchor: VertexId,
    edge_type: &EdgeType,
    policy: DecodePolicy,
) -> CodecResult<HyperRelationship> {
    let prefix = fragment_prefix(edge_type.name());
    let mut participants = Vec::new();

    for edge in store.edges(anchor, Direction::Outgoing, &[])? {
        if !edge.type_name.starts_with(&prefix) {
            continue;
        }
        match TypeName::parse(&edge.type_name) {
            TypeName::Fragment(name) if edge_type.connector(name.role).is_ok() => {
                participants.push(Participant {
                    role: name.role.to_string(),
                    vertex: edge.end,
                    fragment: edge.id,
                })
            }
            _ => {
                if let Some(err) = malformed(policy, edge.id, &edge.type_name) {
                    return Err(err);
                }
            }
        }
    }

    Ok(HyperRelationship {
        anchor,
        type_name: edge_type.name().to_string(),
        descriptor: edge_type.descriptor(),
        participants,
    })
}
