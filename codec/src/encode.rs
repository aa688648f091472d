//! Encoding - relationships to substrate edges.
//!
//! A relationship of unary or hyper type `T` is one anchor vertex plus one
//! fragment edge `anchor -> participant` typed `T/#/role` per role. Binary
//! types are stored as plain edges.

use crate::decode::read_relationship;
use crate::{
    CodecConfig, CodecError, CodecResult, HyperRelationship, Participant, PlainRelationship,
};
use polyedge_core::{Direction, GraphError, VertexId};
use polyedge_graph::{in_transaction, GraphStore};
use polyedge_registry::{EdgeKind, EdgeType, EdgeTypeRegistry};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Create a unary or hyper relationship.
///
/// Every declared role must be filled exactly once; one vertex may fill
/// several roles. On any failure nothing is left behind.
#[instrument(level = "debug", skip_all, fields(edge_type = edge_type.name()))]
pub fn create_relationship<S: GraphStore + ?Sized>(
    store: &mut S,
    edge_type: &EdgeType,
    participants: &[(&str, VertexId)],
    config: &CodecConfig,
) -> CodecResult<HyperRelationship> {
    if !edge_type.is_anchored() {
        return Err(CodecError::unsupported_arity(
            edge_type.name(),
            edge_type.kind(),
            "anchored relationship creation",
        ));
    }
    let ordered = order_participants(edge_type, participants)?;

    in_transaction(store, |s| -> CodecResult<HyperRelationship> {
        for &(_, vertex) in &ordered {
            if !s.contains_vertex(vertex) {
                return Err(GraphError::VertexNotFound(vertex).into());
            }
        }
        if config.enforce_cardinality {
            check_cardinality(s, edge_type, &ordered)?;
        }

        let anchor = s.create_vertex();
        let mut created = Vec::with_capacity(ordered.len());
        for (role, vertex) in ordered {
            let fragment = s.create_edge(&edge_type.fragment_type_name(role)?, anchor, vertex)?;
            created.push(Participant {
                role: role.to_string(),
                vertex,
                fragment,
            });
        }

        debug!(%anchor, arity = created.len(), "created relationship");
        Ok(HyperRelationship {
            anchor,
            type_name: edge_type.name().to_string(),
            descriptor: edge_type.descriptor(),
            participants: created,
        })
    })
}

/// Create a plain edge of a binary type.
pub fn create_binary<S: GraphStore + ?Sized>(
    store: &mut S,
    edge_type: &EdgeType,
    start: VertexId,
    end: VertexId,
) -> CodecResult<PlainRelationship> {
    if edge_type.kind() != EdgeKind::Binary {
        return Err(CodecError::unsupported_arity(
            edge_type.name(),
            edge_type.kind(),
            "binary edge creation",
        ));
    }
    let edge = store.create_edge(edge_type.name(), start, end)?;
    Ok(PlainRelationship {
        edge,
        type_name: edge_type.name().to_string(),
        start,
        end,
    })
}

/// Delete the relationship anchored at `anchor`: its fragments, then the
/// anchor itself.
#[instrument(level = "debug", skip(store, registry))]
pub fn delete_relationship<S: GraphStore + ?Sized>(
    store: &mut S,
    registry: &EdgeTypeRegistry,
    anchor: VertexId,
) -> CodecResult<HyperRelationship> {
    let relationship = read_relationship(&*store, registry, anchor, &CodecConfig::default())?;
    in_transaction(store, |s| {
        for participant in &relationship.participants {
            s.delete_edge(participant.fragment)?;
        }
        s.delete_vertex(anchor)?;
        Ok::<_, CodecError>(())
    })?;
    debug!(type_name = %relationship.type_name, "deleted relationship");
    Ok(relationship)
}

/// Match supplied participants to declared roles, in declaration order.
fn order_participants<'a>(
    edge_type: &'a EdgeType,
    participants: &[(&str, VertexId)],
) -> CodecResult<Vec<(&'a str, VertexId)>> {
    let mut seen = HashSet::new();
    for &(role, _) in participants {
        if edge_type.connector(role).is_err() {
            return Err(CodecError::unknown_role(edge_type.name(), role));
        }
        if !seen.insert(role) {
            return Err(CodecError::duplicate_role(edge_type.name(), role));
        }
    }

    edge_type
        .roles()
        .into_iter()
        .map(|role| {
            participants
                .iter()
                .find(|(supplied, _)| *supplied == role)
                .map(|&(_, vertex)| (role, vertex))
                .ok_or_else(|| CodecError::missing_role(edge_type.name(), role))
        })
        .collect()
}

/// Reject participants already at their role's per-participant bound.
fn check_cardinality<S: GraphStore + ?Sized>(
    store: &S,
    edge_type: &EdgeType,
    ordered: &[(&str, VertexId)],
) -> CodecResult<()> {
    for &(role, vertex) in ordered {
        let connector = edge_type.connector(role)?;
        let mode = connector.connection_mode();
        let Some(max) = mode.max_per_participant() else {
            continue;
        };
        let filter = [edge_type.fragment_type_name(role)?];
        let existing = store.edges(vertex, Direction::Incoming, &filter)?.count();
        if existing >= max {
            return Err(CodecError::CardinalityViolation {
                edge_type: edge_type.name().to_string(),
                role: role.to_string(),
                vertex,
                mode,
            });
        }
    }
    Ok(())
}
