//! The edge type registry - descriptor persistence and lookup.
//!
//! Layout in the store:
//!
//! ```text
//! root --EDGE_TYPE_INDEX-->      index { "Sale": VertexRef(d1), ... }
//! root --RELTYPE_SUBREF-->       index { "KNOWS": VertexRef(d2), ... }
//! root --CONNECTOR_TYPE_INDEX--> index { "buyer": VertexRef(c1), ... }
//!
//! d1 { __kind: "HyperEdgeType", __name: "Sale" }
//! d1 --HAS_CONNECTOR--> c1 { __kind: "ConnectorType", __name: "buyer", __mode: "General" }
//! ```
//!
//! `HAS_CONNECTOR` edges are created in declaration order, so the adjacency
//! order of a descriptor reproduces its role order on reload.

use crate::{
    Arity, ConnectionMode, ConnectorType, EdgeKind, EdgeType, EdgeTypeDef, RegistryError,
    RegistryResult, END_ROLE, NULLARY_CONNECTOR, START_ROLE, SUBJECT_ROLE,
};
use parking_lot::RwLock;
use polyedge_core::{contains_separator, Direction, Value, VertexId};
use polyedge_graph::{in_transaction, GraphStore};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, instrument, trace};

/// Root relationship to the index of nullary, unary and hyper edge types.
pub const EDGE_TYPE_INDEX: &str = "EDGE_TYPE_INDEX";
/// Root relationship to the index of named binary edge types.
pub const RELTYPE_SUBREF: &str = "RELTYPE_SUBREF";
/// Root relationship to the index of connector types.
pub const CONNECTOR_TYPE_INDEX: &str = "CONNECTOR_TYPE_INDEX";
/// Edge type from an edge type descriptor to its connector type descriptors.
pub const HAS_CONNECTOR: &str = "HAS_CONNECTOR";

/// Descriptor property holding the implementation kind.
pub const KIND_KEY: &str = "__kind";
/// Descriptor property holding the type name.
pub const NAME_KEY: &str = "__name";
/// Connector descriptor property holding the connection mode.
pub const MODE_KEY: &str = "__mode";

/// The implementation identity recorded on a descriptor vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    NullaryEdgeType,
    UnaryEdgeType,
    BinaryEdgeType,
    HyperEdgeType,
    ConnectorType,
}

impl DescriptorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DescriptorKind::NullaryEdgeType => "NullaryEdgeType",
            DescriptorKind::UnaryEdgeType => "UnaryEdgeType",
            DescriptorKind::BinaryEdgeType => "BinaryEdgeType",
            DescriptorKind::HyperEdgeType => "HyperEdgeType",
            DescriptorKind::ConnectorType => "ConnectorType",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NullaryEdgeType" => Some(DescriptorKind::NullaryEdgeType),
            "UnaryEdgeType" => Some(DescriptorKind::UnaryEdgeType),
            "BinaryEdgeType" => Some(DescriptorKind::BinaryEdgeType),
            "HyperEdgeType" => Some(DescriptorKind::HyperEdgeType),
            "ConnectorType" => Some(DescriptorKind::ConnectorType),
            _ => None,
        }
    }

    /// The root relationship leading to this kind's index vertex.
    pub fn index_relation(self) -> &'static str {
        match self {
            DescriptorKind::BinaryEdgeType => RELTYPE_SUBREF,
            DescriptorKind::ConnectorType => CONNECTOR_TYPE_INDEX,
            _ => EDGE_TYPE_INDEX,
        }
    }
}

impl From<EdgeKind> for DescriptorKind {
    fn from(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Nullary => DescriptorKind::NullaryEdgeType,
            EdgeKind::Unary => DescriptorKind::UnaryEdgeType,
            EdgeKind::Binary => DescriptorKind::BinaryEdgeType,
            EdgeKind::Hyper => DescriptorKind::HyperEdgeType,
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves edge and connector types to their descriptor vertices.
///
/// One registry serves one store. Resolutions are cached once they are
/// durable: a call made inside a caller's transaction is not cached, since
/// that transaction may still roll the descriptor back.
#[derive(Debug, Default)]
pub struct EdgeTypeRegistry {
    types: RwLock<HashMap<String, EdgeType>>,
    connectors: RwLock<HashMap<String, ConnectorType>>,
}

impl EdgeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Resolution ====================

    /// Resolve an edge type, creating its descriptor on first use.
    ///
    /// Idempotent: every call with the same definition returns the same
    /// descriptor. A name already registered with another arity or role set
    /// is an error.
    #[instrument(level = "debug", skip_all, fields(name = def.name(), kind = %def.kind()))]
    pub fn get_or_create<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        def: &EdgeTypeDef,
    ) -> RegistryResult<EdgeType> {
        validate_def(def)?;

        if let Some(cached) = self.types.read().get(def.name()) {
            trace!("edge type cache hit");
            return check_def(cached, def).map(|()| cached.clone());
        }

        let durable = !store.transaction_active();
        let edge_type = in_transaction(store, |s| self.resolve(s, def))?;
        if durable {
            self.remember(&edge_type);
        }
        Ok(edge_type)
    }

    /// The singleton nullary edge type.
    pub fn nullary<S: GraphStore + ?Sized>(&self, store: &mut S) -> RegistryResult<EdgeType> {
        self.get_or_create(store, &EdgeTypeDef::nullary())
    }

    pub fn unary<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        name: &str,
    ) -> RegistryResult<EdgeType> {
        self.get_or_create(store, &EdgeTypeDef::unary(name))
    }

    /// A named binary edge type. Its relationships are plain edges.
    pub fn binary<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        name: &str,
    ) -> RegistryResult<EdgeType> {
        self.get_or_create(store, &EdgeTypeDef::binary(name))
    }

    /// Resolve a connector type by role name, creating it on first use.
    pub fn get_or_create_connector_type<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        name: &str,
        mode: ConnectionMode,
    ) -> RegistryResult<ConnectorType> {
        validate_name(name)?;

        if let Some(cached) = self.connectors.read().get(name) {
            return check_mode(cached, mode).map(|()| cached.clone());
        }

        let durable = !store.transaction_active();
        let connector_type = in_transaction(store, |s| self.resolve_connector_type(s, name, mode))?;
        if durable {
            self.connectors
                .write()
                .insert(name.to_string(), connector_type.clone());
        }
        Ok(connector_type)
    }

    /// Find or create the descriptor vertex for `name` in `kind`'s index.
    ///
    /// Edge type names are unique across both edge type indexes. The index
    /// vertex itself is created lazily, inside the same transaction as the
    /// descriptor. Only the bare tagged vertex is created here; callers add
    /// the connectors.
    pub(crate) fn get_or_create_descriptor<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        kind: DescriptorKind,
        name: &str,
    ) -> RegistryResult<VertexId> {
        validate_name(name)?;
        in_transaction(store, |s| -> RegistryResult<VertexId> {
            let relation = kind.index_relation();
            let index = match lookup_index_vertex(s, relation)? {
                Some(index) => index,
                None => create_index_vertex(s, relation)?,
            };

            let existing = match kind {
                DescriptorKind::ConnectorType => indexed_descriptor(s, index, name)?,
                _ => find_edge_type_descriptor(s, name)?,
            };
            if let Some(existing) = existing {
                let actual = descriptor_kind(s, existing)?;
                if actual != kind {
                    return Err(RegistryError::KindMismatch {
                        name: name.to_string(),
                        expected: kind,
                        actual,
                    });
                }
                return Ok(existing);
            }

            let descriptor = s.create_vertex();
            s.set_vertex_property(descriptor, KIND_KEY, Value::from(kind.as_str()))?;
            s.set_vertex_property(descriptor, NAME_KEY, Value::from(name))?;
            s.set_vertex_property(index, name, Value::VertexRef(descriptor))?;
            debug!(%descriptor, %kind, name, "created descriptor");
            Ok(descriptor)
        })
    }

    // ==================== Lookup ====================

    /// Look up a registered edge type without creating anything.
    ///
    /// On a cache miss the type is loaded from its descriptor, so a registry
    /// constructed over an existing store sees every earlier registration.
    pub fn lookup<S: GraphStore + ?Sized>(
        &self,
        store: &S,
        name: &str,
    ) -> RegistryResult<Option<EdgeType>> {
        if let Some(cached) = self.types.read().get(name) {
            return Ok(Some(cached.clone()));
        }

        let Some(descriptor) = find_edge_type_descriptor(store, name)? else {
            return Ok(None);
        };
        let edge_type = load_edge_type(store, name, descriptor)?;
        if !store.transaction_active() {
            self.remember(&edge_type);
        }
        Ok(Some(edge_type))
    }

    /// Look up a registered connector type without creating anything.
    pub fn lookup_connector_type<S: GraphStore + ?Sized>(
        &self,
        store: &S,
        name: &str,
    ) -> RegistryResult<Option<ConnectorType>> {
        if let Some(cached) = self.connectors.read().get(name) {
            return Ok(Some(cached.clone()));
        }

        let Some(index) = lookup_index_vertex(store, CONNECTOR_TYPE_INDEX)? else {
            return Ok(None);
        };
        match indexed_descriptor(store, index, name)? {
            Some(descriptor) => load_connector_type(store, descriptor).map(Some),
            None => Ok(None),
        }
    }

    /// Expand relationship type names to the substrate edge types they cover.
    ///
    /// Each name is kept as-is; a registered unary or hyper type also
    /// contributes the fragment type of every role. Unknown names pass
    /// through unchanged.
    pub fn expand_type_names<S: GraphStore + ?Sized>(
        &self,
        store: &S,
        names: &[String],
    ) -> RegistryResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut expanded = Vec::with_capacity(names.len());
        for name in names {
            if seen.insert(name.clone()) {
                expanded.push(name.clone());
            }
            if let Some(edge_type) = self.lookup(store, name)? {
                for fragment in edge_type.fragment_type_names() {
                    if seen.insert(fragment.clone()) {
                        expanded.push(fragment);
                    }
                }
            }
        }
        Ok(expanded)
    }

    /// Number of cached edge types.
    pub fn cached_len(&self) -> usize {
        self.types.read().len()
    }

    // ==================== Internals ====================

    fn remember(&self, edge_type: &EdgeType) {
        let mut connectors = self.connectors.write();
        for connector in edge_type.connectors() {
            let ct = connector.connector_type();
            connectors.entry(ct.name.clone()).or_insert_with(|| ct.clone());
        }
        drop(connectors);
        self.types
            .write()
            .insert(edge_type.name().to_string(), edge_type.clone());
    }

    fn resolve<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        def: &EdgeTypeDef,
    ) -> RegistryResult<EdgeType> {
        let kind = DescriptorKind::from(def.kind());

        if let Some(existing) = find_edge_type_descriptor(store, def.name())? {
            let actual = descriptor_kind(store, existing)?;
            if actual != kind {
                return Err(RegistryError::KindMismatch {
                    name: def.name().to_string(),
                    expected: kind,
                    actual,
                });
            }
            let edge_type = load_edge_type(store, def.name(), existing)?;
            check_def(&edge_type, def)?;
            return Ok(edge_type);
        }

        let descriptor = self.get_or_create_descriptor(store, kind, def.name())?;
        let mut connector_types = Vec::new();
        for (role, mode) in declared_roles(def) {
            let connector_type = match self.connectors.read().get(role.as_str()) {
                Some(cached) => check_mode(cached, mode).map(|()| cached.clone())?,
                None => self.resolve_connector_type(store, &role, mode)?,
            };
            store.create_edge(HAS_CONNECTOR, descriptor, connector_type.descriptor)?;
            connector_types.push(connector_type);
        }

        let arity = build_arity(descriptor, def.kind(), connector_types)?;
        debug!(%descriptor, name = def.name(), "registered edge type");
        Ok(EdgeType::new(def.name(), descriptor, arity))
    }

    fn resolve_connector_type<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        name: &str,
        mode: ConnectionMode,
    ) -> RegistryResult<ConnectorType> {
        if let Some(index) = lookup_index_vertex(store, CONNECTOR_TYPE_INDEX)? {
            if let Some(existing) = indexed_descriptor(store, index, name)? {
                let connector_type = load_connector_type(store, existing)?;
                check_mode(&connector_type, mode)?;
                return Ok(connector_type);
            }
        }

        let descriptor = self.get_or_create_descriptor(store, DescriptorKind::ConnectorType, name)?;
        store.set_vertex_property(descriptor, MODE_KEY, Value::from(mode.as_str()))?;
        Ok(ConnectorType::new(name, mode, descriptor))
    }
}

// ==================== Index Vertices ====================

/// Find the index vertex reached from the root through `relation`.
fn lookup_index_vertex<S: GraphStore + ?Sized>(
    store: &S,
    relation: &str,
) -> RegistryResult<Option<VertexId>> {
    let root = store.root();
    let filter = [relation.to_string()];
    let found = store
        .edges(root, Direction::Outgoing, &filter)?
        .next()
        .map(|edge| edge.end);
    Ok(found)
}

/// Create the index vertex for `relation`. Must run inside a transaction.
fn create_index_vertex<S: GraphStore + ?Sized>(
    store: &mut S,
    relation: &str,
) -> RegistryResult<VertexId> {
    let index = store.create_vertex();
    let root = store.root();
    store.create_edge(relation, root, index)?;
    debug!(%index, relation, "created index vertex");
    Ok(index)
}

fn indexed_descriptor<S: GraphStore + ?Sized>(
    store: &S,
    index: VertexId,
    name: &str,
) -> RegistryResult<Option<VertexId>> {
    match store.vertex_property(index, name)? {
        None => Ok(None),
        Some(value) => value
            .as_vertex_ref()
            .map(Some)
            .ok_or_else(|| RegistryError::corrupt(index, format!("entry '{name}' is not a vertex reference"))),
    }
}

/// Find an edge type descriptor in either edge type index.
fn find_edge_type_descriptor<S: GraphStore + ?Sized>(
    store: &S,
    name: &str,
) -> RegistryResult<Option<VertexId>> {
    for relation in [EDGE_TYPE_INDEX, RELTYPE_SUBREF] {
        if let Some(index) = lookup_index_vertex(store, relation)? {
            if let Some(descriptor) = indexed_descriptor(store, index, name)? {
                return Ok(Some(descriptor));
            }
        }
    }
    Ok(None)
}

// ==================== Descriptor Loading ====================

fn descriptor_kind<S: GraphStore + ?Sized>(
    store: &S,
    descriptor: VertexId,
) -> RegistryResult<DescriptorKind> {
    store
        .vertex_property(descriptor, KIND_KEY)?
        .and_then(Value::as_str)
        .and_then(DescriptorKind::parse)
        .ok_or_else(|| RegistryError::corrupt(descriptor, "missing or unknown __kind"))
}

fn load_connector_type<S: GraphStore + ?Sized>(
    store: &S,
    descriptor: VertexId,
) -> RegistryResult<ConnectorType> {
    if descriptor_kind(store, descriptor)? != DescriptorKind::ConnectorType {
        return Err(RegistryError::corrupt(descriptor, "not a connector type"));
    }
    let name = store
        .vertex_property(descriptor, NAME_KEY)?
        .and_then(Value::as_str)
        .ok_or_else(|| RegistryError::corrupt(descriptor, "missing __name"))?
        .to_string();
    let mode = store
        .vertex_property(descriptor, MODE_KEY)?
        .and_then(Value::as_str)
        .and_then(ConnectionMode::parse)
        .ok_or_else(|| RegistryError::corrupt(descriptor, "missing or unknown __mode"))?;
    Ok(ConnectorType::new(name, mode, descriptor))
}

fn load_edge_type<S: GraphStore + ?Sized>(
    store: &S,
    name: &str,
    descriptor: VertexId,
) -> RegistryResult<EdgeType> {
    let kind = match descriptor_kind(store, descriptor)? {
        DescriptorKind::NullaryEdgeType => EdgeKind::Nullary,
        DescriptorKind::UnaryEdgeType => EdgeKind::Unary,
        DescriptorKind::BinaryEdgeType => EdgeKind::Binary,
        DescriptorKind::HyperEdgeType => EdgeKind::Hyper,
        DescriptorKind::ConnectorType => {
            return Err(RegistryError::corrupt(descriptor, "not an edge type"))
        }
    };

    let filter = [HAS_CONNECTOR.to_string()];
    let targets: Vec<VertexId> = store
        .edges(descriptor, Direction::Outgoing, &filter)?
        .map(|edge| edge.end)
        .collect();
    let connector_types = targets
        .into_iter()
        .map(|target| load_connector_type(store, target))
        .collect::<RegistryResult<Vec<_>>>()?;

    let arity = build_arity(descriptor, kind, connector_types)?;
    trace!(%descriptor, name, "loaded edge type");
    Ok(EdgeType::new(name, descriptor, arity))
}

fn build_arity(
    descriptor: VertexId,
    kind: EdgeKind,
    mut connectors: Vec<ConnectorType>,
) -> RegistryResult<Arity> {
    let arity = match (kind, connectors.len()) {
        (EdgeKind::Nullary, 1) => Arity::Nullary {
            connector: connectors.remove(0),
        },
        (EdgeKind::Unary, 1) => Arity::Unary {
            connector: connectors.remove(0),
        },
        (EdgeKind::Binary, 2) => {
            let end = connectors.remove(1);
            let start = connectors.remove(0);
            Arity::Binary { start, end }
        }
        (EdgeKind::Hyper, n) if n > 0 => Arity::Hyper { connectors },
        (kind, n) => {
            return Err(RegistryError::corrupt(
                descriptor,
                format!("{kind} edge type with {n} connectors"),
            ))
        }
    };
    Ok(arity)
}

// ==================== Validation ====================

fn validate_name(name: &str) -> RegistryResult<()> {
    if name.is_empty() {
        return Err(RegistryError::EmptyName);
    }
    if contains_separator(name) {
        return Err(RegistryError::ReservedSeparator {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn validate_def(def: &EdgeTypeDef) -> RegistryResult<()> {
    validate_name(def.name())?;

    if def.kind() != EdgeKind::Hyper {
        if !def.roles().is_empty() {
            return Err(RegistryError::RoleSetMismatch {
                name: def.name().to_string(),
            });
        }
        return Ok(());
    }

    if def.roles().is_empty() {
        return Err(RegistryError::NoRoles {
            edge_type: def.name().to_string(),
        });
    }
    let mut seen = HashSet::new();
    for role in def.roles() {
        validate_name(&role.name)?;
        if !seen.insert(role.name.as_str()) {
            return Err(RegistryError::DuplicateRole {
                edge_type: def.name().to_string(),
                role: role.name.clone(),
            });
        }
    }
    Ok(())
}

/// Connector roles of a definition; fixed for every arity but hyper.
fn declared_roles(def: &EdgeTypeDef) -> Vec<(String, ConnectionMode)> {
    match def.kind() {
        EdgeKind::Nullary => vec![(NULLARY_CONNECTOR.to_string(), ConnectionMode::Bijective)],
        EdgeKind::Unary => vec![(SUBJECT_ROLE.to_string(), ConnectionMode::Surjective)],
        EdgeKind::Binary => vec![
            (START_ROLE.to_string(), ConnectionMode::Surjective),
            (END_ROLE.to_string(), ConnectionMode::Surjective),
        ],
        EdgeKind::Hyper => def
            .roles()
            .iter()
            .map(|role| (role.name.clone(), role.mode))
            .collect(),
    }
}

fn check_def(edge_type: &EdgeType, def: &EdgeTypeDef) -> RegistryResult<()> {
    if edge_type.kind() != def.kind() {
        return Err(RegistryError::KindMismatch {
            name: def.name().to_string(),
            expected: def.kind().into(),
            actual: edge_type.kind().into(),
        });
    }
    if !edge_type.matches_def(def) {
        return Err(RegistryError::RoleSetMismatch {
            name: def.name().to_string(),
        });
    }
    Ok(())
}

fn check_mode(connector_type: &ConnectorType, mode: ConnectionMode) -> RegistryResult<()> {
    if connector_type.mode != mode {
        return Err(RegistryError::ConnectorModeMismatch {
            name: connector_type.name.clone(),
            expected: mode,
            actual: connector_type.mode,
        });
    }
    Ok(())
}
