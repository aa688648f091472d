//! Registry integration tests.
//!
//! Focus areas: idempotent registration, reloading descriptors from a store,
//! concurrent registration, mismatch errors, descriptors as ordinary vertices.

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use polyedge_core::Value;
use polyedge_element::HyperGraph;
use polyedge_graph::{GraphStore, MemoryGraph};
use polyedge_registry::{
    EdgeKind, EdgeTypeRegistry, RegistryError, KIND_KEY, NAME_KEY, NULLARY_EDGE_TYPE,
};
use polyedge_tests::prelude::*;
use pretty_assertions::assert_eq;

fn sale() -> EdgeTypeDef {
    EdgeTypeDef::hyper("Sale")
        .role("buyer", ConnectionMode::General)
        .role("seller", ConnectionMode::General)
        .role("item", ConnectionMode::Injective)
}

// ========== TEST: persistence ==========

#[test]
fn test_types_survive_a_new_registry() {
    // GIVEN
    let mut graph = HyperGraph::in_memory();
    let sale = graph.edge_type(&sale()).unwrap();
    let knows = graph.edge_type(&EdgeTypeDef::binary("KNOWS")).unwrap();
    let (a, b, c) = (graph.create_vertex(), graph.create_vertex(), graph.create_vertex());
    let created = graph
        .create_edge(&sale, &[("buyer", a), ("seller", b), ("item", c)])
        .unwrap();

    // WHEN
    let reopened = HyperGraph::new(graph.into_store());

    // THEN
    assert_eq!(reopened.registry().cached_len(), 0);
    let loaded = reopened.lookup_edge_type("Sale").unwrap().unwrap();
    assert_eq!(loaded, sale);
    assert_eq!(loaded.roles(), vec!["buyer", "seller", "item"]);
    assert_eq!(
        loaded.connector("item").unwrap().connection_mode(),
        ConnectionMode::Injective
    );
    assert_eq!(reopened.lookup_edge_type("KNOWS").unwrap(), Some(knows));
    assert_eq!(reopened.lookup_edge_type("Missing").unwrap(), None);

    let read = reopened.relationship(created.anchor).unwrap();
    assert_eq!(read, created);

    let items = reopened
        .element(c)
        .unwrap()
        .relationships(&RelationshipQuery::all().with_type("Sale"))
        .unwrap()
        .count();
    assert_eq!(items, 1);
}

#[test]
fn test_registration_is_idempotent() {
    // GIVEN
    let mut graph = HyperGraph::in_memory();
    let first = graph.edge_type(&sale()).unwrap();
    let vertices = graph.store().vertex_count();
    let edges = graph.store().edge_count();

    // WHEN
    let second = graph.edge_type(&sale()).unwrap();
    let mut reopened = HyperGraph::new(graph.into_store());
    let third = reopened.edge_type(&sale()).unwrap();

    // THEN
    assert_eq!(first, second);
    assert_eq!(first, third);
    assert_eq!(reopened.store().vertex_count(), vertices);
    assert_eq!(reopened.store().edge_count(), edges);
}

#[test]
fn test_every_kind_resolves() {
    let mut graph = HyperGraph::in_memory();

    let nullary = graph.edge_type(&EdgeTypeDef::nullary()).unwrap();
    let unary = graph.edge_type(&EdgeTypeDef::unary("Featured")).unwrap();
    let binary = graph.edge_type(&EdgeTypeDef::binary("KNOWS")).unwrap();
    let hyper = graph.edge_type(&sale()).unwrap();

    assert_eq!(nullary.name(), NULLARY_EDGE_TYPE);
    assert_eq!(
        [nullary.kind(), unary.kind(), binary.kind(), hyper.kind()],
        [EdgeKind::Nullary, EdgeKind::Unary, EdgeKind::Binary, EdgeKind::Hyper]
    );
    assert_eq!(binary.roles(), vec!["start", "end"]);
    assert_eq!(unary.roles(), vec!["subject"]);
    assert!(unary.is_anchored());
    assert!(!binary.is_anchored());
}

// ========== TEST: descriptors ==========

#[test]
fn test_descriptors_are_ordinary_vertices() {
    // GIVEN
    let mut graph = HyperGraph::in_memory();
    let sale = graph.edge_type(&sale()).unwrap();

    // WHEN
    graph
        .element_mut(sale.descriptor())
        .unwrap()
        .set_property("note", "annotated")
        .unwrap();

    // THEN
    let descriptor = graph.element(sale.descriptor()).unwrap();
    assert_eq!(descriptor.property(NAME_KEY).unwrap(), Some(&Value::from("Sale")));
    assert_eq!(descriptor.property(KIND_KEY).unwrap(), Some(&Value::from("HyperEdgeType")));
    assert_eq!(
        descriptor.property("note").unwrap(),
        Some(&Value::from("annotated"))
    );
}

// ========== TEST: mismatches ==========

#[test]
fn test_mismatched_definitions_are_rejected() {
    // GIVEN
    let mut graph = HyperGraph::in_memory();
    graph.edge_type(&sale()).unwrap();
    graph.edge_type(&EdgeTypeDef::binary("KNOWS")).unwrap();

    // WHEN
    let as_binary = graph.edge_type(&EdgeTypeDef::binary("Sale")).unwrap_err();
    let as_hyper = graph
        .edge_type(&EdgeTypeDef::hyper("KNOWS").role("a", ConnectionMode::General))
        .unwrap_err();
    let fewer_roles = graph
        .edge_type(&EdgeTypeDef::hyper("Sale").role("buyer", ConnectionMode::General))
        .unwrap_err();
    let other_mode = graph
        .edge_type(&EdgeTypeDef::hyper("Rental").role("item", ConnectionMode::General))
        .unwrap_err();

    // THEN
    for err in [&as_binary, &as_hyper] {
        assert!(err.to_string().contains("is registered as"), "{err}");
    }
    assert!(fewer_roles.to_string().contains("different role set"));
    assert!(other_mode
        .to_string()
        .contains("Connector type item is registered as Injective, requested as General"));
    assert!(graph.lookup_edge_type("Rental").unwrap().is_none());
}

#[test]
fn test_reserved_separator_in_names() {
    let registry = EdgeTypeRegistry::new();
    let mut store = MemoryGraph::new();

    let err = registry
        .get_or_create(&mut store, &EdgeTypeDef::binary("A/#/B"))
        .unwrap_err();

    assert!(matches!(err, RegistryError::ReservedSeparator { .. }));
}

// ========== TEST: concurrency ==========

#[test]
fn test_concurrent_registration_creates_one_descriptor() {
    // GIVEN
    let store = Arc::new(Mutex::new(MemoryGraph::new()));
    let registry = Arc::new(EdgeTypeRegistry::new());

    // WHEN
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut store = store.lock();
                let sale = registry.get_or_create(&mut *store, &sale()).unwrap();
                let knows = registry.binary(&mut *store, "KNOWS").unwrap();
                (sale, knows)
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // THEN
    assert!(results.windows(2).all(|w| w[0] == w[1]));

    let mut reference = MemoryGraph::new();
    let fresh = EdgeTypeRegistry::new();
    fresh.get_or_create(&mut reference, &sale()).unwrap();
    fresh.binary(&mut reference, "KNOWS").unwrap();

    let store = store.lock();
    assert_eq!(store.vertex_count(), reference.vertex_count());
    assert_eq!(store.edge_count(), reference.edge_count());
    assert!(!store.transaction_active());
}
