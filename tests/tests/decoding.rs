//! Decoding integration tests.
//!
//! Focus areas: malformed fragment names under both decode policies,
//! configuration loading, deduplication across roles, role isolation.

use polyedge_element::ElementError;
use polyedge_graph::GraphStore;
use polyedge_tests::prelude::*;

fn sale() -> EdgeTypeDef {
    EdgeTypeDef::hyper("Sale")
        .role("buyer", ConnectionMode::General)
        .role("seller", ConnectionMode::General)
        .role("item", ConnectionMode::General)
}

/// Write a raw substrate edge, bypassing the codec.
fn raw_edge(w: &mut World, type_name: &str, start: &str, end: &str) -> ScenarioResult<Outcome> {
    let (start, end) = (w.vertex(start)?, w.vertex(end)?);
    w.graph_mut()
        .store_mut()
        .create_edge(type_name, start, end)
        .map_err(ElementError::from)?;
    Ok(Outcome::Empty)
}

fn with_damage(scenario: Scenario) -> Scenario {
    scenario
        .define(sale())
        .step(
            "sell_lamp",
            |w| {
                w.relate(
                    "Sale",
                    &[("buyer", "alice"), ("seller", "bob"), ("item", "lamp")],
                )
            },
            |a| a.created(),
        )
        .step("empty_role", |w| raw_edge(w, "Sale/#/", "junk", "lamp"), |a| a)
        .step("empty_base", |w| raw_edge(w, "/#/item", "junk", "lamp"), |a| a)
        .step("two_separators", |w| raw_edge(w, "Sale/#/item/#/x", "junk", "lamp"), |a| a)
}

mod strict {
    use super::*;

    pub fn scenario() -> Scenario {
        with_damage(Scenario::new("strict"))
            .step(
                "lamp_fails",
                |w| w.relationships("lamp", &RelationshipQuery::all()),
                |a| a.error_matches(r"Malformed fragment e\d+: type name 'Sale/#/'"),
            )
            // role streams filter by exact fragment names, damage is invisible
            .step(
                "lamp_as_item",
                |w| w.relationships_with_role("lamp", "item", &["Sale"]),
                |a| a.rows(1),
            )
            .step(
                "alice_unaffected",
                |w| w.relationships("alice", &RelationshipQuery::all()),
                |a| a.rows(1).hyper(1),
            )
    }

    #[test]
    fn test_strict_policy_surfaces_malformed_fragments() {
        scenario().run().unwrap();
    }
}

mod lenient {
    use super::*;

    pub fn scenario() -> Scenario {
        with_damage(Scenario::new("lenient"))
            .config(CodecConfig::new().with_decode_policy(DecodePolicy::Lenient))
            .step(
                "lamp_skips_damage",
                |w| w.relationships("lamp", &RelationshipQuery::all()),
                |a| a.rows(1).hyper(1).types(&["Sale"]),
            )
            .step(
                "junk_sees_nothing",
                |w| w.relationships("junk", &RelationshipQuery::all()),
                |a| a.empty(),
            )
    }

    #[test]
    fn test_lenient_policy_skips_malformed_fragments() {
        scenario().run().unwrap();
    }
}

/// Fragments of an unregistered type and of a role `Sale` does not define.
fn with_strays(scenario: Scenario) -> Scenario {
    scenario
        .define(sale())
        .step(
            "sell_lamp",
            |w| {
                w.relate(
                    "Sale",
                    &[("buyer", "alice"), ("seller", "bob"), ("item", "lamp")],
                )
            },
            |a| a.created(),
        )
        .step("ghost_type", |w| raw_edge(w, "Ghost/#/x", "ghost", "alice"), |a| a)
        .step("broker_role", |w| raw_edge(w, "Sale/#/broker", "broker", "bea"), |a| a)
}

mod unregistered {
    use super::*;

    pub fn strict() -> Scenario {
        with_strays(Scenario::new("unregistered_strict"))
            .step(
                "alice_fails",
                |w| w.relationships("alice", &RelationshipQuery::all()),
                |a| a.error_matches(r"Malformed fragment e\d+: type name 'Ghost/#/x'"),
            )
            .step(
                "bea_fails",
                |w| w.relationships("bea", &RelationshipQuery::all()),
                |a| a.error_matches(r"Malformed fragment e\d+: type name 'Sale/#/broker'"),
            )
            .step(
                "lamp_unaffected",
                |w| w.relationships("lamp", &RelationshipQuery::all()),
                |a| a.rows(1).hyper(1),
            )
    }

    pub fn lenient() -> Scenario {
        with_strays(Scenario::new("unregistered_lenient"))
            .config(CodecConfig::new().with_decode_policy(DecodePolicy::Lenient))
            .step(
                "alice_skips_ghost",
                |w| w.relationships("alice", &RelationshipQuery::all()),
                |a| a.rows(1).hyper(1).types(&["Sale"]),
            )
            .step(
                "bea_sees_nothing",
                |w| w.relationships("bea", &RelationshipQuery::all()),
                |a| a.empty(),
            )
    }

    #[test]
    fn test_strict_policy_rejects_unregistered_fragments() {
        strict().run().unwrap();
    }

    #[test]
    fn test_lenient_policy_skips_unregistered_fragments() {
        lenient().run().unwrap();
    }
}

mod undefined_roles {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("undefined_roles")
            .define(sale())
            .step(
                "sell_lamp",
                |w| {
                    w.relate(
                        "Sale",
                        &[("buyer", "alice"), ("seller", "bob"), ("item", "lamp")],
                    )
                },
                |a| a.created(),
            )
            .step(
                "alice_as_broker",
                |w| w.relationships_with_role("alice", "broker", &["Sale"]),
                |a| a.error_matches(r"Unknown role 'broker' for Sale"),
            )
            .step(
                "single_broker",
                |w| w.single("alice", "broker", "Sale"),
                |a| a.error_matches(r"Unknown role 'broker' for Sale"),
            )
            .step(
                "has_broker",
                |w| w.has_role("alice", "broker", &["Sale"]),
                |a| a.error_matches(r"Unknown role 'broker' for Sale"),
            )
            .step(
                "unknown_type",
                |w| w.relationships_with_role("alice", "buyer", &["Rental"]),
                |a| a.error_matches(r"Unknown edge type Rental"),
            )
            .step(
                "alice_as_buyer",
                |w| w.relationships_with_role("alice", "buyer", &["Sale"]),
                |a| a.rows(1),
            )
    }

    #[test]
    fn test_role_queries_reject_undefined_roles() {
        scenario().run().unwrap();
    }
}

mod configuration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_from_json_drives_decoding() {
        // GIVEN
        let config = CodecConfig::from_json(r#"{ "decode_policy": "lenient" }"#).unwrap();

        // THEN
        assert_eq!(config.decode_policy, DecodePolicy::Lenient);
        assert!(config.enforce_cardinality);

        with_damage(Scenario::new("from_json"))
            .config(config)
            .step(
                "lamp",
                |w| w.relationships("lamp", &RelationshipQuery::all()),
                |a| a.rows(1),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let err = CodecConfig::from_json(r#"{ "decode_policy": "forgiving" }"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid codec configuration"));
    }

    #[test]
    fn test_config_survives_json() {
        let config = CodecConfig::permissive();
        let json = config.to_json().unwrap();
        assert_eq!(CodecConfig::from_json(&json).unwrap(), config);
    }
}

mod dedup {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("dedup")
            .define(sale())
            // bob fills every role of the same relationship
            .step(
                "bob_alone",
                |w| w.relate("Sale", &[("buyer", "bob"), ("seller", "bob"), ("item", "bob")]),
                |a| a.created().participants(3),
            )
            .step(
                "bob_with_carol",
                |w| {
                    w.relate(
                        "Sale",
                        &[("buyer", "bob"), ("seller", "carol"), ("item", "bob")],
                    )
                },
                |a| a.created(),
            )
            .step(
                "bob_sees_two",
                |w| w.relationships("bob", &RelationshipQuery::all()),
                |a| a.rows(2).hyper(2),
            )
            .step(
                "bob_sees_two_by_type",
                |w| w.relationships("bob", &RelationshipQuery::all().types(["Sale", "Sale"])),
                |a| a.rows(2),
            )
            .step(
                "bob_as_seller",
                |w| w.relationships_with_role("bob", "seller", &["Sale"]),
                |a| a.rows(1),
            )
            .step(
                "carol_as_buyer",
                |w| w.relationships_with_role("carol", "buyer", &["Sale"]),
                |a| a.empty(),
            )
            .step(
                "carol_single_seller",
                |w| w.single("carol", "seller", "Sale"),
                |a| a.found().role("buyer", "bob").role("item", "bob"),
            )
            // an anchor is not a participant of its own relationship
            .step(
                "anchor_sees_nothing",
                |w| {
                    let anchor = w.anchor("bob_alone")?;
                    let rels = w
                        .graph()
                        .element(anchor)?
                        .relationships(&RelationshipQuery::all())?
                        .collect::<Result<Vec<Relationship>, _>>()?;
                    Ok(Outcome::Relationships(rels))
                },
                |a| a.empty(),
            )
    }

    #[test]
    fn test_each_relationship_reported_once() {
        scenario().run().unwrap();
    }
}
