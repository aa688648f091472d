//! Polyedge Integration Test Framework
//!
//! Provides a fluent API for writing integration tests against Polyedge.
//!
//! A [`Scenario`] registers edge types, names a few vertices, then runs a
//! sequence of steps against a fresh [`World`]. Each step's result is checked
//! by an [`Assertion`], and after every step the stored encoding is checked:
//! an anchor's fragments share one base type, no role is filled twice, and
//! no edge points into an anchor.
//!
//! # Example
//!
//! ```ignore
//! use polyedge_tests::prelude::*;
//!
//! pub fn scenario() -> Scenario {
//!     Scenario::new("sale")
//!         .define(
//!             EdgeTypeDef::hyper("Sale")
//!                 .role("buyer", ConnectionMode::General)
//!                 .role("item", ConnectionMode::Injective),
//!         )
//!         .step("sell", |w| w.relate("Sale", &[("buyer", "bob"), ("item", "lamp")]), |a| {
//!             a.created().participants(2)
//!         })
//!         .step("bob_buys", |w| w.has_role("bob", "buyer", &["Sale"]), |a| a.is(true))
//! }
//!
//! #[test]
//! fn test() {
//!     scenario().run().unwrap();
//! }
//! ```

mod runner;
mod scenario;

pub use assertion::{Assertion, AssertionBuilder, Outcome};
pub use error::{ScenarioError, ScenarioResult};
pub use scenario::{Scenario, Step};
pub use world::{World, NAME_PROPERTY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assertion::{Assertion, AssertionBuilder, Outcome};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::scenario::Scenario;
    pub use crate::world::World;
    pub use polyedge_codec::{CodecConfig, DecodePolicy, Relationship};
    pub use polyedge_core::Direction;
    pub use polyedge_element::RelationshipQuery;
    pub use polyedge_registry::{ConnectionMode, EdgeTypeDef};
}
