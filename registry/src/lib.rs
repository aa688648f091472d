//! Polyedge Registry
//!
//! Edge types, connectors and the registry that materializes them.
//! Every edge type and connector type is persisted as a descriptor vertex in
//! the store, so it can carry properties and relationships of its own. The
//! registry resolves names to descriptors idempotently and caches the result.

mod connector;
mod error;
mod mode;
mod registry;
mod types;

pub use connector::{Connector, ConnectorType};
pub use error::{RegistryError, RegistryResult};
pub use mode::ConnectionMode;
pub use registry::{
    DescriptorKind, EdgeTypeRegistry, CONNECTOR_TYPE_INDEX, EDGE_TYPE_INDEX, HAS_CONNECTOR,
    KIND_KEY, MODE_KEY, NAME_KEY, RELTYPE_SUBREF,
};
pub use types::{
    Arity, EdgeKind, EdgeType, EdgeTypeDef, RoleDef, END_ROLE, NULLARY_CONNECTOR,
    NULLARY_EDGE_TYPE, START_ROLE, SUBJECT_ROLE,
};
