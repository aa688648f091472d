//! Polyedge Codec
//!
//! Encodes n-ary relationships over a binary substrate and decodes them back.
//!
//! A hyper-relationship is an anchor vertex with one fragment edge per role,
//! typed `base + SEPARATOR + role`. Decoding walks a vertex's edge stream,
//! passes plain edges through and folds fragments back into one relationship
//! per anchor.

mod config;
pub mod decode;
pub mod encode;
mod error;
mod relationship;

pub use config::{CodecConfig, DecodePolicy};
pub use decode::{
    read_relationship, relationships, relationships_with_role, role_fragment_names, single,
    Relationships,
};
pub use encode::{create_binary, create_relationship, delete_relationship};
pub use error::{CodecError, CodecResult};
pub use relationship::{HyperRelationship, Participant, PlainRelationship, Relationship};
