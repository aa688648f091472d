//! Connection modes: cardinality constraints on connector roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many edges of a role a participant may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionMode {
    /// Exactly one edge in, exactly one edge out; one-to-one system-wide.
    Bijective,
    /// At most one outgoing edge per participant, many incoming.
    Injective,
    /// At most one incoming edge per participant; each edge has exactly one
    /// participant in this role.
    Surjective,
    /// No constraint.
    General,
}

impl ConnectionMode {
    /// Upper bound on relationships of one type in which a single vertex may
    /// fill a role with this mode.
    pub fn max_per_participant(self) -> Option<usize> {
        match self {
            ConnectionMode::Bijective | ConnectionMode::Injective => Some(1),
            ConnectionMode::Surjective | ConnectionMode::General => None,
        }
    }

    /// Persisted name.
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionMode::Bijective => "Bijective",
            ConnectionMode::Injective => "Injective",
            ConnectionMode::Surjective => "Surjective",
            ConnectionMode::General => "General",
        }
    }

    /// Parse a persisted name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Bijective" => Some(ConnectionMode::Bijective),
            "Injective" => Some(ConnectionMode::Injective),
            "Surjective" => Some(ConnectionMode::Surjective),
            "General" => Some(ConnectionMode::General),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
