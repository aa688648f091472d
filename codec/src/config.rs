//! Codec configuration

use crate::CodecResult;
use serde::{Deserialize, Serialize};

/// What the decoder does with a type name that carries the separator but
/// does not split into a base and a role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Yield a `MalformedFragment` error at that pull.
    #[default]
    Strict,
    /// Skip the edge and log a warning.
    Lenient,
}

/// Configuration for encoding and decoding hyper-relationships
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Handling of malformed fragment names
    pub decode_policy: DecodePolicy,
    /// Reject creations that exceed a role's per-participant bound
    pub enforce_cardinality: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            decode_policy: DecodePolicy::Strict,
            enforce_cardinality: true,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    pub fn with_enforce_cardinality(mut self, enforce: bool) -> Self {
        self.enforce_cardinality = enforce;
        self
    }

    /// Lenient decoding, no cardinality checks.
    pub fn permissive() -> Self {
        Self {
            decode_policy: DecodePolicy::Lenient,
            enforce_cardinality: false,
        }
    }

    /// Parse a configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> CodecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> CodecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
