//! Strategy fingerprinting — deterministic identification of strategy
//! configurations.
//!
//! - `ComponentConfig`: one progression rule or guard plus its parameters.
//! - `StrategyConfig`: coverage + progression + guards + sizing + outcome policy.
//! - `ConfigHash`: structural identity (component kinds only).
//! - `FullHash`: exact identity (kinds + every parameter value).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::coverage::CoverageConfig;
use crate::components::sizing::StakeSizing;
use crate::outcome::OutcomePolicy;

/// Configuration of a single progression rule or guard.
///
/// Uses `BTreeMap` for deterministic key ordering during serialization → hashing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentConfig {
    pub component_type: String,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl ComponentConfig {
    pub fn new(component_type: &str, params: &[(&str, f64)]) -> Self {
        Self {
            component_type: component_type.to_string(),
            params: params.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }
}

/// Complete declarative strategy.
///
/// `progression` rules run as a chain (empty means flat betting); `guards`
/// wrap that chain in order, so the last guard is the outermost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyConfig {
    pub name: String,
    pub coverage: CoverageConfig,
    #[serde(default)]
    pub progression: Vec<ComponentConfig>,
    #[serde(default)]
    pub guards: Vec<ComponentConfig>,
    #[serde(default)]
    pub sizing: StakeSizing,
    #[serde(default)]
    pub outcome: OutcomePolicy,
}

impl StrategyConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(src)
    }

    /// Structural hash: component kinds only, ignoring parameter values and
    /// the display name.
    ///
    /// Two street ladders with different bases share a `config_hash` but
    /// differ in `full_hash`.
    pub fn config_hash(&self) -> ConfigHash {
        let rules: Vec<&str> = self
            .progression
            .iter()
            .map(|c| c.component_type.as_str())
            .collect();
        let guards: Vec<&str> = self
            .guards
            .iter()
            .map(|c| c.component_type.as_str())
            .collect();
        let structural = format!(
            "{}+[{}]+[{}]",
            self.coverage.kind(),
            rules.join(","),
            guards.join(","),
        );
        ConfigHash::from_bytes(structural.as_bytes())
    }

    /// Full hash over the canonical JSON encoding.
    pub fn full_hash(&self) -> Result<FullHash, serde_json::Error> {
        let json = serde_json::to_vec(self)?;
        Ok(FullHash::from_bytes(&json))
    }
}

/// BLAKE3 digest of a strategy's structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigHash(pub [u8; 32]);

/// BLAKE3 digest of a strategy's complete configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FullHash(pub [u8; 32]);

macro_rules! digest_impls {
    ($ty:ident) => {
        impl $ty {
            pub fn from_bytes(bytes: &[u8]) -> Self {
                Self(*blake3::hash(bytes).as_bytes())
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for byte in &self.0 {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    };
}

digest_impls!(ConfigHash);
digest_impls!(FullHash);
