//! Serializable session configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use spinlab_core::components::StrategyPreset;
use spinlab_core::domain::{ConfigError, TableConfig};
use spinlab_core::fingerprint::StrategyConfig;

#[derive(Debug, Error)]
pub enum SessionConfigError {
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid table: {0}")]
    Table(#[from] ConfigError),
    #[error("initial bankroll must be positive, got {0}")]
    NonPositiveBankroll(f64),
    #[error("no strategies configured")]
    NoStrategies,
}

/// Everything needed to reproduce a batch of sessions over one spin sequence:
/// the table, the starting bankroll, the master seed and the strategies.
///
/// ```toml
/// bankroll = 500.0
/// master_seed = 42
/// presets = ["martingale_red", "hot_corners"]
///
/// [table.betLimits]
/// min = 1.0
/// minOutside = 5.0
/// max = 500.0
///
/// [[strategies]]
/// name = "two dozens"
///
/// [strategies.coverage]
/// kind = "fixed"
/// positions = [
///     { position = { type = "dozen", value = 1 } },
///     { position = { type = "dozen", value = 2 } },
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub table: TableConfig,
    pub bankroll: f64,
    #[serde(default)]
    pub master_seed: u64,
    #[serde(default)]
    pub presets: Vec<StrategyPreset>,
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

impl SessionConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, SessionConfigError> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SessionConfigError> {
        self.table.validate()?;
        if !(self.bankroll > 0.0) {
            return Err(SessionConfigError::NonPositiveBankroll(self.bankroll));
        }
        if self.presets.is_empty() && self.strategies.is_empty() {
            return Err(SessionConfigError::NoStrategies);
        }
        Ok(())
    }

    /// Presets first, then explicit strategies, in file order.
    pub fn strategy_configs(&self) -> Vec<StrategyConfig> {
        self.presets
            .iter()
            .map(|p| p.to_config())
            .chain(self.strategies.iter().cloned())
            .collect()
    }
}
