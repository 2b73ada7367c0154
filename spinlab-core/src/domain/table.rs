//! Table configuration — immutable per session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::pocket::Layout;
use super::wager::BetCategory;

/// Errors raised by [`TableConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("minimum bet must be positive, got {0}")]
    NonPositiveMin(f64),
    #[error("maximum bet {max} is below minimum {min}")]
    MaxBelowMin { min: f64, max: f64 },
    #[error("outside minimum {min_outside} exceeds maximum bet {max}")]
    OutsideMinAboveMax { min_outside: f64, max: f64 },
    #[error("fixed increment must be positive, got {0}")]
    NonPositiveIncrement(f64),
}

/// Per-position bet limits. `minOutside` is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetLimits {
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_outside: Option<f64>,
    pub max: f64,
}

/// How a progression's increment is sized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncrementMode {
    /// Use `minIncrementalBet` (or the table minimum when absent).
    Fixed,
    /// Increment by the strategy's own base unit.
    #[default]
    Base,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub bet_limits: BetLimits,
    #[serde(default)]
    pub increment_mode: IncrementMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_incremental_bet: Option<f64>,
    #[serde(default)]
    pub layout: Layout,
}

impl TableConfig {
    pub fn new(min: f64, min_outside: Option<f64>, max: f64) -> Self {
        Self {
            bet_limits: BetLimits {
                min,
                min_outside,
                max,
            },
            increment_mode: IncrementMode::default(),
            min_incremental_bet: None,
            layout: Layout::default(),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_fixed_increment(mut self, amount: f64) -> Self {
        self.increment_mode = IncrementMode::Fixed;
        self.min_incremental_bet = Some(amount);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.bet_limits;
        if limits.min <= 0.0 {
            return Err(ConfigError::NonPositiveMin(limits.min));
        }
        if limits.max < limits.min {
            return Err(ConfigError::MaxBelowMin {
                min: limits.min,
                max: limits.max,
            });
        }
        if let Some(min_outside) = limits.min_outside {
            if min_outside <= 0.0 {
                return Err(ConfigError::NonPositiveMin(min_outside));
            }
            if min_outside > limits.max {
                return Err(ConfigError::OutsideMinAboveMax {
                    min_outside,
                    max: limits.max,
                });
            }
        }
        if let Some(inc) = self.min_incremental_bet {
            if inc <= 0.0 {
                return Err(ConfigError::NonPositiveIncrement(inc));
            }
        }
        Ok(())
    }

    /// Minimum for a category. An absent `minOutside` falls back to `min`.
    pub fn min_for(&self, category: BetCategory) -> f64 {
        match category {
            BetCategory::Inside => self.bet_limits.min,
            BetCategory::Outside => self.bet_limits.min_outside.unwrap_or(self.bet_limits.min),
        }
    }

    /// Per-position maximum.
    pub fn max_bet(&self) -> f64 {
        self.bet_limits.max
    }

    /// One progression increment for a strategy whose base unit is `base_unit`.
    pub fn increment(&self, base_unit: f64) -> f64 {
        match self.increment_mode {
            IncrementMode::Fixed => self.min_incremental_bet.unwrap_or(self.bet_limits.min),
            IncrementMode::Base => base_unit,
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(1.0, Some(5.0), 500.0)
    }
}
