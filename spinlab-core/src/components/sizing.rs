//! Stake sizing — turns progression state into a unit stake.
//!
//! `unit = rung × multiplier + increments × increment`, where `rung` is
//! `ladder[level]` when a ladder is configured (the last rung repeats past
//! the end) and `base_unit + level × increment` otherwise. `increment` comes
//! from [`TableConfig::increment`]. Each position then stakes
//! `unit × units`, clamped individually by the bet slip.

use serde::{Deserialize, Serialize};

use crate::domain::TableConfig;

use super::progression::ProgressionState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeSizing {
    pub base_unit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ladder: Option<Vec<f64>>,
}

impl Default for StakeSizing {
    fn default() -> Self {
        Self {
            base_unit: 1.0,
            ladder: None,
        }
    }
}

impl StakeSizing {
    pub fn flat(base_unit: f64) -> Self {
        Self {
            base_unit,
            ladder: None,
        }
    }

    pub fn ladder(rungs: Vec<f64>) -> Self {
        let base_unit = rungs.first().copied().unwrap_or(1.0);
        Self {
            base_unit,
            ladder: Some(rungs),
        }
    }

    fn rung(&self, level: u32, increment: f64) -> f64 {
        match self.ladder.as_deref() {
            Some(rungs) if !rungs.is_empty() => {
                let idx = (level as usize).min(rungs.len() - 1);
                rungs[idx]
            }
            _ => self.base_unit + f64::from(level) * increment,
        }
    }

    /// Unclamped stake per unit weight for the current state.
    pub fn unit_stake(&self, state: &ProgressionState, table: &TableConfig) -> f64 {
        let increment = table.increment(self.base_unit);
        self.rung(state.level, increment) * state.multiplier + state.increments * increment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(level: u32, multiplier: f64, increments: f64) -> ProgressionState {
        ProgressionState {
            level,
            multiplier,
            increments,
            ..ProgressionState::default()
        }
    }

    #[test]
    fn base_plus_level_increments() {
        let sizing = StakeSizing::flat(5.0);
        let table = TableConfig::default();
        assert_eq!(sizing.unit_stake(&state(0, 1.0, 0.0), &table), 5.0);
        assert_eq!(sizing.unit_stake(&state(3, 1.0, 0.0), &table), 20.0);
    }

    #[test]
    fn fixed_increment_mode_uses_table_amount() {
        let sizing = StakeSizing::flat(5.0);
        let table = TableConfig::default().with_fixed_increment(2.0);
        assert_eq!(sizing.unit_stake(&state(2, 1.0, 0.0), &table), 9.0);
        assert_eq!(sizing.unit_stake(&state(0, 1.0, 3.0), &table), 11.0);
    }

    #[test]
    fn multiplier_scales_the_rung() {
        let sizing = StakeSizing::flat(5.0);
        let table = TableConfig::default();
        assert_eq!(sizing.unit_stake(&state(0, 8.0, 0.0), &table), 40.0);
    }

    #[test]
    fn ladder_repeats_last_rung() {
        let sizing = StakeSizing::ladder(vec![1.0, 2.0, 4.0]);
        let table = TableConfig::default();
        assert_eq!(sizing.unit_stake(&state(1, 1.0, 0.0), &table), 2.0);
        assert_eq!(sizing.unit_stake(&state(9, 1.0, 0.0), &table), 4.0);
    }
}
