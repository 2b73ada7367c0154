//! Limit clamping and bankroll safety.
//!
//! Every wager is clamped individually against the table's per-position
//! limits. A wager set is then either funded in full or not at all: partial
//! placement would break the accounting of every progression built on top.

use thiserror::Error;

use crate::board::{covered_numbers, GeometryError};
use crate::domain::{total_stake, BetCategory, BetPosition, TableConfig, Wager};

/// Tolerance for comparing money amounts.
pub const STAKE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StakeError {
    #[error("invalid position: {0}")]
    Geometry(#[from] GeometryError),
    #[error("clamped stake {required} exceeds bankroll {bankroll}")]
    InsufficientFunds { required: f64, bankroll: f64 },
}

/// Clamp a raw amount to the table limits for its category.
///
/// Always `max(min(category), min(raw, max))`. Idempotent.
pub fn clamp(raw: f64, category: BetCategory, table: &TableConfig) -> f64 {
    let capped = if raw.is_nan() { 0.0 } else { raw.min(table.max_bet()) };
    capped.max(table.min_for(category))
}

/// Collects the wagers of one spin, clamping each as it is added.
#[derive(Debug, Clone)]
pub struct BetSlip<'a> {
    table: &'a TableConfig,
    wagers: Vec<Wager>,
}

impl<'a> BetSlip<'a> {
    pub fn new(table: &'a TableConfig) -> Self {
        Self {
            table,
            wagers: Vec::new(),
        }
    }

    /// Resolve geometry first, then clamp. Returns the clamped amount.
    pub fn add(&mut self, position: BetPosition, raw: f64) -> Result<f64, GeometryError> {
        covered_numbers(&position, self.table.layout)?;
        let amount = clamp(raw, position.category(), self.table);
        self.wagers.push(Wager::new(position, amount));
        Ok(amount)
    }

    pub fn total(&self) -> f64 {
        total_stake(&self.wagers)
    }

    pub fn is_empty(&self) -> bool {
        self.wagers.is_empty()
    }

    /// Release the full wager set if the bankroll covers it.
    pub fn fund(self, bankroll: f64) -> Result<Vec<Wager>, StakeError> {
        let required = self.total();
        if required > bankroll + STAKE_EPSILON {
            return Err(StakeError::InsufficientFunds { required, bankroll });
        }
        Ok(self.wagers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableConfig {
        TableConfig::new(1.0, Some(5.0), 500.0)
    }

    #[test]
    fn clamps_to_min_and_max() {
        assert_eq!(clamp(0.5, BetCategory::Inside, &table()), 1.0);
        assert_eq!(clamp(10_000.0, BetCategory::Inside, &table()), 500.0);
        assert_eq!(clamp(2.0, BetCategory::Outside, &table()), 5.0);
        assert_eq!(clamp(42.0, BetCategory::Outside, &table()), 42.0);
    }

    #[test]
    fn nan_clamps_to_minimum() {
        assert_eq!(clamp(f64::NAN, BetCategory::Inside, &table()), 1.0);
    }

    #[test]
    fn slip_clamps_each_wager_independently() {
        let table = table();
        let mut slip = BetSlip::new(&table);
        slip.add(BetPosition::Street(1), 400.0).unwrap();
        slip.add(BetPosition::Street(4), 400.0).unwrap();
        // Each position capped at 500 individually; the total is not capped.
        slip.add(BetPosition::Street(7), 900.0).unwrap();
        assert_eq!(slip.total(), 1300.0);
    }

    #[test]
    fn invalid_geometry_never_reaches_the_clamper() {
        let table = table();
        let mut slip = BetSlip::new(&table);
        assert!(slip.add(BetPosition::Corner(3), 10.0).is_err());
        assert!(slip.is_empty());
    }

    #[test]
    fn fund_is_all_or_nothing() {
        let table = table();
        let mut slip = BetSlip::new(&table);
        slip.add(BetPosition::Dozen(1), 6.0).unwrap();
        slip.add(BetPosition::Dozen(2), 6.0).unwrap();
        assert_eq!(
            slip.clone().fund(5.0),
            Err(StakeError::InsufficientFunds {
                required: 12.0,
                bankroll: 5.0
            })
        );
        assert_eq!(slip.fund(12.0).unwrap().len(), 2);
    }
}
