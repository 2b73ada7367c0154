//! Geometric ladder (martingale family) — multiplier ×= factor on loss,
//! back to 1 on win. Losses absorbed so far are kept in `depth`, leaving
//! `level` to the additive ladders.

use crate::outcome::{Outcome, OutcomeCategory};

use super::{ProgressionRule, ProgressionState, Transition};

#[derive(Debug, Clone)]
pub struct GeometricStep {
    pub factor: f64,
}

impl GeometricStep {
    pub fn new(factor: f64) -> Self {
        assert!(factor > 1.0, "factor must be > 1");
        Self { factor }
    }
}

impl ProgressionRule for GeometricStep {
    fn name(&self) -> &str {
        "geometric"
    }

    fn advance(&self, state: &mut ProgressionState, outcome: &Outcome, _bankroll: f64) -> Transition {
        match outcome.category {
            OutcomeCategory::PartialLoss | OutcomeCategory::TotalLoss => {
                state.multiplier *= self.factor;
                state.depth = state.depth.saturating_add(1);
                Transition::Advanced
            }
            OutcomeCategory::Win => {
                state.multiplier = 1.0;
                state.depth = 0;
                Transition::Reset
            }
            OutcomeCategory::Push => Transition::Held,
        }
    }
}
