//! High-water-mark gated reset.
//!
//! A win resets the progression only when the bankroll has reached
//! `reference + target`; the reference then moves up to that bankroll.
//! A win short of the goal holds the current stake (rebet). Losses and pushes
//! go to the inner rule.

use crate::limits::STAKE_EPSILON;
use crate::outcome::{Outcome, OutcomeCategory};

use super::{ProgressionRule, ProgressionState, Transition};

pub struct ProfitGoal {
    target: f64,
    inner: Box<dyn ProgressionRule>,
}

impl ProfitGoal {
    pub fn new(target: f64, inner: Box<dyn ProgressionRule>) -> Self {
        assert!(target >= 0.0, "target must be non-negative");
        Self { target, inner }
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

impl ProgressionRule for ProfitGoal {
    fn name(&self) -> &str {
        "profit_goal"
    }

    fn advance(&self, state: &mut ProgressionState, outcome: &Outcome, bankroll: f64) -> Transition {
        state.observe_bankroll(bankroll);
        if outcome.category != OutcomeCategory::Win {
            return self.inner.advance(state, outcome, bankroll);
        }
        let reference = state.reference_bankroll.unwrap_or(bankroll);
        if bankroll + STAKE_EPSILON >= reference + self.target {
            state.reset_progress();
            state.reference_bankroll = Some(bankroll);
            Transition::Reset
        } else {
            Transition::Held
        }
    }
}
