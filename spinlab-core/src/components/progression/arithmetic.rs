//! Arithmetic ladder (d'Alembert family) — add increments on loss.
//!
//! The rule counts increments; the money value of one increment comes from
//! the table's increment mode (fixed amount or the strategy's base unit) at
//! sizing time.

use crate::outcome::{Outcome, OutcomeCategory};

use super::{ProgressionRule, ProgressionState, Transition, WinRetreat};

#[derive(Debug, Clone)]
pub struct ArithmeticStep {
    /// Increments added per loss.
    pub step: f64,
    pub on_win: WinRetreat,
}

impl ArithmeticStep {
    pub fn new(step: f64, on_win: WinRetreat) -> Self {
        assert!(step > 0.0, "step must be positive");
        Self { step, on_win }
    }
}

impl ProgressionRule for ArithmeticStep {
    fn name(&self) -> &str {
        "arithmetic"
    }

    fn advance(&self, state: &mut ProgressionState, outcome: &Outcome, _bankroll: f64) -> Transition {
        match outcome.category {
            OutcomeCategory::PartialLoss | OutcomeCategory::TotalLoss => {
                state.increments += self.step;
                state.steps = state.steps.saturating_add(1);
                Transition::Advanced
            }
            OutcomeCategory::Win => match self.on_win {
                WinRetreat::Reset => {
                    state.increments = 0.0;
                    state.steps = 0;
                    Transition::Reset
                }
                WinRetreat::StepDown => {
                    state.increments = (state.increments - self.step).max(0.0);
                    state.steps = state.steps.saturating_sub(1);
                    Transition::Retreated
                }
                WinRetreat::Hold => Transition::Held,
            },
            OutcomeCategory::Push => Transition::Held,
        }
    }
}
