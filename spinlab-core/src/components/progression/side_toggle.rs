//! Side toggle — rotate the active side on a trigger outcome, after the
//! inner rule has run.

use serde::{Deserialize, Serialize};

use crate::outcome::{Outcome, OutcomeCategory};

use super::{ProgressionRule, ProgressionState, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleTrigger {
    Win,
    /// Partial or total loss.
    Loss,
    TotalLoss,
    /// Two or more wagers hit on one spin.
    Jackpot,
}

impl ToggleTrigger {
    pub fn matches(self, outcome: &Outcome) -> bool {
        match self {
            Self::Win => outcome.category == OutcomeCategory::Win,
            Self::Loss => outcome.category.is_loss(),
            Self::TotalLoss => outcome.category == OutcomeCategory::TotalLoss,
            Self::Jackpot => outcome.is_jackpot(),
        }
    }
}

pub struct SideToggle {
    sides: usize,
    trigger: ToggleTrigger,
    inner: Box<dyn ProgressionRule>,
}

impl SideToggle {
    pub fn new(sides: usize, trigger: ToggleTrigger, inner: Box<dyn ProgressionRule>) -> Self {
        assert!(sides >= 2, "need at least two sides");
        Self {
            sides,
            trigger,
            inner,
        }
    }
}

impl ProgressionRule for SideToggle {
    fn name(&self) -> &str {
        "side_toggle"
    }

    fn advance(&self, state: &mut ProgressionState, outcome: &Outcome, bankroll: f64) -> Transition {
        let inner = self.inner.advance(state, outcome, bankroll);
        if self.trigger.matches(outcome) {
            state.side = (state.side + 1) % self.sides;
            Transition::Toggled
        } else {
            inner
        }
    }
}
