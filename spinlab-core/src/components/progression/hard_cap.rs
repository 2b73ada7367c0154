//! Stop-loss ceiling: once the progression height (ladder level, geometric
//! depth or arithmetic steps) passes `max_level` the progression resets
//! unconditionally instead of clamping at the top rung.

use crate::outcome::Outcome;

use super::{ProgressionRule, ProgressionState, Transition};

pub struct HardCap {
    max_level: u32,
    inner: Box<dyn ProgressionRule>,
}

impl HardCap {
    pub fn new(max_level: u32, inner: Box<dyn ProgressionRule>) -> Self {
        Self { max_level, inner }
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }
}

impl ProgressionRule for HardCap {
    fn name(&self) -> &str {
        "hard_cap"
    }

    fn advance(&self, state: &mut ProgressionState, outcome: &Outcome, bankroll: f64) -> Transition {
        let transition = self.inner.advance(state, outcome, bankroll);
        if state.height() > self.max_level {
            tracing::debug!(
                level = state.level,
                depth = state.depth,
                steps = state.steps,
                max_level = self.max_level,
                "progression ceiling passed, resetting"
            );
            state.reset_progress();
            return Transition::Reset;
        }
        transition
    }
}
