//! Streak gate — let one outcome category through only after it occurs N
//! times in a row (e.g. two partial losses before stepping up, or two wins
//! in a row to clear a deep level). Every other category passes straight
//! through and breaks the streak.

use crate::outcome::{Outcome, OutcomeCategory};

use super::{ProgressionRule, ProgressionState, Transition};

pub struct StreakGate {
    category: OutcomeCategory,
    count: u32,
    key: String,
    inner: Box<dyn ProgressionRule>,
}

impl StreakGate {
    pub fn new(category: OutcomeCategory, count: u32, inner: Box<dyn ProgressionRule>) -> Self {
        assert!(count > 0, "count must be positive");
        Self {
            category,
            count,
            key: Self::key_for(0, category, count),
            inner,
        }
    }

    /// Key the streak counter by position in the guard stack, so identical
    /// gates nested inside each other count independently.
    pub fn with_slot(mut self, slot: usize) -> Self {
        self.key = Self::key_for(slot, self.category, self.count);
        self
    }

    fn key_for(slot: usize, category: OutcomeCategory, count: u32) -> String {
        format!("gate{slot}:{category:?}:{count}")
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl ProgressionRule for StreakGate {
    fn name(&self) -> &str {
        "streak_gate"
    }

    fn advance(&self, state: &mut ProgressionState, outcome: &Outcome, bankroll: f64) -> Transition {
        if outcome.category != self.category {
            state.streaks.remove(&self.key);
            return self.inner.advance(state, outcome, bankroll);
        }
        let seen = state.streak(&self.key) + 1;
        if seen >= self.count {
            state.streaks.remove(&self.key);
            self.inner.advance(state, outcome, bankroll)
        } else {
            state.streaks.insert(self.key.clone(), seen);
            Transition::Held
        }
    }
}
