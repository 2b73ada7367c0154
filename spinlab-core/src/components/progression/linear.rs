//! Linear ladder — level += step on loss; on win step down or reset.

use crate::outcome::{Outcome, OutcomeCategory};

use super::{ProgressionRule, ProgressionState, Transition, WinRetreat};

#[derive(Debug, Clone)]
pub struct LinearStep {
    pub step: u32,
    pub on_win: WinRetreat,
}

impl LinearStep {
    pub fn new(step: u32, on_win: WinRetreat) -> Self {
        assert!(step > 0, "step must be positive");
        Self { step, on_win }
    }
}

impl ProgressionRule for LinearStep {
    fn name(&self) -> &str {
        "linear"
    }

    fn advance(&self, state: &mut ProgressionState, outcome: &Outcome, _bankroll: f64) -> Transition {
        match outcome.category {
            OutcomeCategory::PartialLoss | OutcomeCategory::TotalLoss => {
                state.level = state.level.saturating_add(self.step);
                Transition::Advanced
            }
            OutcomeCategory::Win => match self.on_win {
                WinRetreat::Reset => {
                    state.level = 0;
                    Transition::Reset
                }
                WinRetreat::StepDown => {
                    state.level = state.level.saturating_sub(self.step);
                    Transition::Retreated
                }
                WinRetreat::Hold => Transition::Held,
            },
            OutcomeCategory::Push => Transition::Held,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn three_losses_then_reset() {
        let rule = LinearStep::new(1, WinRetreat::Reset);
        let mut s = ProgressionState::default();
        for _ in 0..3 {
            assert_eq!(rule.advance(&mut s, &loss(), 0.0), Transition::Advanced);
        }
        assert_eq!(s.level, 3);
        assert_eq!(rule.advance(&mut s, &win(), 0.0), Transition::Reset);
        assert_eq!(s.level, 0);
    }

    #[test]
    fn step_down_floors_at_zero() {
        let rule = LinearStep::new(2, WinRetreat::StepDown);
        let mut s = ProgressionState::default();
        rule.advance(&mut s, &loss(), 0.0);
        rule.advance(&mut s, &partial(), 0.0);
        assert_eq!(s.level, 4);
        rule.advance(&mut s, &win(), 0.0);
        assert_eq!(s.level, 2);
        rule.advance(&mut s, &win(), 0.0);
        rule.advance(&mut s, &win(), 0.0);
        assert_eq!(s.level, 0);
    }

    #[test]
    fn push_holds() {
        let rule = LinearStep::new(1, WinRetreat::Reset);
        let mut s = ProgressionState {
            level: 2,
            ..ProgressionState::default()
        };
        assert_eq!(rule.advance(&mut s, &push(), 0.0), Transition::Held);
        assert_eq!(s.level, 2);
    }
}
