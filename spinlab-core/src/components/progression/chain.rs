//! Apply several rules in order to the same state.

use crate::outcome::Outcome;

use super::{ProgressionRule, ProgressionState, Transition};

pub struct Chain {
    rules: Vec<Box<dyn ProgressionRule>>,
}

impl Chain {
    pub fn new(rules: Vec<Box<dyn ProgressionRule>>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl ProgressionRule for Chain {
    fn name(&self) -> &str {
        "chain"
    }

    /// Reports the last transition that was not `Held`.
    fn advance(&self, state: &mut ProgressionState, outcome: &Outcome, bankroll: f64) -> Transition {
        self.rules
            .iter()
            .map(|rule| rule.advance(state, outcome, bankroll))
            .filter(|t| *t != Transition::Held)
            .last()
            .unwrap_or(Transition::Held)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{ArithmeticStep, LinearStep, WinRetreat};
    use super::*;

    #[test]
    fn applies_every_rule() {
        let chain = Chain::new(vec![
            Box::new(LinearStep::new(1, WinRetreat::Reset)),
            Box::new(ArithmeticStep::new(1.0, WinRetreat::StepDown)),
        ]);
        let mut s = ProgressionState::default();
        chain.advance(&mut s, &loss(), 0.0);
        chain.advance(&mut s, &loss(), 0.0);
        assert_eq!((s.level, s.increments), (2, 2.0));
        assert_eq!(chain.advance(&mut s, &win(), 0.0), Transition::Retreated);
        assert_eq!((s.level, s.increments), (0, 1.0));
    }

    #[test]
    fn empty_chain_holds() {
        let chain = Chain::new(Vec::new());
        let mut s = ProgressionState::default();
        assert_eq!(chain.advance(&mut s, &loss(), 0.0), Transition::Held);
    }
}
