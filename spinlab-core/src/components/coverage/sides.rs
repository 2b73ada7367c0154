//! Side-dependent coverage: the progression's active side picks one of
//! several position groups (left/right, color pair, ...).

use rand::rngs::StdRng;

use crate::board::GeometryError;
use crate::components::progression::ProgressionState;
use crate::domain::{Layout, SpinRecord};

use super::{CoverageSelector, StakedPosition};

#[derive(Debug, Clone)]
pub struct SideCoverage {
    sides: Vec<Vec<StakedPosition>>,
}

impl SideCoverage {
    pub fn new(sides: Vec<Vec<StakedPosition>>) -> Self {
        assert!(!sides.is_empty(), "at least one side required");
        Self { sides }
    }

    pub fn side_count(&self) -> usize {
        self.sides.len()
    }
}

impl CoverageSelector for SideCoverage {
    fn name(&self) -> &str {
        "sides"
    }

    fn select(
        &self,
        _history: &[SpinRecord],
        state: &ProgressionState,
        _layout: Layout,
        _rng: &mut StdRng,
    ) -> Result<Option<Vec<StakedPosition>>, GeometryError> {
        Ok(Some(self.sides[state.side % self.sides.len()].clone()))
    }
}
