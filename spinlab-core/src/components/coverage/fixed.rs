//! Same positions every spin.

use rand::rngs::StdRng;

use crate::board::{covered_numbers, GeometryError};
use crate::components::progression::ProgressionState;
use crate::domain::{Layout, SpinRecord};

use super::{CoverageSelector, StakedPosition};

#[derive(Debug, Clone)]
pub struct FixedCoverage {
    positions: Vec<StakedPosition>,
}

impl FixedCoverage {
    pub fn new(positions: Vec<StakedPosition>) -> Self {
        Self { positions }
    }

    /// Fail fast on positions that do not exist on this layout.
    pub fn validate(&self, layout: Layout) -> Result<(), GeometryError> {
        self.positions
            .iter()
            .try_for_each(|p| covered_numbers(&p.position, layout).map(|_| ()))
    }
}

impl CoverageSelector for FixedCoverage {
    fn name(&self) -> &str {
        "fixed"
    }

    fn select(
        &self,
        _history: &[SpinRecord],
        _state: &ProgressionState,
        _layout: Layout,
        _rng: &mut StdRng,
    ) -> Result<Option<Vec<StakedPosition>>, GeometryError> {
        Ok(Some(self.positions.clone()))
    }
}
