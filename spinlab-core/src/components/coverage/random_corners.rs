//! Random corner picks, drawn from the strategy's injected seeded RNG.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::board::{all_corners, GeometryError};
use crate::components::progression::ProgressionState;
use crate::domain::{BetPosition, Layout, SpinRecord};

use super::{CoverageSelector, StakedPosition};

#[derive(Debug, Clone)]
pub struct RandomCorners {
    corners: Vec<BetPosition>,
    count: usize,
    units: f64,
}

impl RandomCorners {
    pub fn new(count: usize, units: f64) -> Self {
        let corners = all_corners();
        assert!(count > 0 && count <= corners.len(), "count must be in 1..=22");
        Self {
            corners,
            count,
            units,
        }
    }
}

impl CoverageSelector for RandomCorners {
    fn name(&self) -> &str {
        "random_corners"
    }

    fn select(
        &self,
        _history: &[SpinRecord],
        _state: &ProgressionState,
        _layout: Layout,
        rng: &mut StdRng,
    ) -> Result<Option<Vec<StakedPosition>>, GeometryError> {
        let mut picks: Vec<BetPosition> = self
            .corners
            .choose_multiple(rng, self.count)
            .copied()
            .collect();
        picks.sort_by_key(|p| match p {
            BetPosition::Corner(start) => *start,
            _ => 0,
        });
        Ok(Some(
            picks
                .into_iter()
                .map(|p| StakedPosition::new(p, self.units))
                .collect(),
        ))
    }
}
