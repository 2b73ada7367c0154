//! Hot/cold chaser — stake the `picks` hottest (or coldest) candidates of
//! the trailing window. Stands down until the window is full.

use rand::rngs::StdRng;

use crate::analyzer::{rank, HeatOrder, WindowedFrequency};
use crate::board::GeometryError;
use crate::components::progression::ProgressionState;
use crate::domain::{BetPosition, Layout, SpinRecord};

use super::{CoverageSelector, StakedPosition};

#[derive(Debug, Clone)]
pub struct HotColdCoverage {
    candidates: Vec<BetPosition>,
    analyzer: WindowedFrequency,
    picks: usize,
    order: HeatOrder,
    units: f64,
}

impl HotColdCoverage {
    pub fn new(
        candidates: Vec<BetPosition>,
        window: usize,
        picks: usize,
        order: HeatOrder,
        units: f64,
    ) -> Self {
        assert!(picks > 0 && picks <= candidates.len(), "picks must be in 1..=candidates");
        Self {
            candidates,
            analyzer: WindowedFrequency::new(window),
            picks,
            order,
            units,
        }
    }
}

impl CoverageSelector for HotColdCoverage {
    fn name(&self) -> &str {
        "hot_cold"
    }

    fn warmup_spins(&self) -> usize {
        self.analyzer.window
    }

    fn select(
        &self,
        history: &[SpinRecord],
        _state: &ProgressionState,
        layout: Layout,
        _rng: &mut StdRng,
    ) -> Result<Option<Vec<StakedPosition>>, GeometryError> {
        let Some(frequencies) = self.analyzer.frequencies(history) else {
            return Ok(None);
        };
        let ranked = rank(&self.candidates, &frequencies, layout, self.order)?;
        Ok(Some(
            ranked
                .into_iter()
                .take(self.picks)
                .map(|r| StakedPosition::new(r.position, self.units))
                .collect(),
        ))
    }
}
