//! Coverage selection — which board positions a strategy stakes this spin.
//!
//! Selectors see the spin history and the progression state (for the active
//! side) but never the bankroll; sizing and affordability happen later. A
//! selector returning `None` stands the strategy down for the spin.

pub mod fixed;
pub mod hot_cold;
pub mod random_corners;
pub mod sides;

pub use fixed::FixedCoverage;
pub use hot_cold::HotColdCoverage;
pub use random_corners::RandomCorners;
pub use sides::SideCoverage;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::analyzer::HeatOrder;
use crate::board::GeometryError;
use crate::domain::{BetPosition, Layout, SpinRecord};

use super::progression::ProgressionState;

fn one() -> f64 {
    1.0
}

/// A position and its weight in stake units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakedPosition {
    pub position: BetPosition,
    #[serde(default = "one")]
    pub units: f64,
}

impl StakedPosition {
    pub fn new(position: BetPosition, units: f64) -> Self {
        Self { position, units }
    }

    pub fn unit(position: BetPosition) -> Self {
        Self::new(position, 1.0)
    }
}

/// Trait for coverage selectors.
pub trait CoverageSelector: Send + Sync {
    /// Human-readable name (e.g., "fixed", "hot_cold").
    fn name(&self) -> &str;

    /// Spins of history needed before the selector can produce coverage.
    fn warmup_spins(&self) -> usize {
        0
    }

    /// Positions to stake, or `None` to sit this spin out.
    ///
    /// `rng` is the strategy's injected, seeded source; selectors must not
    /// draw randomness from anywhere else.
    fn select(
        &self,
        history: &[SpinRecord],
        state: &ProgressionState,
        layout: Layout,
        rng: &mut StdRng,
    ) -> Result<Option<Vec<StakedPosition>>, GeometryError>;
}

/// Declarative selector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoverageConfig {
    Fixed {
        positions: Vec<StakedPosition>,
    },
    Sides {
        sides: Vec<Vec<StakedPosition>>,
    },
    HotCold {
        candidates: Vec<BetPosition>,
        window: usize,
        picks: usize,
        #[serde(default)]
        order: HeatOrder,
        #[serde(default = "one")]
        units: f64,
    },
    RandomCorners {
        count: usize,
        #[serde(default = "one")]
        units: f64,
    },
}

impl CoverageConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fixed { .. } => "fixed",
            Self::Sides { .. } => "sides",
            Self::HotCold { .. } => "hot_cold",
            Self::RandomCorners { .. } => "random_corners",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_kind_tag_round_trips_through_toml() {
        let src = r#"
            kind = "hot_cold"
            candidates = [{ type = "dozen", value = 1 }, { type = "dozen", value = 2 }]
            window = 37
            picks = 1
        "#;
        let config: CoverageConfig = toml::from_str(src).unwrap();
        assert_eq!(config.kind(), "hot_cold");
        match config {
            CoverageConfig::HotCold { order, units, .. } => {
                assert_eq!(order, HeatOrder::Hottest);
                assert_eq!(units, 1.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn staked_position_units_default_to_one() {
        let p: StakedPosition = serde_json::from_str(r#"{"position":{"type":"red"}}"#).unwrap();
        assert_eq!(p, StakedPosition::unit(BetPosition::Red));
    }
}
