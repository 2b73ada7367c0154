//! Named strategy presets — common coverage + progression archetypes.
//!
//! Each preset is plain configuration: `to_config()` yields a
//! `StrategyConfig` that goes through the same factory as a hand-written one.

use serde::{Deserialize, Serialize};

use crate::analyzer::HeatOrder;
use crate::board::all_corners;
use crate::domain::BetPosition;
use crate::fingerprint::{ComponentConfig, StrategyConfig};
use crate::outcome::OutcomePolicy;

use super::coverage::{CoverageConfig, StakedPosition};
use super::sizing::StakeSizing;

// ─── StrategyPreset ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyPreset {
    /// Double on red after every loss, capped at eight doublings.
    MartingaleRed,
    /// Four streets, one rung up after two straight misses.
    StreetLadder,
    /// Dozen + column, rebet until the bankroll is 20 above its mark.
    DozenColumnProfitGoal,
    /// Three lines on one half of the layout, switching halves on a miss.
    LeftRightLines,
    /// The four hottest corners of the last 37 spins.
    HotCorners,
    /// Five random corners per spin.
    RandomCorners,
}

fn units(positions: &[BetPosition]) -> Vec<StakedPosition> {
    positions.iter().copied().map(StakedPosition::unit).collect()
}

impl StrategyPreset {
    pub fn name(self) -> &'static str {
        match self {
            Self::MartingaleRed => "martingale_red",
            Self::StreetLadder => "street_ladder",
            Self::DozenColumnProfitGoal => "dozen_column_profit_goal",
            Self::LeftRightLines => "left_right_lines",
            Self::HotCorners => "hot_corners",
            Self::RandomCorners => "random_corners",
        }
    }

    /// Convert to a `StrategyConfig` with default parameters.
    pub fn to_config(self) -> StrategyConfig {
        let (coverage, progression, guards, sizing, outcome) = match self {
            Self::MartingaleRed => (
                CoverageConfig::Fixed {
                    positions: units(&[BetPosition::Red]),
                },
                vec![ComponentConfig::new("geometric", &[("factor", 2.0)])],
                vec![ComponentConfig::new("hard_cap", &[("max_level", 8.0)])],
                StakeSizing::flat(5.0),
                OutcomePolicy::default(),
            ),
            Self::StreetLadder => (
                CoverageConfig::Fixed {
                    positions: units(&[
                        BetPosition::Street(1),
                        BetPosition::Street(13),
                        BetPosition::Street(22),
                        BetPosition::Street(34),
                    ]),
                },
                vec![ComponentConfig::new("linear", &[("step", 1.0), ("on_win", 0.0)])],
                vec![
                    ComponentConfig::new("streak_gate", &[("category", 3.0), ("count", 2.0)]),
                    ComponentConfig::new("hard_cap", &[("max_level", 10.0)]),
                ],
                StakeSizing::flat(1.0),
                OutcomePolicy::default(),
            ),
            Self::DozenColumnProfitGoal => (
                CoverageConfig::Fixed {
                    positions: units(&[BetPosition::Dozen(2), BetPosition::Column(3)]),
                },
                vec![ComponentConfig::new("linear", &[("step", 1.0), ("on_win", 2.0)])],
                vec![ComponentConfig::new("profit_goal", &[("target", 20.0)])],
                StakeSizing::flat(5.0),
                OutcomePolicy::default(),
            ),
            Self::LeftRightLines => (
                CoverageConfig::Sides {
                    sides: vec![
                        units(&[BetPosition::Line(1), BetPosition::Line(7), BetPosition::Line(13)]),
                        units(&[BetPosition::Line(19), BetPosition::Line(25), BetPosition::Line(31)]),
                    ],
                },
                vec![ComponentConfig::new("linear", &[("step", 1.0), ("on_win", 1.0)])],
                vec![
                    ComponentConfig::new("side_toggle", &[("sides", 2.0), ("trigger", 2.0)]),
                    ComponentConfig::new("hard_cap", &[("max_level", 6.0)]),
                ],
                StakeSizing::flat(1.0),
                OutcomePolicy::default(),
            ),
            Self::HotCorners => (
                CoverageConfig::HotCold {
                    candidates: all_corners(),
                    window: 37,
                    picks: 4,
                    order: HeatOrder::Hottest,
                    units: 1.0,
                },
                vec![ComponentConfig::new("arithmetic", &[("step", 1.0), ("on_win", 1.0)])],
                vec![],
                StakeSizing::flat(1.0),
                OutcomePolicy::default(),
            ),
            Self::RandomCorners => (
                CoverageConfig::RandomCorners { count: 5, units: 1.0 },
                vec![ComponentConfig::new("linear", &[("step", 1.0)])],
                vec![ComponentConfig::new("hard_cap", &[("max_level", 5.0)])],
                StakeSizing::ladder(vec![1.0, 2.0, 3.0, 5.0, 8.0, 13.0]),
                OutcomePolicy::default(),
            ),
        };
        StrategyConfig {
            name: self.name().to_string(),
            coverage,
            progression,
            guards,
            sizing,
            outcome,
        }
    }

    /// All presets as a slice.
    pub fn all() -> &'static [StrategyPreset] {
        &[
            Self::MartingaleRed,
            Self::StreetLadder,
            Self::DozenColumnProfitGoal,
            Self::LeftRightLines,
            Self::HotCorners,
            Self::RandomCorners,
        ]
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
