//! Strategy components — the pieces a composed strategy is built from.
//!
//! - Coverage selector: which positions to stake this spin
//! - Progression rule: how the stake level moves after each outcome
//! - Stake sizing: progression state → unit stake
//!
//! Plus the factory that builds them from config and the named presets.

pub mod composition;
pub mod coverage;
pub mod factory;
pub mod progression;
pub mod sizing;

pub use composition::StrategyPreset;
pub use coverage::{CoverageConfig, CoverageSelector, StakedPosition};
pub use factory::{
    build_strategy, create_guards, create_progression, create_rule, create_selector, FactoryError,
};
pub use progression::{ProgressionRule, ProgressionState, Transition};
pub use sizing::StakeSizing;
