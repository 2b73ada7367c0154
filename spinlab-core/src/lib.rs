//! SpinLab Core — the roulette betting-strategy engine.
//!
//! - Domain types (pockets, spins, positions, wagers, table limits)
//! - Board geometry: positions → exact pocket coverage and payouts
//! - Limit clamping and all-or-nothing funding of wager sets
//! - Outcome classification with per-strategy bucketing policy
//! - Progression state machine primitives
//! - Hot/cold windowed analyzer
//! - Composed strategies built from declarative config

pub mod analyzer;
pub mod board;
pub mod components;
pub mod domain;
pub mod fingerprint;
pub mod limits;
pub mod outcome;
pub mod rng;
pub mod strategy;

pub use strategy::{BetContext, ComposedStrategy, Strategy, StrategyError, StrategyState};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: domain and config types are Send + Sync, and
    /// strategies are Send, so batches can run one instance per thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Pocket>();
        require_sync::<domain::Pocket>();
        require_send::<domain::SpinRecord>();
        require_sync::<domain::SpinRecord>();
        require_send::<domain::BetPosition>();
        require_sync::<domain::BetPosition>();
        require_send::<domain::Wager>();
        require_sync::<domain::Wager>();
        require_send::<domain::TableConfig>();
        require_sync::<domain::TableConfig>();

        // Engine types
        require_send::<board::Coverage>();
        require_sync::<board::Coverage>();
        require_send::<outcome::Settlement>();
        require_sync::<outcome::Settlement>();
        require_send::<outcome::OutcomePolicy>();
        require_sync::<outcome::OutcomePolicy>();
        require_send::<analyzer::WindowedFrequency>();
        require_sync::<analyzer::WindowedFrequency>();

        // State and config
        require_send::<components::ProgressionState>();
        require_sync::<components::ProgressionState>();
        require_send::<StrategyState>();
        require_sync::<StrategyState>();
        require_send::<fingerprint::StrategyConfig>();
        require_sync::<fingerprint::StrategyConfig>();
        require_send::<fingerprint::ConfigHash>();
        require_sync::<fingerprint::ConfigHash>();
        require_send::<rng::RngHierarchy>();
        require_sync::<rng::RngHierarchy>();

        // Runtime components
        require_send::<Box<dyn components::ProgressionRule>>();
        require_sync::<Box<dyn components::ProgressionRule>>();
        require_send::<Box<dyn components::CoverageSelector>>();
        require_sync::<Box<dyn components::CoverageSelector>>();
        require_send::<ComposedStrategy>();
        require_send::<Box<dyn Strategy>>();
    }

    /// Architecture contract: selectors never see the bankroll.
    ///
    /// `select()` takes history, progression state, layout and the RNG only.
    #[test]
    fn coverage_selector_has_no_bankroll_parameter() {
        fn _check_trait_object_builds(
            selector: &dyn components::CoverageSelector,
            history: &[domain::SpinRecord],
            state: &components::ProgressionState,
            rng: &mut rand::rngs::StdRng,
        ) -> Result<Option<Vec<components::StakedPosition>>, board::GeometryError> {
            selector.select(history, state, domain::Layout::SingleZero, rng)
        }
    }
}
