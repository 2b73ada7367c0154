//! The strategy contract and the composed strategy that runs it.
//!
//! Per spin a [`ComposedStrategy`]:
//!
//! 1. lazily creates its [`StrategyState`],
//! 2. classifies the wagers it placed last time against the spin that
//!    followed them,
//! 3. records the outcome and advances the progression,
//! 4. asks its selector for coverage,
//! 5. sizes and clamps every position,
//! 6. funds the whole set or abstains.
//!
//! Abstaining (`Ok(vec![])`) is a normal result. Errors are programming
//! faults: unresolvable geometry or an invalid table.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::GeometryError;
use crate::components::coverage::CoverageSelector;
use crate::components::progression::{ProgressionRule, ProgressionState};
use crate::components::sizing::StakeSizing;
use crate::domain::{BetPosition, ConfigError, SpinRecord, TableConfig, Wager};
use crate::limits::{BetSlip, StakeError};
use crate::outcome::{classify, Outcome, OutcomePolicy};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    #[error("invalid position: {0}")]
    Geometry(#[from] GeometryError),
    #[error("invalid table: {0}")]
    Table(#[from] ConfigError),
}

/// Everything a strategy may read when deciding a spin.
#[derive(Debug, Clone, Copy)]
pub struct BetContext<'a> {
    /// Caller-owned, append-only.
    pub history: &'a [SpinRecord],
    pub bankroll: f64,
    pub table: &'a TableConfig,
}

/// A betting strategy. One instance per session; never shared.
pub trait Strategy: Send {
    fn name(&self) -> &str;

    /// Wagers for the next spin, or an empty list to sit it out.
    fn bet(&mut self, ctx: &BetContext<'_>) -> Result<Vec<Wager>, StrategyError>;

    /// Drop all state and start a fresh session.
    fn reset(&mut self);
}

/// Per-instance state, created on the first call to `bet`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyState {
    pub progression: ProgressionState,
    /// Wagers returned by the previous call.
    pub last_bets: Vec<Wager>,
    /// History length when `last_bets` were placed.
    pub placed_at: Option<usize>,
    pub last_outcome: Option<Outcome>,
    pub active_coverage: Vec<BetPosition>,
}

impl StrategyState {
    /// Settle `last_bets` against the spin appended right after them.
    ///
    /// Anything else (no bets, spins skipped, history rewound) settles
    /// nothing and discards the stale bets.
    fn settle_previous(
        &mut self,
        history: &[SpinRecord],
        table: &TableConfig,
        policy: &OutcomePolicy,
    ) -> Result<Option<Outcome>, GeometryError> {
        let placed_at = self.placed_at.take();
        let bets = std::mem::take(&mut self.last_bets);
        match placed_at {
            Some(at) if !bets.is_empty() && history.len() == at + 1 => {
                let settlement = classify(history[at].pocket, &bets, table.layout)?;
                Ok(Some(policy.bucket(&settlement)))
            }
            _ => Ok(None),
        }
    }
}

/// Selector + progression + sizing + outcome policy + seeded RNG.
pub struct ComposedStrategy {
    name: String,
    selector: Box<dyn CoverageSelector>,
    progression: Box<dyn ProgressionRule>,
    sizing: StakeSizing,
    policy: OutcomePolicy,
    seed: u64,
    rng: StdRng,
    state: Option<StrategyState>,
}

impl ComposedStrategy {
    pub fn new(
        name: String,
        selector: Box<dyn CoverageSelector>,
        progression: Box<dyn ProgressionRule>,
        sizing: StakeSizing,
        policy: OutcomePolicy,
        seed: u64,
    ) -> Self {
        Self {
            name,
            selector,
            progression,
            sizing,
            policy,
            seed,
            rng: StdRng::seed_from_u64(seed),
            state: None,
        }
    }

    pub fn selector_name(&self) -> &str {
        self.selector.name()
    }

    pub fn progression_name(&self) -> &str {
        self.progression.name()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `None` until the first call to `bet`.
    pub fn state(&self) -> Option<&StrategyState> {
        self.state.as_ref()
    }
}

impl Strategy for ComposedStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn bet(&mut self, ctx: &BetContext<'_>) -> Result<Vec<Wager>, StrategyError> {
        ctx.table.validate()?;
        let state = self.state.get_or_insert_with(StrategyState::default);

        match state.settle_previous(ctx.history, ctx.table, &self.policy)? {
            Some(outcome) => {
                state.progression.record(&outcome, ctx.bankroll);
                let transition = self
                    .progression
                    .advance(&mut state.progression, &outcome, ctx.bankroll);
                tracing::debug!(
                    strategy = %self.name,
                    category = ?outcome.category,
                    net = outcome.net,
                    ?transition,
                    level = state.progression.level,
                    multiplier = state.progression.multiplier,
                    side = state.progression.side,
                    "progression advanced"
                );
                state.last_outcome = Some(outcome);
            }
            None => state.progression.observe_bankroll(ctx.bankroll),
        }

        let Some(picks) = self.selector.select(
            ctx.history,
            &state.progression,
            ctx.table.layout,
            &mut self.rng,
        )?
        else {
            tracing::debug!(
                strategy = %self.name,
                spins = ctx.history.len(),
                warmup = self.selector.warmup_spins(),
                "waiting for coverage"
            );
            state.active_coverage.clear();
            return Ok(Vec::new());
        };

        let unit = self.sizing.unit_stake(&state.progression, ctx.table);
        let mut slip = BetSlip::new(ctx.table);
        for pick in &picks {
            slip.add(pick.position, unit * pick.units)?;
        }

        match slip.fund(ctx.bankroll) {
            Ok(wagers) => {
                state.active_coverage = wagers.iter().map(|w| w.position).collect();
                state.last_bets = wagers.clone();
                state.placed_at = Some(ctx.history.len());
                Ok(wagers)
            }
            Err(StakeError::InsufficientFunds { required, bankroll }) => {
                tracing::debug!(
                    strategy = %self.name,
                    required,
                    bankroll,
                    "abstaining: clamped stake exceeds bankroll"
                );
                state.active_coverage.clear();
                Ok(Vec::new())
            }
            Err(StakeError::Geometry(e)) => Err(e.into()),
        }
    }

    fn reset(&mut self) {
        self.state = None;
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}
