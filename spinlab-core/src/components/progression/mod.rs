//! Progression state machine — how stake size moves spin to spin.
//!
//! Rules are stateless configuration; all mutable state lives in
//! [`ProgressionState`], owned by one strategy instance. The machine has no
//! terminal state and starts from `ProgressionState::default()` on first use.
//!
//! ## Primitives
//!
//! - [`LinearStep`] — level up on loss, down or reset on win
//! - [`GeometricStep`] — multiplier ×k on loss, back to 1 on win
//! - [`ArithmeticStep`] — add increments on loss, hold/decrement/reset on win
//! - [`StreakGate`] — pass a category through only after N in a row
//! - [`ProfitGoal`] — reset only once the bankroll clears a high-water target
//! - [`SideToggle`] — flip the active side on a trigger
//! - [`HardCap`] — stop-loss: reset when the height exceeds a ceiling
//! - [`Chain`] — apply several rules in order
//!
//! `Push` holds under every primitive; `PartialLoss` and `TotalLoss` both
//! count as losses. Whether a hit-but-negative spin is a partial loss or a
//! push is decided earlier by the strategy's `OutcomePolicy`.

pub mod arithmetic;
pub mod chain;
pub mod geometric;
pub mod hard_cap;
pub mod linear;
pub mod profit_goal;
pub mod side_toggle;
pub mod streak_gate;

pub use arithmetic::ArithmeticStep;
pub use chain::Chain;
pub use geometric::GeometricStep;
pub use hard_cap::HardCap;
pub use linear::LinearStep;
pub use profit_goal::ProfitGoal;
pub use side_toggle::{SideToggle, ToggleTrigger};
pub use streak_gate::StreakGate;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::outcome::{Outcome, OutcomeCategory};

/// What a rule did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Held,
    Advanced,
    Retreated,
    Reset,
    Toggled,
}

/// What a step primitive does on a win.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRetreat {
    #[default]
    Reset,
    StepDown,
    Hold,
}

/// Mutable progression state of one strategy instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// Additive progression index (ladder rung).
    pub level: u32,
    /// Geometric stake multiplier, ≥ 1.
    pub multiplier: f64,
    /// Losses folded into `multiplier` since the last reset.
    pub depth: u32,
    /// Arithmetic increments currently added to the stake.
    pub increments: f64,
    /// Arithmetic advances not yet retreated.
    #[serde(default)]
    pub steps: u32,
    /// Active side/mode index.
    pub side: usize,
    /// Named streak counters used by gates.
    pub streaks: BTreeMap<String, u32>,
    pub consecutive_wins: u32,
    pub consecutive_losses: u32,
    /// Profit-goal reference, set lazily from the first bankroll seen.
    pub reference_bankroll: Option<f64>,
    /// Highest bankroll seen.
    pub peak_bankroll: Option<f64>,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            level: 0,
            multiplier: 1.0,
            depth: 0,
            increments: 0.0,
            steps: 0,
            side: 0,
            streaks: BTreeMap::new(),
            consecutive_wins: 0,
            consecutive_losses: 0,
            reference_bankroll: None,
            peak_bankroll: None,
        }
    }
}

impl ProgressionState {
    /// Back to the first rung. Side and bankroll marks survive.
    pub fn reset_progress(&mut self) {
        self.level = 0;
        self.multiplier = 1.0;
        self.depth = 0;
        self.increments = 0.0;
        self.steps = 0;
        self.streaks.clear();
    }

    /// How far the progression has climbed, whichever primitive drove it.
    pub fn height(&self) -> u32 {
        self.level.max(self.depth).max(self.steps)
    }

    pub fn streak(&self, key: &str) -> u32 {
        self.streaks.get(key).copied().unwrap_or(0)
    }

    /// Update win/loss counters and the bankroll peak before rules run.
    pub fn record(&mut self, outcome: &Outcome, bankroll: f64) {
        match outcome.category {
            OutcomeCategory::Win => {
                self.consecutive_wins += 1;
                self.consecutive_losses = 0;
            }
            OutcomeCategory::PartialLoss | OutcomeCategory::TotalLoss => {
                self.consecutive_losses += 1;
                self.consecutive_wins = 0;
            }
            OutcomeCategory::Push => {}
        }
        self.observe_bankroll(bankroll);
    }

    /// Seed the reference lazily and track the high-water mark.
    pub fn observe_bankroll(&mut self, bankroll: f64) {
        self.reference_bankroll.get_or_insert(bankroll);
        let peak = self.peak_bankroll.get_or_insert(bankroll);
        if bankroll > *peak {
            *peak = bankroll;
        }
    }
}

/// A progression primitive.
pub trait ProgressionRule: Send + Sync {
    /// Human-readable name (e.g., "linear", "profit_goal").
    fn name(&self) -> &str;

    /// Apply one classified outcome. `bankroll` is the bankroll after that
    /// outcome was settled.
    fn advance(&self, state: &mut ProgressionState, outcome: &Outcome, bankroll: f64) -> Transition;
}

impl<R: ProgressionRule + ?Sized> ProgressionRule for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn advance(&self, state: &mut ProgressionState, outcome: &Outcome, bankroll: f64) -> Transition {
        (**self).advance(state, outcome, bankroll)
    }
}

/// Rule that never changes anything. Flat betting.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatBet;

impl ProgressionRule for FlatBet {
    fn name(&self) -> &str {
        "flat"
    }

    fn advance(&self, _state: &mut ProgressionState, _outcome: &Outcome, _bankroll: f64) -> Transition {
        Transition::Held
    }
}
