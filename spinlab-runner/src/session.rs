//! Single-session replay.
//!
//! A session owns one strategy instance, the bankroll and the spin history.
//! Spins come from the caller; the session never generates them. Every
//! wager list is checked against the bankroll before it is settled, so a
//! strategy that breaks the affordability contract fails loudly instead of
//! driving the bankroll negative.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use spinlab_core::board::GeometryError;
use spinlab_core::components::FactoryError;
use spinlab_core::domain::{total_stake, Pocket, SpinRecord, TableConfig};
use spinlab_core::limits::STAKE_EPSILON;
use spinlab_core::outcome::classify;
use spinlab_core::{BetContext, Strategy, StrategyError};

use crate::config::SessionConfigError;
use crate::observer::{SessionObserver, SpinEvent};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("strategy error: {0}")]
    Strategy(#[from] StrategyError),
    #[error("invalid spin: {0}")]
    Geometry(#[from] GeometryError),
    #[error("composition error: {0}")]
    Composition(#[from] FactoryError),
    #[error("config error: {0}")]
    Config(#[from] SessionConfigError),
    #[error("hashing error: {0}")]
    Hash(#[from] serde_json::Error),
    #[error("strategy '{strategy}' staked {required} with only {bankroll} at spin {spin}")]
    Overdrawn {
        strategy: String,
        spin: usize,
        required: f64,
        bankroll: f64,
    },
}

/// Summary of one played session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub strategy: String,
    pub spins_played: usize,
    /// Individual wagers, not spins.
    pub wagers_placed: usize,
    /// Spins the strategy sat out.
    pub abstentions: usize,
    pub total_staked: f64,
    pub total_returned: f64,
    pub initial_bankroll: f64,
    pub final_bankroll: f64,
    pub peak_bankroll: f64,
    /// Largest peak-to-trough fall as a negative fraction of the peak.
    pub max_drawdown: f64,
}

impl SessionReport {
    pub fn net(&self) -> f64 {
        self.final_bankroll - self.initial_bankroll
    }
}

pub struct Session {
    strategy: Box<dyn Strategy>,
    table: TableConfig,
    bankroll: f64,
    history: Vec<SpinRecord>,
}

impl Session {
    pub fn new(strategy: Box<dyn Strategy>, bankroll: f64, table: TableConfig) -> Self {
        Self {
            strategy,
            table,
            bankroll,
            history: Vec::new(),
        }
    }

    pub fn bankroll(&self) -> f64 {
        self.bankroll
    }

    pub fn history(&self) -> &[SpinRecord] {
        &self.history
    }

    /// Replay `spins` in order. Repeated calls continue the same session.
    pub fn play(
        &mut self,
        spins: &[Pocket],
        observer: &mut dyn SessionObserver,
    ) -> Result<SessionReport, RunnerError> {
        self.table.validate().map_err(StrategyError::from)?;
        let initial_bankroll = self.bankroll;
        let mut peak = self.bankroll;
        let mut max_drawdown = 0.0_f64;
        let mut report = SessionReport {
            strategy: self.strategy.name().to_string(),
            spins_played: 0,
            wagers_placed: 0,
            abstentions: 0,
            total_staked: 0.0,
            total_returned: 0.0,
            initial_bankroll,
            final_bankroll: initial_bankroll,
            peak_bankroll: initial_bankroll,
            max_drawdown: 0.0,
        };

        for (index, pocket) in spins.iter().enumerate() {
            let pocket = Pocket::new(pocket.value(), self.table.layout)?;
            let wagers = self.strategy.bet(&BetContext {
                history: &self.history,
                bankroll: self.bankroll,
                table: &self.table,
            })?;

            let required = total_stake(&wagers);
            if required > self.bankroll + STAKE_EPSILON {
                return Err(RunnerError::Overdrawn {
                    strategy: report.strategy,
                    spin: index,
                    required,
                    bankroll: self.bankroll,
                });
            }

            let settlement = classify(pocket, &wagers, self.table.layout)?;
            let bankroll_before = self.bankroll;
            self.bankroll += settlement.net;
            self.history.push(SpinRecord::new(pocket));

            report.spins_played += 1;
            if wagers.is_empty() {
                report.abstentions += 1;
            }
            report.wagers_placed += wagers.len();
            report.total_staked += settlement.total_staked;
            report.total_returned += settlement.gross_return;

            if self.bankroll > peak {
                peak = self.bankroll;
            }
            if peak > 0.0 {
                max_drawdown = max_drawdown.min((self.bankroll - peak) / peak);
            }

            observer.on_spin(&SpinEvent {
                strategy: &report.strategy,
                index,
                pocket,
                wagers: &wagers,
                settlement: &settlement,
                bankroll_before,
                bankroll_after: self.bankroll,
            });
        }

        report.final_bankroll = self.bankroll;
        report.peak_bankroll = peak;
        report.max_drawdown = max_drawdown;
        tracing::debug!(
            strategy = %report.strategy,
            spins = report.spins_played,
            net = report.net(),
            "session played"
        );
        observer.on_finish(&report);
        Ok(report)
    }
}
