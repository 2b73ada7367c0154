//! Session observers — the event hook for anything that wants to watch a
//! session (logging, recording, persistence) without touching the betting
//! path. Observers run after the spin is settled and cannot affect it.

use serde::{Deserialize, Serialize};

use spinlab_core::domain::{Pocket, Wager};
use spinlab_core::outcome::Settlement;

use crate::session::SessionReport;

/// One settled spin.
#[derive(Debug, Clone, Copy)]
pub struct SpinEvent<'a> {
    pub strategy: &'a str,
    /// Zero-based spin index within the session.
    pub index: usize,
    pub pocket: Pocket,
    pub wagers: &'a [Wager],
    pub settlement: &'a Settlement,
    pub bankroll_before: f64,
    pub bankroll_after: f64,
}

pub trait SessionObserver {
    fn on_spin(&mut self, _event: &SpinEvent<'_>) {}

    fn on_finish(&mut self, _report: &SessionReport) {}
}

/// Ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SessionObserver for NullObserver {}

/// Owned copy of a [`SpinEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinLog {
    pub index: usize,
    pub pocket: Pocket,
    pub wagers: Vec<Wager>,
    pub net: f64,
    pub bankroll: f64,
}

/// Keeps every spin and the final report in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub spins: Vec<SpinLog>,
    pub report: Option<SessionReport>,
}

impl SessionObserver for RecordingObserver {
    fn on_spin(&mut self, event: &SpinEvent<'_>) {
        self.spins.push(SpinLog {
            index: event.index,
            pocket: event.pocket,
            wagers: event.wagers.to_vec(),
            net: event.settlement.net,
            bankroll: event.bankroll_after,
        });
    }

    fn on_finish(&mut self, report: &SessionReport) {
        self.report = Some(report.clone());
    }
}

/// Emits a structured `info` line every `every` spins and at the end.
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    every: usize,
}

impl TracingObserver {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(100)
    }
}

impl SessionObserver for TracingObserver {
    fn on_spin(&mut self, event: &SpinEvent<'_>) {
        if (event.index + 1) % self.every == 0 {
            tracing::info!(
                strategy = event.strategy,
                spin = event.index + 1,
                pocket = %event.pocket,
                wagers = event.wagers.len(),
                net = event.settlement.net,
                bankroll = event.bankroll_after,
                "session progress"
            );
        }
    }

    fn on_finish(&mut self, report: &SessionReport) {
        tracing::info!(
            strategy = %report.strategy,
            spins = report.spins_played,
            abstentions = report.abstentions,
            final_bankroll = report.final_bankroll,
            max_drawdown = report.max_drawdown,
            "session finished"
        );
    }
}
