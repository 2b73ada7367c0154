//! Parallel batch backtests — many independent strategy instances over the
//! same spin sequence.
//!
//! Each instance gets its own strategy, bankroll and history; nothing is
//! shared between threads except the read-only spins and config. Seeds come
//! from the [`RngHierarchy`], keyed by config hash and position in the batch,
//! so results do not depend on the thread count.
//!
//! A fault in one instance is fatal for that instance only: it is logged and
//! recorded in [`BatchRun::failed`], and every other instance still reports.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use spinlab_core::components::build_strategy;
use spinlab_core::domain::Pocket;
use spinlab_core::fingerprint::{ConfigHash, FullHash, StrategyConfig};
use spinlab_core::rng::RngHierarchy;

use crate::config::SessionConfig;
use crate::observer::NullObserver;
use crate::session::{RunnerError, Session, SessionReport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Position in [`SessionConfig::strategy_configs`].
    pub instance: usize,
    pub config_hash: ConfigHash,
    pub full_hash: FullHash,
    pub seed: u64,
    pub report: SessionReport,
}

/// Record of an instance that faulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedInstance {
    pub instance: usize,
    pub strategy: String,
    pub error: String,
}

/// Everything a batch produced, each list in config order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRun {
    pub results: Vec<BatchResult>,
    pub failed: Vec<FailedInstance>,
}

impl BatchRun {
    pub fn error_count(&self) -> usize {
        self.failed.len()
    }

    /// Result for a config position, if that instance completed.
    pub fn result_for(&self, instance: usize) -> Option<&BatchResult> {
        self.results.iter().find(|r| r.instance == instance)
    }

    fn collect(outcomes: Vec<Result<BatchResult, FailedInstance>>) -> Self {
        let mut run = Self::default();
        for outcome in outcomes {
            match outcome {
                Ok(result) => run.results.push(result),
                Err(failure) => run.failed.push(failure),
            }
        }
        run
    }
}

fn run_one(
    config: &SessionConfig,
    hierarchy: &RngHierarchy,
    instance: usize,
    strategy: &StrategyConfig,
    spins: &[Pocket],
) -> Result<BatchResult, RunnerError> {
    let config_hash = strategy.config_hash();
    let full_hash = strategy.full_hash()?;
    let seed = hierarchy.sub_seed(&config_hash, instance as u64);
    let built = build_strategy(strategy, seed)?;
    let mut session = Session::new(Box::new(built), config.bankroll, config.table.clone());
    let report = session.play(spins, &mut NullObserver)?;
    Ok(BatchResult {
        instance,
        config_hash,
        full_hash,
        seed,
        report,
    })
}

fn run_instance(
    config: &SessionConfig,
    hierarchy: &RngHierarchy,
    instance: usize,
    strategy: &StrategyConfig,
    spins: &[Pocket],
) -> Result<BatchResult, FailedInstance> {
    run_one(config, hierarchy, instance, strategy, spins).map_err(|e| {
        tracing::warn!(
            instance,
            strategy = %strategy.name,
            error = %e,
            "strategy instance failed"
        );
        FailedInstance {
            instance,
            strategy: strategy.name.clone(),
            error: e.to_string(),
        }
    })
}

/// Play every configured strategy over `spins` in parallel.
///
/// Only an invalid session config fails the whole batch.
pub fn run_batch(config: &SessionConfig, spins: &[Pocket]) -> Result<BatchRun, RunnerError> {
    config.validate()?;
    let hierarchy = RngHierarchy::new(config.master_seed);
    let strategies = config.strategy_configs();
    let outcomes: Vec<_> = strategies
        .par_iter()
        .enumerate()
        .map(|(instance, strategy)| run_instance(config, &hierarchy, instance, strategy, spins))
        .collect();
    let run = BatchRun::collect(outcomes);
    tracing::info!(
        strategies = strategies.len(),
        failed = run.error_count(),
        spins = spins.len(),
        master_seed = config.master_seed,
        "batch finished"
    );
    Ok(run)
}

/// Sequential variant of [`run_batch`]; identical results.
pub fn run_batch_sequential(config: &SessionConfig, spins: &[Pocket]) -> Result<BatchRun, RunnerError> {
    config.validate()?;
    let hierarchy = RngHierarchy::new(config.master_seed);
    let outcomes = config
        .strategy_configs()
        .iter()
        .enumerate()
        .map(|(instance, strategy)| run_instance(config, &hierarchy, instance, strategy, spins))
        .collect();
    Ok(BatchRun::collect(outcomes))
}
