//! Batch backtests: determinism and seeding.

use spinlab_core::components::{CoverageConfig, StakeSizing, StakedPosition, StrategyPreset};
use spinlab_core::domain::{BetPosition, Layout, Pocket, TableConfig};
use spinlab_core::fingerprint::StrategyConfig;
use spinlab_runner::{run_batch, run_batch_sequential, SessionConfig};

fn spins(n: usize) -> Vec<Pocket> {
    // Fixed walk around the wheel; no RNG needed for a reproducible tape.
    (0..n)
        .map(|i| Pocket::new(((i * 17 + 5) % 37) as u8, Layout::SingleZero).unwrap())
        .collect()
}

fn all_presets(master_seed: u64) -> SessionConfig {
    SessionConfig {
        table: TableConfig::default(),
        bankroll: 500.0,
        master_seed,
        presets: StrategyPreset::all().to_vec(),
        strategies: Vec::new(),
    }
}

#[test]
fn parallel_matches_sequential() {
    let config = all_presets(42);
    let tape = spins(300);
    let parallel = run_batch(&config, &tape).unwrap();
    let sequential = run_batch_sequential(&config, &tape).unwrap();
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.results.len(), StrategyPreset::all().len());
    assert_eq!(parallel.error_count(), 0);
}

#[test]
fn results_keep_config_order() {
    let config = all_presets(1);
    let results = run_batch(&config, &spins(50)).unwrap().results;
    for (result, preset) in results.iter().zip(StrategyPreset::all()) {
        assert_eq!(result.report.strategy, preset.name());
        assert_eq!(result.config_hash, preset.to_config().config_hash());
    }
}

#[test]
fn master_seed_changes_only_seeded_strategies() {
    let tape = spins(200);
    let a = run_batch(&all_presets(1), &tape).unwrap().results;
    let b = run_batch(&all_presets(2), &tape).unwrap().results;
    let idx = |preset: StrategyPreset| {
        StrategyPreset::all()
            .iter()
            .position(|p| *p == preset)
            .unwrap()
    };
    // No randomness in a fixed martingale.
    let m = idx(StrategyPreset::MartingaleRed);
    assert_ne!(a[m].seed, b[m].seed);
    assert_eq!(a[m].report, b[m].report);
    // Random corners draw from the seed.
    let r = idx(StrategyPreset::RandomCorners);
    assert_ne!(a[r].report, b[r].report);
}

#[test]
fn duplicate_configs_get_distinct_seeds() {
    let mut config = all_presets(9);
    config.presets = vec![StrategyPreset::RandomCorners, StrategyPreset::RandomCorners];
    let results = run_batch(&config, &spins(20)).unwrap().results;
    assert_eq!(results[0].config_hash, results[1].config_hash);
    assert_ne!(results[0].seed, results[1].seed);
}

#[test]
fn batch_from_toml() {
    let src = r#"
        bankroll = 300.0
        master_seed = 7
        presets = ["street_ladder"]

        [table]
        layout = "double_zero"

        [table.betLimits]
        min = 1.0
        max = 100.0

        [[strategies]]
        name = "basket"

        [strategies.coverage]
        kind = "fixed"
        positions = [{ position = { type = "basket" } }]
    "#;
    let config = SessionConfig::from_toml_str(src).unwrap();
    assert_eq!(config.table.layout, Layout::DoubleZero);
    let mut tape = spins(30);
    tape.push(Pocket::DOUBLE_ZERO);
    let results = run_batch(&config, &tape).unwrap().results;
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].report.strategy, "basket");
    assert_eq!(results[1].report.spins_played, 31);
}

#[test]
fn faulting_instance_does_not_sink_the_batch() {
    // 00 passes the factory but cannot be staked on a single-zero wheel.
    let mut config = all_presets(3);
    config.strategies.push(StrategyConfig {
        name: "double zero".into(),
        coverage: CoverageConfig::Fixed {
            positions: vec![StakedPosition::unit(BetPosition::Number(Pocket::DOUBLE_ZERO))],
        },
        progression: Vec::new(),
        guards: Vec::new(),
        sizing: StakeSizing::flat(1.0),
        outcome: Default::default(),
    });
    let tape = spins(40);
    let run = run_batch(&config, &tape).unwrap();
    let presets = StrategyPreset::all().len();

    assert_eq!(run.results.len(), presets);
    assert_eq!(run.error_count(), 1);
    assert_eq!(run.failed[0].instance, presets);
    assert_eq!(run.failed[0].strategy, "double zero");
    assert!(run.result_for(presets).is_none());
    assert_eq!(run, run_batch_sequential(&config, &tape).unwrap());
}
