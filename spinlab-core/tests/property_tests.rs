//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Geometry exactness — every resolvable position covers its textbook count
//! 2. Clamp idempotence
//! 3. Affordability — a non-empty wager list never exceeds the bankroll
//! 4. Progression monotonicity under pure-loss streams
//! 5. Determinism — identical history + seed ⇒ identical wagers

use proptest::prelude::*;
use spinlab_core::board::{all_corners, covered_numbers, payout_multiplier};
use spinlab_core::components::progression::{
    ArithmeticStep, GeometricStep, LinearStep, ProgressionRule, ProgressionState, WinRetreat,
};
use spinlab_core::components::{build_strategy, StakeSizing, StrategyPreset};
use spinlab_core::domain::{
    total_stake, BetCategory, BetPosition, Layout, Pocket, SpinRecord, TableConfig, Wager,
};
use spinlab_core::limits::{clamp, STAKE_EPSILON};
use spinlab_core::outcome::{classify, Outcome, OutcomeCategory};
use spinlab_core::{BetContext, Strategy as _};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_layout() -> impl Strategy<Value = Layout> {
    prop_oneof![Just(Layout::SingleZero), Just(Layout::DoubleZero)]
}

fn arb_position() -> impl Strategy<Value = BetPosition> {
    prop_oneof![
        (0u8..=37).prop_map(|n| BetPosition::Number(Pocket::new(n, Layout::DoubleZero).unwrap())),
        (0u8..=37, 0u8..=37).prop_map(|(a, b)| BetPosition::Split([a, b])),
        (0u8..=40).prop_map(BetPosition::Street),
        (0u8..=40).prop_map(BetPosition::Line),
        (0u8..=40).prop_map(BetPosition::Corner),
        (0u8..=4).prop_map(BetPosition::Dozen),
        (0u8..=4).prop_map(BetPosition::Column),
        Just(BetPosition::Basket),
        Just(BetPosition::Red),
        Just(BetPosition::Black),
        Just(BetPosition::Even),
        Just(BetPosition::Odd),
        Just(BetPosition::Low),
        Just(BetPosition::High),
    ]
}

fn arb_table() -> impl Strategy<Value = TableConfig> {
    (0.5..10.0_f64, prop::option::of(1.0..25.0_f64), 50.0..1000.0_f64)
        .prop_map(|(min, min_outside, max)| TableConfig::new(min, min_outside, max))
}

fn arb_spins(max_len: usize) -> impl Strategy<Value = Vec<Pocket>> {
    prop::collection::vec(0u8..=36, 1..max_len)
        .prop_map(|v| v.into_iter().map(|n| Pocket::new(n, Layout::SingleZero).unwrap()).collect())
}

fn textbook_count(position: &BetPosition, layout: Layout) -> usize {
    match position {
        BetPosition::Number(_) => 1,
        BetPosition::Split(_) => 2,
        BetPosition::Street(_) => 3,
        BetPosition::Corner(_) => 4,
        BetPosition::Line(_) => 6,
        BetPosition::Basket => match layout {
            Layout::SingleZero => 4,
            Layout::DoubleZero => 5,
        },
        BetPosition::Dozen(_) | BetPosition::Column(_) => 12,
        _ => 18,
    }
}

// ── 1. Geometry exactness ────────────────────────────────────────────

proptest! {
    /// Whatever resolves covers exactly the textbook count, and its payout
    /// makes the bet fair on a zero-less wheel (36 / count).
    #[test]
    fn resolved_coverage_is_exact(position in arb_position(), layout in arb_layout()) {
        if let Ok(coverage) = covered_numbers(&position, layout) {
            prop_assert_eq!(coverage.len(), textbook_count(&position, layout));
            if !matches!(position, BetPosition::Basket) {
                let fair = 36.0 / coverage.len() as f64;
                prop_assert!((payout_multiplier(&position, layout) - fair).abs() < 1e-12);
            }
        }
    }

    /// Numbers-only positions never cover a zero pocket.
    #[test]
    fn outside_bets_exclude_zero(position in arb_position(), layout in arb_layout()) {
        if position.category() == BetCategory::Outside {
            if let Ok(coverage) = covered_numbers(&position, layout) {
                prop_assert!(!coverage.contains(Pocket::ZERO));
                prop_assert!(!coverage.contains(Pocket::DOUBLE_ZERO));
            }
        }
    }
}

#[test]
fn every_valid_block_stays_inside_its_claimed_range() {
    for corner in all_corners() {
        let BetPosition::Corner(start) = corner else { unreachable!() };
        let values = covered_numbers(&corner, Layout::SingleZero).unwrap().values();
        assert_eq!(values, vec![start, start + 1, start + 3, start + 4]);
        // Same two columns.
        assert_eq!(values[0] % 3, values[2] % 3);
    }
    let lines: Vec<u8> = (1..=36)
        .filter(|s| covered_numbers(&BetPosition::Line(*s), Layout::SingleZero).is_ok())
        .collect();
    assert_eq!(lines, vec![1, 7, 13, 19, 25, 31]);
    let streets = (1..=36)
        .filter(|s| covered_numbers(&BetPosition::Street(*s), Layout::SingleZero).is_ok())
        .count();
    assert_eq!(streets, 12);
}

// ── 2. Clamp idempotence ─────────────────────────────────────────────

proptest! {
    #[test]
    fn clamp_is_idempotent(
        raw in prop_oneof![-1e6..1e6_f64, Just(f64::NAN), Just(f64::INFINITY)],
        inside in any::<bool>(),
        table in arb_table(),
    ) {
        let category = if inside { BetCategory::Inside } else { BetCategory::Outside };
        let once = clamp(raw, category, &table);
        prop_assert_eq!(clamp(once, category, &table), once);
        prop_assert!(once >= table.min_for(category));
    }
}

// ── 3. Affordability ─────────────────────────────────────────────────

/// Drive a strategy over `spins`, settling the bankroll the way a runner
/// would, and return every (bankroll, wagers) pair it produced.
fn replay(
    strategy: &mut dyn spinlab_core::Strategy,
    spins: &[Pocket],
    mut bankroll: f64,
    table: &TableConfig,
) -> Vec<(f64, Vec<Wager>)> {
    let mut history = Vec::with_capacity(spins.len());
    let mut out = Vec::with_capacity(spins.len());
    for pocket in spins {
        let wagers = strategy
            .bet(&BetContext { history: &history, bankroll, table })
            .unwrap();
        let settlement = classify(*pocket, &wagers, table.layout).unwrap();
        out.push((bankroll, wagers));
        bankroll += settlement.net;
        history.push(SpinRecord::new(*pocket));
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn non_empty_wagers_are_always_affordable(
        preset in prop::sample::select(StrategyPreset::all().to_vec()),
        spins in arb_spins(120),
        bankroll in 0.0..300.0_f64,
        seed in any::<u64>(),
    ) {
        let table = TableConfig::default();
        let mut strategy = build_strategy(&preset.to_config(), seed).unwrap();
        for (bankroll, wagers) in replay(&mut strategy, &spins, bankroll, &table) {
            if !wagers.is_empty() {
                prop_assert!(total_stake(&wagers) <= bankroll + STAKE_EPSILON);
            }
            for w in &wagers {
                prop_assert!(w.amount >= table.min_for(w.position.category()));
                prop_assert!(w.amount <= table.max_bet());
            }
        }
    }
}

// ── 4. Progression monotonicity ──────────────────────────────────────

fn total_loss() -> Outcome {
    Outcome::new(OutcomeCategory::TotalLoss, 0, -1.0)
}

fn win() -> Outcome {
    Outcome::new(OutcomeCategory::Win, 1, 1.0)
}

proptest! {
    #[test]
    fn pure_losses_never_shrink_the_stake(
        n in 1usize..40,
        step in 1u32..4,
        factor in 2u32..4,
        base in 1.0..20.0_f64,
    ) {
        let table = TableConfig::default();
        let sizing = StakeSizing::flat(base);
        let rules: Vec<Box<dyn ProgressionRule>> = vec![
            Box::new(LinearStep::new(step, WinRetreat::Reset)),
            Box::new(GeometricStep::new(f64::from(factor))),
            Box::new(ArithmeticStep::new(f64::from(step), WinRetreat::Reset)),
        ];
        for rule in &rules {
            let mut state = ProgressionState::default();
            let mut prev_depth = 0;
            let mut prev_stake = sizing.unit_stake(&state, &table);
            for _ in 0..n {
                rule.advance(&mut state, &total_loss(), 0.0);
                let stake = sizing.unit_stake(&state, &table);
                let depth = state.height();
                prop_assert!(depth > prev_depth);
                prop_assert!(stake >= prev_stake);
                prev_depth = depth;
                prev_stake = stake;
            }
            rule.advance(&mut state, &win(), 0.0);
            prop_assert_eq!(state.height(), 0);
            prop_assert_eq!(sizing.unit_stake(&state, &table), base);
        }
    }

    #[test]
    fn step_down_retreats_one_step(n in 1u32..20, step in 1u32..4) {
        let rule = LinearStep::new(step, WinRetreat::StepDown);
        let mut state = ProgressionState::default();
        for _ in 0..n {
            rule.advance(&mut state, &total_loss(), 0.0);
        }
        rule.advance(&mut state, &win(), 0.0);
        prop_assert_eq!(state.level, (n - 1) * step);
    }
}

// ── 5. Determinism ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn replay_is_deterministic(
        preset in prop::sample::select(StrategyPreset::all().to_vec()),
        spins in arb_spins(80),
        seed in any::<u64>(),
    ) {
        let table = TableConfig::default();
        let config = preset.to_config();
        let mut a = build_strategy(&config, seed).unwrap();
        let mut b = build_strategy(&config, seed).unwrap();
        let ra = replay(&mut a, &spins, 500.0, &table);
        let rb = replay(&mut b, &spins, 500.0, &table);
        prop_assert_eq!(ra, rb);
        prop_assert_eq!(a.state(), b.state());
    }
}
