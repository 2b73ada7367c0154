//! Factory system — converts declarative configs into runtime trait objects.
//!
//! Three factory functions (`create_progression`, `create_guards`,
//! `create_selector`) plus `build_strategy`, which assembles them into a
//! [`ComposedStrategy`]. Parameters are validated here so the asserting
//! constructors of the primitives are never reached with bad input.
//!
//! Enumerated parameters are numeric codes, like every other parameter:
//!
//! - `on_win`: 0 = reset, 1 = step down, 2 = hold
//! - `category`: 0 = win, 1 = push, 2 = partial loss, 3 = total loss
//! - `trigger`: 0 = win, 1 = any loss, 2 = total loss, 3 = jackpot

use crate::board::{covered_numbers, GeometryError};
use crate::domain::Layout;
use crate::fingerprint::{ComponentConfig, StrategyConfig};
use crate::outcome::OutcomeCategory;
use crate::strategy::ComposedStrategy;

use super::coverage::{
    CoverageConfig, CoverageSelector, FixedCoverage, HotColdCoverage, RandomCorners, SideCoverage,
    StakedPosition,
};
use super::progression::{
    ArithmeticStep, Chain, FlatBet, GeometricStep, HardCap, LinearStep, ProfitGoal,
    ProgressionRule, SideToggle, StreakGate, ToggleTrigger, WinRetreat,
};
use super::sizing::StakeSizing;

// ─── Error type ──────────────────────────────────────────────────────

/// Errors that can occur during component construction.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    #[error("Unknown progression rule: {0}")]
    UnknownProgression(String),
    #[error("Unknown guard: {0}")]
    UnknownGuard(String),
    #[error("Invalid parameter `{param}` for {component}: {reason}")]
    InvalidParam {
        component: String,
        param: &'static str,
        reason: String,
    },
    #[error("Invalid coverage: {0}")]
    InvalidCoverage(String),
    #[error("Invalid sizing: {0}")]
    InvalidSizing(String),
    #[error("Invalid position: {0}")]
    Geometry(#[from] GeometryError),
}

fn invalid(config: &ComponentConfig, param: &'static str, reason: impl Into<String>) -> FactoryError {
    FactoryError::InvalidParam {
        component: config.component_type.clone(),
        param,
        reason: reason.into(),
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────

/// Extract a named f64 parameter from a `ComponentConfig`, falling back to `default`.
fn param(config: &ComponentConfig, name: &str, default: f64) -> f64 {
    config.params.get(name).copied().unwrap_or(default)
}

/// Extract a named non-negative integer parameter, falling back to `default`.
/// Fractional, negative and non-finite values are rejected.
fn param_integer(config: &ComponentConfig, name: &'static str, default: u32) -> Result<u32, FactoryError> {
    match config.params.get(name).copied() {
        None => Ok(default),
        Some(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => {
            Ok(v as u32)
        }
        Some(v) => Err(invalid(config, name, format!("expected a non-negative integer, got {v}"))),
    }
}

fn param_usize(config: &ComponentConfig, name: &'static str, default: usize) -> Result<usize, FactoryError> {
    let default = u32::try_from(default).unwrap_or(u32::MAX);
    param_integer(config, name, default).map(|v| v as usize)
}

fn param_u32(config: &ComponentConfig, name: &'static str, default: u32) -> Result<u32, FactoryError> {
    param_integer(config, name, default)
}

fn decode_on_win(config: &ComponentConfig) -> Result<WinRetreat, FactoryError> {
    match param_usize(config, "on_win", 0)? {
        0 => Ok(WinRetreat::Reset),
        1 => Ok(WinRetreat::StepDown),
        2 => Ok(WinRetreat::Hold),
        other => Err(invalid(config, "on_win", format!("unknown code {other}"))),
    }
}

fn decode_category(config: &ComponentConfig) -> Result<OutcomeCategory, FactoryError> {
    match param_usize(config, "category", 3)? {
        0 => Ok(OutcomeCategory::Win),
        1 => Ok(OutcomeCategory::Push),
        2 => Ok(OutcomeCategory::PartialLoss),
        3 => Ok(OutcomeCategory::TotalLoss),
        other => Err(invalid(config, "category", format!("unknown code {other}"))),
    }
}

fn decode_trigger(config: &ComponentConfig) -> Result<ToggleTrigger, FactoryError> {
    match param_usize(config, "trigger", 2)? {
        0 => Ok(ToggleTrigger::Win),
        1 => Ok(ToggleTrigger::Loss),
        2 => Ok(ToggleTrigger::TotalLoss),
        3 => Ok(ToggleTrigger::Jackpot),
        other => Err(invalid(config, "trigger", format!("unknown code {other}"))),
    }
}

// ─── Progression factory ─────────────────────────────────────────────

/// Create a single progression rule from a `ComponentConfig`.
pub fn create_rule(config: &ComponentConfig) -> Result<Box<dyn ProgressionRule>, FactoryError> {
    match config.component_type.as_str() {
        "flat" => Ok(Box::new(FlatBet)),
        "linear" => {
            let step = param_u32(config, "step", 1)?;
            if step == 0 {
                return Err(invalid(config, "step", "must be at least 1"));
            }
            Ok(Box::new(LinearStep::new(step, decode_on_win(config)?)))
        }
        "geometric" => {
            let factor = param(config, "factor", 2.0);
            if !(factor > 1.0) {
                return Err(invalid(config, "factor", "must be greater than 1"));
            }
            Ok(Box::new(GeometricStep::new(factor)))
        }
        "arithmetic" => {
            let step = param(config, "step", 1.0);
            if !(step > 0.0) {
                return Err(invalid(config, "step", "must be positive"));
            }
            Ok(Box::new(ArithmeticStep::new(step, decode_on_win(config)?)))
        }
        other => Err(FactoryError::UnknownProgression(other.to_string())),
    }
}

/// Create the base progression: flat when empty, a [`Chain`] when more than
/// one rule is configured.
pub fn create_progression(
    configs: &[ComponentConfig],
) -> Result<Box<dyn ProgressionRule>, FactoryError> {
    let mut rules = configs
        .iter()
        .map(create_rule)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(match rules.len() {
        0 => Box::new(FlatBet),
        1 => rules.remove(0),
        _ => Box::new(Chain::new(rules)),
    })
}

// ─── Guard factory ───────────────────────────────────────────────────

/// Wrap `inner` in each guard in turn; the last guard ends up outermost.
/// A guard's index in `guards` keys any state it keeps.
pub fn create_guards(
    inner: Box<dyn ProgressionRule>,
    guards: &[ComponentConfig],
) -> Result<Box<dyn ProgressionRule>, FactoryError> {
    guards.iter().enumerate().try_fold(inner, |inner, (slot, config)| {
        let wrapped: Box<dyn ProgressionRule> = match config.component_type.as_str() {
            "streak_gate" => {
                let count = param_u32(config, "count", 2)?;
                if count == 0 {
                    return Err(invalid(config, "count", "must be at least 1"));
                }
                Box::new(StreakGate::new(decode_category(config)?, count, inner).with_slot(slot))
            }
            "profit_goal" => {
                let target = param(config, "target", 0.0);
                if !(target >= 0.0) {
                    return Err(invalid(config, "target", "must be non-negative"));
                }
                Box::new(ProfitGoal::new(target, inner))
            }
            "side_toggle" => {
                let sides = param_usize(config, "sides", 2)?;
                if sides < 2 {
                    return Err(invalid(config, "sides", "need at least two sides"));
                }
                Box::new(SideToggle::new(sides, decode_trigger(config)?, inner))
            }
            "hard_cap" => Box::new(HardCap::new(param_u32(config, "max_level", 10)?, inner)),
            other => return Err(FactoryError::UnknownGuard(other.to_string())),
        };
        Ok(wrapped)
    })
}

// ─── Coverage factory ────────────────────────────────────────────────

/// Positions are checked against the double-zero board, the superset of
/// both layouts; a `00` position on a single-zero table fails at bet time.
fn check_positions(positions: &[StakedPosition]) -> Result<(), FactoryError> {
    for staked in positions {
        covered_numbers(&staked.position, Layout::DoubleZero)?;
        if !(staked.units > 0.0) {
            return Err(FactoryError::InvalidCoverage(format!(
                "{} has non-positive weight {}",
                staked.position, staked.units
            )));
        }
    }
    Ok(())
}

/// Create a coverage selector from a `CoverageConfig`.
pub fn create_selector(config: &CoverageConfig) -> Result<Box<dyn CoverageSelector>, FactoryError> {
    match config {
        CoverageConfig::Fixed { positions } => {
            if positions.is_empty() {
                return Err(FactoryError::InvalidCoverage("fixed coverage is empty".into()));
            }
            check_positions(positions)?;
            Ok(Box::new(FixedCoverage::new(positions.clone())))
        }
        CoverageConfig::Sides { sides } => {
            if sides.is_empty() || sides.iter().any(Vec::is_empty) {
                return Err(FactoryError::InvalidCoverage("every side needs positions".into()));
            }
            for side in sides {
                check_positions(side)?;
            }
            Ok(Box::new(SideCoverage::new(sides.clone())))
        }
        CoverageConfig::HotCold {
            candidates,
            window,
            picks,
            order,
            units,
        } => {
            if *window == 0 {
                return Err(FactoryError::InvalidCoverage("window must be positive".into()));
            }
            if *picks == 0 || *picks > candidates.len() {
                return Err(FactoryError::InvalidCoverage(format!(
                    "picks {picks} out of range for {} candidates",
                    candidates.len()
                )));
            }
            let staked: Vec<StakedPosition> = candidates
                .iter()
                .map(|p| StakedPosition::new(*p, *units))
                .collect();
            check_positions(&staked)?;
            Ok(Box::new(HotColdCoverage::new(
                candidates.clone(),
                *window,
                *picks,
                *order,
                *units,
            )))
        }
        CoverageConfig::RandomCorners { count, units } => {
            if *count == 0 || *count > 22 {
                return Err(FactoryError::InvalidCoverage(format!(
                    "corner count {count} out of range 1..=22"
                )));
            }
            if !(*units > 0.0) {
                return Err(FactoryError::InvalidCoverage("non-positive corner weight".into()));
            }
            Ok(Box::new(RandomCorners::new(*count, *units)))
        }
    }
}

// ─── Strategy assembly ───────────────────────────────────────────────

fn check_sizing(sizing: &StakeSizing) -> Result<(), FactoryError> {
    if !(sizing.base_unit > 0.0) {
        return Err(FactoryError::InvalidSizing(format!(
            "base unit must be positive, got {}",
            sizing.base_unit
        )));
    }
    if let Some(ladder) = &sizing.ladder {
        if ladder.is_empty() || ladder.iter().any(|r| !(*r > 0.0)) {
            return Err(FactoryError::InvalidSizing("ladder rungs must be positive".into()));
        }
    }
    Ok(())
}

/// A side toggle must rotate through exactly the configured side groups.
fn check_side_count(config: &StrategyConfig) -> Result<(), FactoryError> {
    let CoverageConfig::Sides { sides } = &config.coverage else {
        return Ok(());
    };
    for guard in config.guards.iter().filter(|g| g.component_type == "side_toggle") {
        let toggled = param_usize(guard, "sides", 2)?;
        if toggled != sides.len() {
            return Err(FactoryError::InvalidCoverage(format!(
                "side_toggle rotates {toggled} sides but coverage defines {}",
                sides.len()
            )));
        }
    }
    Ok(())
}

/// Build a ready-to-bet strategy. `seed` feeds the strategy's private RNG.
pub fn build_strategy(config: &StrategyConfig, seed: u64) -> Result<ComposedStrategy, FactoryError> {
    check_sizing(&config.sizing)?;
    let selector = create_selector(&config.coverage)?;
    let base = create_progression(&config.progression)?;
    let progression = create_guards(base, &config.guards)?;
    check_side_count(config)?;
    Ok(ComposedStrategy::new(
        config.name.clone(),
        selector,
        progression,
        config.sizing.clone(),
        config.outcome,
        seed,
    ))
}
