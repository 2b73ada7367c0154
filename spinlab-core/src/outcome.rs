//! Outcome classification — settles a wager set against the winning pocket.
//!
//! Settlement is always recomputed from `(wagers, winning pocket)`, never
//! inferred from bankroll deltas. Zero falls out of coverage naturally: only
//! a wager whose coverage includes it can win.
//!
//! Bucketing the net result into win / push / partial-loss / total-loss is
//! strategy policy ([`OutcomePolicy`]), not part of the classifier.

use serde::{Deserialize, Serialize};

use crate::board::{covered_numbers, payout_multiplier, GeometryError};
use crate::domain::{Layout, Pocket, Wager};

/// Per-wager results and totals for one spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub per_wager: Vec<bool>,
    pub gross_return: f64,
    pub total_staked: f64,
    /// `gross_return - total_staked`.
    pub net: f64,
}

impl Settlement {
    /// Number of wagers that covered the winning pocket.
    pub fn hits(&self) -> usize {
        self.per_wager.iter().filter(|hit| **hit).count()
    }
}

pub fn classify(winning: Pocket, wagers: &[Wager], layout: Layout) -> Result<Settlement, GeometryError> {
    let mut per_wager = Vec::with_capacity(wagers.len());
    let mut gross_return = 0.0;
    let mut total_staked = 0.0;
    for wager in wagers {
        let hit = covered_numbers(&wager.position, layout)?.contains(winning);
        if hit {
            gross_return += wager.amount * payout_multiplier(&wager.position, layout);
        }
        total_staked += wager.amount;
        per_wager.push(hit);
    }
    let settlement = Settlement {
        per_wager,
        gross_return,
        total_staked,
        net: gross_return - total_staked,
    };
    tracing::trace!(
        winning = %winning,
        hits = settlement.hits(),
        net = settlement.net,
        "spin classified"
    );
    Ok(settlement)
}

/// Strategy-level bucket of a settled spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCategory {
    Win,
    Push,
    /// At least one wager hit but the spin still lost money.
    PartialLoss,
    /// Nothing hit.
    TotalLoss,
}

impl OutcomeCategory {
    pub fn is_loss(self) -> bool {
        matches!(self, Self::PartialLoss | Self::TotalLoss)
    }
}

/// How "hit a covered number but net negative" is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitButNegative {
    #[default]
    PartialLoss,
    Push,
    Loss,
}

/// Per-strategy bucketing thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomePolicy {
    /// `|net| <= push_tolerance` counts as a push.
    pub push_tolerance: f64,
    pub hit_but_negative: HitButNegative,
}

impl Default for OutcomePolicy {
    fn default() -> Self {
        Self {
            push_tolerance: 1e-9,
            hit_but_negative: HitButNegative::PartialLoss,
        }
    }
}

impl OutcomePolicy {
    pub fn bucket(&self, settlement: &Settlement) -> Outcome {
        let hits = settlement.hits();
        let net = settlement.net;
        let category = if net.abs() <= self.push_tolerance {
            OutcomeCategory::Push
        } else if net > 0.0 {
            OutcomeCategory::Win
        } else if hits == 0 {
            OutcomeCategory::TotalLoss
        } else {
            match self.hit_but_negative {
                HitButNegative::PartialLoss => OutcomeCategory::PartialLoss,
                HitButNegative::Push => OutcomeCategory::Push,
                HitButNegative::Loss => OutcomeCategory::TotalLoss,
            }
        };
        Outcome { category, hits, net }
    }
}

/// A bucketed spin result, as seen by progression rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub category: OutcomeCategory,
    pub hits: usize,
    pub net: f64,
}

impl Outcome {
    pub fn new(category: OutcomeCategory, hits: usize, net: f64) -> Self {
        Self { category, hits, net }
    }

    /// Two or more independent wagers won on the same spin.
    pub fn is_jackpot(&self) -> bool {
        self.hits >= 2
    }
}
