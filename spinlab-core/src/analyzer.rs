//! Hot/cold windowed analyzer.
//!
//! Counts pocket frequencies over a fixed trailing window and ranks board
//! positions by how often their coverage hit. Nothing is produced until the
//! window is full.

use serde::{Deserialize, Serialize};

use crate::board::{covered_numbers, GeometryError};
use crate::domain::{BetPosition, Layout, Pocket, SpinRecord};

/// Pocket hit counts over one window. Index 37 is `00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequencies {
    counts: [u32; 38],
    window: usize,
}

impl Frequencies {
    pub fn count(&self, pocket: Pocket) -> u32 {
        self.counts.get(pocket.value() as usize).copied().unwrap_or(0)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Total hits across a set of pockets.
    pub fn hits_on(&self, pockets: impl IntoIterator<Item = Pocket>) -> u32 {
        pockets.into_iter().map(|p| self.count(p)).sum()
    }
}

/// Fixed trailing window over the spin history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowedFrequency {
    pub window: usize,
}

impl WindowedFrequency {
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "window must be positive");
        Self { window }
    }

    pub fn is_ready(&self, history: &[SpinRecord]) -> bool {
        history.len() >= self.window
    }

    /// Frequencies over the last `window` spins, or `None` while the history
    /// is shorter than the window.
    pub fn frequencies(&self, history: &[SpinRecord]) -> Option<Frequencies> {
        if !self.is_ready(history) {
            return None;
        }
        let mut counts = [0u32; 38];
        for spin in &history[history.len() - self.window..] {
            if let Some(count) = counts.get_mut(spin.pocket.value() as usize) {
                *count += 1;
            }
        }
        Some(Frequencies {
            counts,
            window: self.window,
        })
    }
}

/// Ranking direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatOrder {
    #[default]
    Hottest,
    Coldest,
}

/// A position with the number of window hits its coverage received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranked {
    pub position: BetPosition,
    pub hits: u32,
}

/// Rank positions by coverage hits. Ties keep input order, so the ranking is
/// deterministic.
pub fn rank(
    positions: &[BetPosition],
    frequencies: &Frequencies,
    layout: Layout,
    order: HeatOrder,
) -> Result<Vec<Ranked>, GeometryError> {
    let mut ranked = positions
        .iter()
        .map(|position| {
            let coverage = covered_numbers(position, layout)?;
            Ok(Ranked {
                position: *position,
                hits: frequencies.hits_on(coverage.iter()),
            })
        })
        .collect::<Result<Vec<_>, GeometryError>>()?;
    match order {
        HeatOrder::Hottest => ranked.sort_by(|a, b| b.hits.cmp(&a.hits)),
        HeatOrder::Coldest => ranked.sort_by(|a, b| a.hits.cmp(&b.hits)),
    }
    Ok(ranked)
}
