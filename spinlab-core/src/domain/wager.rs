use serde::{Deserialize, Serialize};
use std::fmt;

use super::pocket::Pocket;

/// Inside bets use the table `min`; outside bets use `minOutside`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetCategory {
    Inside,
    Outside,
}

/// An abstract board position. The geometry resolver turns it into the exact
/// set of winning pockets.
///
/// Serialized adjacently tagged, e.g. `{"type": "street", "value": 4}` or
/// `{"type": "red"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BetPosition {
    /// Straight-up on one pocket (0 and 00 included).
    Number(Pocket),
    /// Two adjacent numbers.
    Split([u8; 2]),
    /// Row of three, identified by its first number.
    Street(u8),
    /// Double street (six-line), identified by its first number.
    Line(u8),
    /// Block of four, identified by its top-left number.
    Corner(u8),
    /// 0-1-2-3 (or 0-00-1-2-3 on a double-zero wheel).
    Basket,
    Dozen(u8),
    Column(u8),
    Red,
    Black,
    Even,
    Odd,
    Low,
    High,
}

impl BetPosition {
    pub fn category(&self) -> BetCategory {
        match self {
            Self::Number(_)
            | Self::Split(_)
            | Self::Street(_)
            | Self::Line(_)
            | Self::Corner(_)
            | Self::Basket => BetCategory::Inside,
            _ => BetCategory::Outside,
        }
    }

    /// Short kind name used in logs and structural hashes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Split(_) => "split",
            Self::Street(_) => "street",
            Self::Line(_) => "line",
            Self::Corner(_) => "corner",
            Self::Basket => "basket",
            Self::Dozen(_) => "dozen",
            Self::Column(_) => "column",
            Self::Red => "red",
            Self::Black => "black",
            Self::Even => "even",
            Self::Odd => "odd",
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

impl fmt::Display for BetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(p) => write!(f, "number {p}"),
            Self::Split([a, b]) => write!(f, "split {a}/{b}"),
            Self::Street(s) | Self::Line(s) | Self::Corner(s) | Self::Dozen(s) | Self::Column(s) => {
                write!(f, "{} {s}", self.kind())
            }
            _ => write!(f, "{}", self.kind()),
        }
    }
}

/// A single wager request: where and how much.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wager {
    pub position: BetPosition,
    pub amount: f64,
}

impl Wager {
    pub fn new(position: BetPosition, amount: f64) -> Self {
        Self { position, amount }
    }
}

/// Total amount staked across a wager set.
pub fn total_stake(wagers: &[Wager]) -> f64 {
    wagers.iter().map(|w| w.amount).sum()
}
