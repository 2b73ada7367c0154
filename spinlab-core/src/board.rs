//! Board geometry — exact coverage and payout of every bet position.
//!
//! Win/loss classification downstream depends on coverage being exact, so a
//! structurally invalid position is rejected with [`GeometryError`] instead of
//! resolving to a partial set.

use std::fmt;

use thiserror::Error;

use crate::domain::{BetPosition, Color, Layout, Pocket};

/// Malformed board position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("pocket {value} does not exist on a {layout:?} wheel")]
    PocketOutOfRange { value: u8, layout: Layout },
    #[error("split {0}/{1} is not two adjacent pockets")]
    NotAdjacent(u8, u8),
    #[error("street must start at 1, 4, ..., 34; got {0}")]
    InvalidStreet(u8),
    #[error("line must start at 1, 7, ..., 31; got {0}")]
    InvalidLine(u8),
    #[error("corner start {0} is in the rightmost column or the last row")]
    InvalidCorner(u8),
    #[error("dozen index must be 1..=3, got {0}")]
    InvalidDozen(u8),
    #[error("column index must be 1..=3, got {0}")]
    InvalidColumn(u8),
}

/// An exact set of pockets, stored as a bitset over the 38 possible pockets.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Coverage(u64);

impl Coverage {
    pub const fn empty() -> Self {
        Self(0)
    }

    fn from_values(values: impl IntoIterator<Item = u8>) -> Self {
        values.into_iter().fold(Self::empty(), |mut c, v| {
            c.0 |= 1u64 << v;
            c
        })
    }

    pub fn insert(&mut self, pocket: Pocket) {
        self.0 |= 1u64 << pocket.value();
    }

    pub fn contains(&self, pocket: Pocket) -> bool {
        1u64.checked_shl(u32::from(pocket.value()))
            .is_some_and(|bit| self.0 & bit != 0)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: Coverage) -> Coverage {
        Coverage(self.0 | other.0)
    }

    /// Pockets in ascending order (00 last).
    pub fn iter(&self) -> impl Iterator<Item = Pocket> {
        let bits = self.0;
        (0..=Pocket::DOUBLE_ZERO.value())
            .filter(move |v| bits & (1u64 << *v) != 0)
            .map(Pocket::from_raw)
    }

    /// Plain numbers for assertions and logs.
    pub fn values(&self) -> Vec<u8> {
        self.iter().map(Pocket::value).collect()
    }
}

impl fmt::Debug for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|p| p.to_string())).finish()
    }
}

impl FromIterator<Pocket> for Coverage {
    fn from_iter<I: IntoIterator<Item = Pocket>>(iter: I) -> Self {
        Self::from_values(iter.into_iter().map(Pocket::value))
    }
}

fn check_pocket(value: u8, layout: Layout) -> Result<(), GeometryError> {
    Pocket::new(value, layout).map(|_| ())
}

fn split_adjacent(a: u8, b: u8, layout: Layout) -> bool {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let dz = Pocket::DOUBLE_ZERO.value();
    match layout {
        Layout::SingleZero if lo == 0 => (1..=3).contains(&hi),
        Layout::DoubleZero if lo == 0 && hi == dz => true,
        Layout::DoubleZero if lo == 0 => (1..=2).contains(&hi),
        Layout::DoubleZero if hi == dz => (2..=3).contains(&lo),
        _ if lo >= 1 && hi <= 36 => (hi == lo + 1 && lo % 3 != 0) || hi == lo + 3,
        _ => false,
    }
}

fn colored(color: Color) -> Coverage {
    Coverage::from_values((1..=36).filter(|n| Pocket::from_raw(*n).color() == color))
}

/// Resolve a bet position to the exact set of pockets it wins on.
pub fn covered_numbers(position: &BetPosition, layout: Layout) -> Result<Coverage, GeometryError> {
    let coverage = match *position {
        BetPosition::Number(p) => {
            check_pocket(p.value(), layout)?;
            Coverage::from_values([p.value()])
        }
        BetPosition::Split([a, b]) => {
            check_pocket(a, layout)?;
            check_pocket(b, layout)?;
            if !split_adjacent(a, b, layout) {
                return Err(GeometryError::NotAdjacent(a, b));
            }
            Coverage::from_values([a, b])
        }
        BetPosition::Street(start) => {
            if !(1..=34).contains(&start) || (start - 1) % 3 != 0 {
                return Err(GeometryError::InvalidStreet(start));
            }
            Coverage::from_values(start..start + 3)
        }
        BetPosition::Line(start) => {
            if !(1..=31).contains(&start) || (start - 1) % 6 != 0 {
                return Err(GeometryError::InvalidLine(start));
            }
            Coverage::from_values(start..start + 6)
        }
        BetPosition::Corner(start) => {
            if !(1..=32).contains(&start) || start % 3 == 0 {
                return Err(GeometryError::InvalidCorner(start));
            }
            Coverage::from_values([start, start + 1, start + 3, start + 4])
        }
        BetPosition::Basket => match layout {
            Layout::SingleZero => Coverage::from_values([0, 1, 2, 3]),
            Layout::DoubleZero => Coverage::from_values([0, Pocket::DOUBLE_ZERO.value(), 1, 2, 3]),
        },
        BetPosition::Dozen(index) => {
            if !(1..=3).contains(&index) {
                return Err(GeometryError::InvalidDozen(index));
            }
            let first = (index - 1) * 12 + 1;
            Coverage::from_values(first..first + 12)
        }
        BetPosition::Column(index) => {
            if !(1..=3).contains(&index) {
                return Err(GeometryError::InvalidColumn(index));
            }
            Coverage::from_values((1..=36).filter(|n| n % 3 == index % 3))
        }
        BetPosition::Red => colored(Color::Red),
        BetPosition::Black => colored(Color::Black),
        BetPosition::Even => Coverage::from_values((1..=36).filter(|n| n % 2 == 0)),
        BetPosition::Odd => Coverage::from_values((1..=36).filter(|n| n % 2 == 1)),
        BetPosition::Low => Coverage::from_values(1..=18),
        BetPosition::High => Coverage::from_values(19..=36),
    };
    Ok(coverage)
}

/// Gross return per unit staked on a winning wager, stake included.
pub fn payout_multiplier(position: &BetPosition, layout: Layout) -> f64 {
    match position {
        BetPosition::Number(_) => 36.0,
        BetPosition::Split(_) => 18.0,
        BetPosition::Street(_) => 12.0,
        BetPosition::Corner(_) => 9.0,
        BetPosition::Line(_) => 6.0,
        BetPosition::Basket => match layout {
            Layout::SingleZero => 9.0,
            Layout::DoubleZero => 7.0,
        },
        BetPosition::Dozen(_) | BetPosition::Column(_) => 3.0,
        BetPosition::Red
        | BetPosition::Black
        | BetPosition::Even
        | BetPosition::Odd
        | BetPosition::Low
        | BetPosition::High => 2.0,
    }
}

/// Every valid corner, by top-left number.
pub fn all_corners() -> Vec<BetPosition> {
    (1..=32u8)
        .filter(|n| n % 3 != 0)
        .map(BetPosition::Corner)
        .collect()
}

pub fn all_streets() -> Vec<BetPosition> {
    (1..=34u8).step_by(3).map(BetPosition::Street).collect()
}

pub fn all_lines() -> Vec<BetPosition> {
    (1..=31u8).step_by(6).map(BetPosition::Line).collect()
}
