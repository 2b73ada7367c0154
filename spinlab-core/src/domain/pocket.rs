use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::GeometryError;

/// Red numbers on a standard wheel.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Wheel variant. Declared by the table, never inferred from spins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    #[default]
    SingleZero,
    DoubleZero,
}

impl Layout {
    /// Number of pockets on the wheel (37 or 38).
    pub fn pocket_count(self) -> usize {
        match self {
            Self::SingleZero => 37,
            Self::DoubleZero => 38,
        }
    }

    /// Every pocket on this wheel, 0 first and 00 last.
    pub fn pockets(self) -> impl Iterator<Item = Pocket> {
        (0..self.pocket_count() as u8).map(Pocket)
    }
}

/// Pocket color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
    Green,
}

/// A winning pocket: 0–36, or `00` stored as [`Pocket::DOUBLE_ZERO`].
///
/// Deserializes from a bare integer and rejects anything above 37; the
/// layout check happens when a session admits the spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Pocket(u8);

impl Pocket {
    pub const ZERO: Pocket = Pocket(0);
    pub const DOUBLE_ZERO: Pocket = Pocket(37);

    /// Validate a raw pocket value against the table layout.
    pub fn new(value: u8, layout: Layout) -> Result<Self, GeometryError> {
        if (value as usize) < layout.pocket_count() {
            Ok(Self(value))
        } else {
            Err(GeometryError::PocketOutOfRange { value, layout })
        }
    }

    /// A numbered pocket 1–36.
    pub fn number(value: u8) -> Result<Self, GeometryError> {
        if (1..=36).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GeometryError::PocketOutOfRange {
                value,
                layout: Layout::SingleZero,
            })
        }
    }

    pub(crate) const fn from_raw(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0 || self.0 == Self::DOUBLE_ZERO.0
    }

    pub fn color(self) -> Color {
        if self.is_zero() {
            Color::Green
        } else if RED_NUMBERS.contains(&self.0) {
            Color::Red
        } else {
            Color::Black
        }
    }

    /// Dozen index 1..=3, `None` for the zeros.
    pub fn dozen(self) -> Option<u8> {
        (!self.is_zero()).then(|| (self.0 - 1) / 12 + 1)
    }

    /// Column index 1..=3, `None` for the zeros.
    pub fn column(self) -> Option<u8> {
        (!self.is_zero()).then(|| (self.0 - 1) % 3 + 1)
    }
}

impl TryFrom<u8> for Pocket {
    type Error = GeometryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value, Layout::DoubleZero)
    }
}

impl From<Pocket> for u8 {
    fn from(pocket: Pocket) -> u8 {
        pocket.0
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::DOUBLE_ZERO {
            write!(f, "00")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// One resolved spin. Appended once by the runner, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub pocket: Pocket,
}

impl SpinRecord {
    pub fn new(pocket: Pocket) -> Self {
        Self { pocket }
    }

    pub fn color(&self) -> Color {
        self.pocket.color()
    }

    pub fn dozen(&self) -> Option<u8> {
        self.pocket.dozen()
    }

    pub fn column(&self) -> Option<u8> {
        self.pocket.column()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_zero_only_on_american_layout() {
        assert!(Pocket::new(37, Layout::SingleZero).is_err());
        assert_eq!(Pocket::new(37, Layout::DoubleZero).unwrap(), Pocket::DOUBLE_ZERO);
        assert!(Pocket::new(38, Layout::DoubleZero).is_err());
    }

    #[test]
    fn colors() {
        assert_eq!(Pocket::number(1).unwrap().color(), Color::Red);
        assert_eq!(Pocket::number(2).unwrap().color(), Color::Black);
        assert_eq!(Pocket::ZERO.color(), Color::Green);
        assert_eq!(Pocket::DOUBLE_ZERO.color(), Color::Green);
    }

    #[test]
    fn dozen_and_column() {
        let p = Pocket::number(14).unwrap();
        assert_eq!(p.dozen(), Some(2));
        assert_eq!(p.column(), Some(2));
        let p = Pocket::number(36).unwrap();
        assert_eq!(p.dozen(), Some(3));
        assert_eq!(p.column(), Some(3));
        assert_eq!(Pocket::ZERO.dozen(), None);
        assert_eq!(Pocket::DOUBLE_ZERO.column(), None);
    }

    #[test]
    fn display_double_zero() {
        assert_eq!(Pocket::DOUBLE_ZERO.to_string(), "00");
        assert_eq!(Pocket::number(7).unwrap().to_string(), "7");
    }

    #[test]
    fn deserialization_rejects_unknown_pockets() {
        let spin: SpinRecord = serde_json::from_str(r#"{"pocket":37}"#).unwrap();
        assert_eq!(spin.pocket, Pocket::DOUBLE_ZERO);
        assert!(serde_json::from_str::<SpinRecord>(r#"{"pocket":38}"#).is_err());
        assert!(serde_json::from_str::<SpinRecord>(r#"{"pocket":200}"#).is_err());
        assert_eq!(serde_json::to_string(&Pocket::number(17).unwrap()).unwrap(), "17");
    }

    #[test]
    fn layout_pockets() {
        assert_eq!(Layout::SingleZero.pockets().count(), 37);
        assert_eq!(Layout::DoubleZero.pockets().last(), Some(Pocket::DOUBLE_ZERO));
    }
}
