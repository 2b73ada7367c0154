//! Domain types for spinlab

pub mod pocket;
pub mod table;
pub mod wager;

pub use pocket::{Color, Layout, Pocket, SpinRecord, RED_NUMBERS};
pub use table::{BetLimits, ConfigError, IncrementMode, TableConfig};
pub use wager::{total_stake, BetCategory, BetPosition, Wager};
