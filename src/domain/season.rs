use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Climate season of the campus, derived purely from the calendar month.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Season {
    /// December to February
    Winter,
    /// March to May
    Summer,
    /// June to September
    Monsoon,
    /// October and November
    Autumn,
}

impl Season {
    /// Map a calendar month (1-12) to its season.
    ///
    /// Any value outside the Winter, Summer and Monsoon months falls through
    /// to Autumn, so the mapping is total.
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Summer,
            6..=9 => Season::Monsoon,
            _ => Season::Autumn,
        }
    }
}
