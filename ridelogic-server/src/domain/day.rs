//! Day-type classification for timetable entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Suffix used for entries seen before any day header on a page.
///
/// Such entries are treated as weekday services.
pub const DEFAULT_DAY_CODE: &str = "w";

/// Which days a block of timetable entries applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    /// Mondays to Fridays.
    Weekday,
    /// Saturdays.
    Saturday,
    /// Sundays and public holidays.
    Sunday,
}

impl DayType {
    /// The short code appended to time entries of this type.
    pub fn code(self) -> &'static str {
        match self {
            DayType::Weekday => "wd",
            DayType::Saturday => "wsa",
            DayType::Sunday => "wsu",
        }
    }

    /// The suffix for an optional day type, falling back to [`DEFAULT_DAY_CODE`].
    pub fn suffix(day: Option<DayType>) -> &'static str {
        day.map_or(DEFAULT_DAY_CODE, DayType::code)
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
