//! Stops and their timetable entries.

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

use super::day::DayType;
use super::error::DomainError;

/// Substrings that mark a table cell as a header, a time or a range.
pub const DEFAULT_DISQUALIFIERS: [&str; 3] = [":", "via", "-"];

/// The name of a stop as it appears in a timetable.
///
/// A `PlaceName` is never empty and never contains one of the
/// disqualifying markers it was validated against.
///
/// # Examples
///
/// ```
/// use ridelogic_server::domain::PlaceName;
///
/// let name = PlaceName::parse("  Bellville ").unwrap();
/// assert_eq!(name.as_str(), "Bellville");
///
/// // Times, ranges and "via" notes are rejected
/// assert!(PlaceName::parse("06:30").is_err());
/// assert!(PlaceName::parse("Wynberg - Claremont").is_err());
/// assert!(PlaceName::parse("via Nyanga").is_err());
/// assert!(PlaceName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlaceName(String);

impl PlaceName {
    /// Parse a cell using the default disqualifying markers.
    pub fn parse(cell: &str) -> Result<Self, DomainError> {
        Self::parse_with(cell, &DEFAULT_DISQUALIFIERS)
    }

    /// Parse a cell, rejecting it if it contains any of `disqualifiers`.
    ///
    /// Surrounding whitespace is trimmed before the checks.
    pub fn parse_with<S: AsRef<str>>(cell: &str, disqualifiers: &[S]) -> Result<Self, DomainError> {
        let name = cell.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyPlaceName);
        }

        if let Some(marker) = disqualifiers
            .iter()
            .map(AsRef::as_ref)
            .find(|m| name.contains(*m))
        {
            return Err(DomainError::NotAPlace {
                name: name.to_string(),
                marker: marker.to_string(),
            });
        }

        Ok(PlaceName(name.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw time-of-day token tagged with the day type it was read under.
///
/// The token is kept as written in the timetable; it is not normalised
/// to a clock time. It displays and serializes as the token followed by
/// the day code, e.g. `05:45wsa`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeEntry {
    raw: String,
    day: Option<DayType>,
}

impl TimeEntry {
    /// Create an entry. `day` is `None` when no header has been seen yet.
    pub fn new(raw: impl Into<String>, day: Option<DayType>) -> Self {
        Self {
            raw: raw.into(),
            day,
        }
    }

    /// The token as it appeared in the table.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The day type, if a header had been seen.
    pub fn day(&self) -> Option<DayType> {
        self.day
    }
}

impl fmt::Display for TimeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.raw, DayType::suffix(self.day))
    }
}

impl Serialize for TimeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One stop discovered in a timetable, with the times listed against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceRecord {
    /// Stop name.
    pub name: PlaceName,

    /// Time entries, in the order first seen.
    pub times: Vec<TimeEntry>,

    /// Cell following the time window, usually the next stop.
    pub next: Option<String>,

    /// Most recently discovered stop before this one on the same page.
    pub prev: Option<String>,
}

impl PlaceRecord {
    /// Create a record with no times and no neighbours.
    pub fn new(name: PlaceName) -> Self {
        Self {
            name,
            times: Vec::new(),
            next: None,
            prev: None,
        }
    }

    /// Add the times from `incoming` that this record does not already hold.
    ///
    /// Existing order is kept and new entries are appended in their
    /// incoming order. Returns the number of entries added.
    pub fn union_times(&mut self, incoming: impl IntoIterator<Item = TimeEntry>) -> usize {
        let mut seen: HashSet<TimeEntry> = self.times.iter().cloned().collect();
        let before = self.times.len();

        for entry in incoming {
            if seen.insert(entry.clone()) {
                self.times.push(entry);
            }
        }

        self.times.len() - before
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_entry() -> impl Strategy<Value = TimeEntry> {
        (
            "[0-9]{4}",
            prop::option::of(prop_oneof![
                Just(DayType::Weekday),
                Just(DayType::Saturday),
                Just(DayType::Sunday),
            ]),
        )
            .prop_map(|(raw, day)| TimeEntry::new(raw, day))
    }

    proptest! {
        /// Any cell containing a colon is rejected
        #[test]
        fn colon_never_a_place(prefix in "[A-Za-z ]{0,8}", suffix in "[A-Za-z ]{0,8}") {
            let cell = format!("{prefix}:{suffix}");
            prop_assert!(PlaceName::parse(&cell).is_err());
        }

        /// Accepted names are trimmed and non-empty
        #[test]
        fn accepted_names_are_trimmed(cell in "[ ]{0,3}[A-Za-z][A-Za-z ]{0,12}[ ]{0,3}") {
            if let Ok(name) = PlaceName::parse(&cell) {
                prop_assert!(!name.as_str().is_empty());
                prop_assert_eq!(name.as_str(), name.as_str().trim());
            }
        }

        /// A second union with the same entries adds nothing
        #[test]
        fn union_idempotent(entries in prop::collection::vec(arb_entry(), 0..30)) {
            let mut record = PlaceRecord::new(PlaceName::parse("Bellville").unwrap());
            record.union_times(entries.clone());
            let once = record.times.clone();
            let added = record.union_times(entries);
            prop_assert_eq!(added, 0);
            prop_assert_eq!(record.times, once);
        }
    }
}
