//! Domain types for the transit backend.
//!
//! These types represent validated timetable and query data. Types
//! enforce their invariants at construction time, so code that receives
//! them can trust their validity.

mod day;
mod error;
mod place;
mod route;

pub use day::{DEFAULT_DAY_CODE, DayType};
pub use error::DomainError;
pub use place::{DEFAULT_DISQUALIFIERS, PlaceName, PlaceRecord, TimeEntry};
pub use route::{RouteCandidate, ScoredRoute, UNSPECIFIED_TIME};
