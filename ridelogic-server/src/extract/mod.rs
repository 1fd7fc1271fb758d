//! Timetable extraction: page scanning, the shared place registry,
//! and the concurrent driver that ties them together.

mod config;
mod error;
mod extractor;
mod page;
mod registry;

pub use config::{DayHeader, ExtractConfig};
pub use error::ExtractError;
pub use extractor::{ExtractionOutcome, PageFailure, ScheduleExtractor};
pub use page::{PageScanner, scan_page};
pub use registry::{MergeOutcome, PlaceRegistry};
