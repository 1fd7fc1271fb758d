//! Timetable layout configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_DISQUALIFIERS, DayType};

use super::error::ExtractError;

/// A line fragment that switches the day type for following entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHeader {
    /// Text searched for, case-insensitively, anywhere in a line.
    pub text: String,
    /// Day type that applies after the header.
    pub day: DayType,
}

impl DayHeader {
    pub fn new(text: impl Into<String>, day: DayType) -> Self {
        Self {
            text: text.into(),
            day,
        }
    }
}

/// Describes how timetable page text is laid out.
///
/// The defaults match Golden Arrow timetables: pipe-separated columns,
/// 22 departure slots per stop row, and three day-type headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Number of time columns following a stop name.
    /// The column after them is read as the next stop.
    pub window_width: usize,

    /// Column separator in page text.
    pub column_delimiter: char,

    /// Day headers, tested in order; the first hit wins.
    pub day_headers: Vec<DayHeader>,

    /// Lines that never count as headers, compared case-insensitively.
    /// Footnote legends mention day names without starting a new block.
    pub ignored_header_lines: Vec<String>,

    /// Cells containing any of these are not stop names.
    pub disqualifying_substrings: Vec<String>,

    /// Maximum number of pages processed at once.
    pub max_workers: usize,
}

impl ExtractConfig {
    /// Create a configuration with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of time columns per stop.
    pub fn with_window_width(mut self, width: usize) -> Self {
        self.window_width = width;
        self
    }

    /// Set the maximum number of concurrently processed pages.
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers;
        self
    }

    /// Replace the day headers.
    pub fn with_day_headers(mut self, headers: Vec<DayHeader>) -> Self {
        self.day_headers = headers;
        self
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ExtractError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: ExtractConfig =
            serde_json::from_str(&contents).map_err(|e| ExtractError::ConfigFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration can drive an extraction.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.window_width == 0 {
            return Err(ExtractError::InvalidConfig("window_width must be positive"));
        }
        if self.max_workers == 0 {
            return Err(ExtractError::InvalidConfig("max_workers must be positive"));
        }
        Ok(())
    }

    /// The day type announced by `line`, if it is a header.
    pub fn detect_day(&self, line: &str) -> Option<DayType> {
        let lower = line.to_lowercase();

        if self
            .ignored_header_lines
            .iter()
            .any(|ignored| ignored.to_lowercase() == lower.trim())
        {
            return None;
        }

        self.day_headers
            .iter()
            .find(|header| lower.contains(&header.text.to_lowercase()))
            .map(|header| header.day)
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            window_width: 22,
            column_delimiter: '|',
            day_headers: vec![
                DayHeader::new("MONDAYS TO FRIDAYS", DayType::Weekday),
                DayHeader::new("Saturday", DayType::Saturday),
                DayHeader::new("Sunday", DayType::Sunday),
            ],
            ignored_header_lines: vec!["a  - Mondays,Tuesdays,Wednesdays,Thursdays".to_string()],
            disqualifying_substrings: DEFAULT_DISQUALIFIERS.iter().map(|s| s.to_string()).collect(),
            max_workers: 8,
        }
    }
}
