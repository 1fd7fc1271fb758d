//! Line-by-line scanning of a single timetable page.

use std::collections::HashSet;

use crate::domain::{DayType, PlaceName, PlaceRecord, TimeEntry};

use super::config::ExtractConfig;
use super::error::ExtractError;
use super::registry::PlaceRegistry;

/// Scans the lines of one page, carrying the day flag and previous stop.
///
/// State is page-local: a new scanner starts with no day header seen and
/// no previous stop.
#[derive(Debug)]
pub struct PageScanner<'a> {
    config: &'a ExtractConfig,
    day: Option<DayType>,
    prev: Option<String>,
    seen: HashSet<String>,
    discovered: Vec<String>,
}

impl<'a> PageScanner<'a> {
    pub fn new(config: &'a ExtractConfig) -> Self {
        Self {
            config,
            day: None,
            prev: None,
            seen: HashSet::new(),
            discovered: Vec::new(),
        }
    }

    /// The day type currently in force.
    pub fn day(&self) -> Option<DayType> {
        self.day
    }

    /// Names discovered so far, in first-seen order.
    pub fn discovered(&self) -> &[String] {
        &self.discovered
    }

    pub fn into_discovered(self) -> Vec<String> {
        self.discovered
    }

    /// Scan one line and return a record for every stop cell in it.
    ///
    /// A header line updates the day flag and is then scanned like any
    /// other line.
    pub fn scan_line(&mut self, line: &str) -> Vec<PlaceRecord> {
        if let Some(day) = self.config.detect_day(line) {
            self.day = Some(day);
        }

        let cells: Vec<&str> = line.split(self.config.column_delimiter).collect();
        let width = self.config.window_width;
        let mut records = Vec::new();

        for (i, cell) in cells.iter().enumerate() {
            let Ok(name) = PlaceName::parse_with(cell, &self.config.disqualifying_substrings)
            else {
                continue;
            };

            let next_index = i.saturating_add(1).saturating_add(width);
            let window_end = next_index.min(cells.len());
            let mut record = PlaceRecord::new(name.clone());
            record.times = cells[i + 1..window_end]
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(|c| TimeEntry::new(c, self.day))
                .collect();
            record.next = cells
                .get(next_index)
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string);
            record.prev = self.prev.clone();

            if self.seen.insert(name.as_str().to_string()) {
                self.discovered.push(name.as_str().to_string());
                self.prev = Some(name.as_str().to_string());
            }

            records.push(record);
        }

        records
    }
}

/// Scan a whole page into `registry`, returning the stop names found on it.
pub fn scan_page(
    text: &str,
    config: &ExtractConfig,
    registry: &PlaceRegistry,
) -> Result<Vec<String>, ExtractError> {
    let mut scanner = PageScanner::new(config);

    for line in text.lines() {
        for record in scanner.scan_line(line) {
            registry.merge(record)?;
        }
    }

    Ok(scanner.into_discovered())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(record: &PlaceRecord) -> Vec<String> {
        record.times.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn window_takes_exactly_width_times_then_next() {
        let config = ExtractConfig::default();
        let slots: Vec<String> = (0..22).map(|i| format!("{:02}:15", 5 + i / 2)).collect();
        let line = format!("Bellville|{}|Cape Town|23:59", slots.join("|"));

        let mut scanner = PageScanner::new(&config);
        let records = scanner.scan_line(&line);

        let bellville = &records[0];
        assert_eq!(bellville.name.as_str(), "Bellville");
        assert_eq!(bellville.times.len(), 22);
        assert_eq!(bellville.times[0].raw(), "05:15");
        assert_eq!(bellville.times[21].raw(), slots[21]);
        assert_eq!(bellville.next.as_deref(), Some("Cape Town"));
        assert_eq!(bellville.prev, None);
    }

    #[test]
    fn short_row_takes_what_is_there() {
        let config = ExtractConfig::default();
        let mut scanner = PageScanner::new(&config);

        let records = scanner.scan_line("Mowbray|05:00|05:40");
        assert_eq!(records.len(), 1);
        assert_eq!(times(&records[0]), vec!["05:00w", "05:40w"]);
        assert_eq!(records[0].next, None);
    }

    #[test]
    fn configurable_window_width() {
        let config = ExtractConfig::default().with_window_width(2);
        let mut scanner = PageScanner::new(&config);

        let records = scanner.scan_line("Athlone|06:00|06:30|Rondebosch|07:00");
        let athlone = &records[0];
        assert_eq!(times(athlone), vec!["06:00w", "06:30w"]);
        assert_eq!(athlone.next.as_deref(), Some("Rondebosch"));

        let rondebosch = &records[1];
        assert_eq!(times(rondebosch), vec!["07:00w"]);
        assert_eq!(rondebosch.prev.as_deref(), Some("Athlone"));
    }

    #[test]
    fn oversized_window_takes_rest_of_row() {
        let config = ExtractConfig::default().with_window_width(usize::MAX);
        let registry = PlaceRegistry::new();

        let names = scan_page("Bellville|05:00|06:00", &config, &registry).unwrap();
        assert_eq!(names, vec!["Bellville"]);

        let record = registry.get("Bellville").unwrap().unwrap();
        assert_eq!(record.times.len(), 2);
        assert_eq!(record.next, None);
    }

    #[test]
    fn blank_cells_are_skipped() {
        let config = ExtractConfig::default();
        let mut scanner = PageScanner::new(&config);

        let records = scanner.scan_line("Wynberg| 05:00 | |06:00|");
        assert_eq!(times(&records[0]), vec!["05:00w", "06:00w"]);
    }

    #[test]
    fn non_place_cells_ignored() {
        let config = ExtractConfig::default();
        let mut scanner = PageScanner::new(&config);

        let records = scanner.scan_line("05:00|via Nyanga|Langa - Bonteheuwel");
        assert!(records.is_empty());
        assert!(scanner.discovered().is_empty());
    }

    #[test]
    fn day_flag_persists_across_lines() {
        let config = ExtractConfig::default();
        let mut scanner = PageScanner::new(&config);

        let before = scanner.scan_line("Bellville|05:00");
        assert_eq!(times(&before[0]), vec!["05:00w"]);

        scanner.scan_line("- MONDAYS TO FRIDAYS -");
        assert_eq!(scanner.day(), Some(DayType::Weekday));
        let weekday = scanner.scan_line("Bellville|06:00");
        assert_eq!(times(&weekday[0]), vec!["06:00wd"]);

        scanner.scan_line("- SATURDAYS -");
        let first = scanner.scan_line("Bellville|07:00");
        let second = scanner.scan_line("Mowbray|07:30");
        assert_eq!(times(&first[0]), vec!["07:00wsa"]);
        assert_eq!(times(&second[0]), vec!["07:30wsa"]);

        scanner.scan_line("- SUNDAYS -");
        let sunday = scanner.scan_line("Mowbray|08:00");
        assert_eq!(times(&sunday[0]), vec!["08:00wsu"]);
    }

    #[test]
    fn header_line_is_still_scanned() {
        let config = ExtractConfig::default();
        let mut scanner = PageScanner::new(&config);

        let records = scanner.scan_line("Sunday|Bellville|09:00");
        let bellville = records
            .iter()
            .find(|r| r.name.as_str() == "Bellville")
            .unwrap();
        assert_eq!(times(bellville), vec!["09:00wsu"]);
    }

    #[test]
    fn legend_line_does_not_switch_day() {
        let config = ExtractConfig::default();
        let mut scanner = PageScanner::new(&config);

        scanner.scan_line("- SATURDAYS -");
        scanner.scan_line("a  - Mondays,Tuesdays,Wednesdays,Thursdays");
        assert_eq!(scanner.day(), Some(DayType::Saturday));
    }

    #[test]
    fn prev_tracks_last_new_name() {
        let config = ExtractConfig::default().with_window_width(1);
        let mut scanner = PageScanner::new(&config);

        scanner.scan_line("Bellville|05:00");
        scanner.scan_line("Parow|05:10");
        let again = scanner.scan_line("Bellville|06:00");
        let goodwood = scanner.scan_line("Goodwood|05:20");

        assert_eq!(again[0].prev.as_deref(), Some("Parow"));
        assert_eq!(goodwood[0].prev.as_deref(), Some("Parow"));
        assert_eq!(scanner.discovered(), ["Bellville", "Parow", "Goodwood"]);
    }

    #[test]
    fn scan_page_merges_into_registry() {
        let config = ExtractConfig::default();
        let registry = PlaceRegistry::new();
        let page = "- MONDAYS TO FRIDAYS -\n\
                    Bellville|05:00|06:00\n\
                    - SATURDAYS -\n\
                    Bellville|07:00\n\
                    Mowbray|08:00\n\
                    - SUNDAYS -\n\
                    Mowbray|09:00\n";

        let names = scan_page(page, &config, &registry).unwrap();
        assert_eq!(names, vec!["Bellville", "Mowbray"]);

        let bellville = registry.get("Bellville").unwrap().unwrap();
        assert_eq!(times(&bellville), vec!["05:00wd", "06:00wd", "07:00wsa"]);
        let mowbray = registry.get("Mowbray").unwrap().unwrap();
        assert_eq!(times(&mowbray), vec!["08:00wsa", "09:00wsu"]);
        assert_eq!(mowbray.prev.as_deref(), Some("Bellville"));
    }

    #[test]
    fn empty_page() {
        let config = ExtractConfig::default();
        let registry = PlaceRegistry::new();

        assert!(scan_page("", &config, &registry).unwrap().is_empty());
        assert!(registry.is_empty().unwrap());
    }
}
