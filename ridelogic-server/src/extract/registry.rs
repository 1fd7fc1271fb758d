//! Shared place registry written to by concurrent page workers.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

use crate::domain::PlaceRecord;

use super::error::ExtractError;

/// What a merge did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The place was new and the record was stored as-is.
    Inserted,
    /// The place existed; `added` new time entries were appended.
    Merged { added: usize },
}

/// Map from place name to its accumulated record.
///
/// Every merge holds the lock for the whole read-modify-write, so
/// concurrent workers never lose each other's time entries. When a
/// place is already present only its times are unioned; the `next` and
/// `prev` of whichever worker inserted it first are kept.
#[derive(Debug, Default)]
pub struct PlaceRegistry {
    places: Mutex<HashMap<String, PlaceRecord>>,
}

impl PlaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record`, or union its times into the existing entry.
    pub fn merge(&self, record: PlaceRecord) -> Result<MergeOutcome, ExtractError> {
        let mut places = self
            .places
            .lock()
            .map_err(|_| ExtractError::RegistryPoisoned)?;

        match places.entry(record.name.as_str().to_string()) {
            Entry::Occupied(mut existing) => {
                let added = existing.get_mut().union_times(record.times);
                Ok(MergeOutcome::Merged { added })
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(MergeOutcome::Inserted)
            }
        }
    }

    /// A copy of the record for `name`.
    pub fn get(&self, name: &str) -> Result<Option<PlaceRecord>, ExtractError> {
        let places = self
            .places
            .lock()
            .map_err(|_| ExtractError::RegistryPoisoned)?;
        Ok(places.get(name).cloned())
    }

    /// Number of distinct places.
    pub fn len(&self) -> Result<usize, ExtractError> {
        let places = self
            .places
            .lock()
            .map_err(|_| ExtractError::RegistryPoisoned)?;
        Ok(places.len())
    }

    pub fn is_empty(&self) -> Result<bool, ExtractError> {
        Ok(self.len()? == 0)
    }

    /// All records, sorted by place name.
    pub fn snapshot(&self) -> Result<Vec<PlaceRecord>, ExtractError> {
        let places = self
            .places
            .lock()
            .map_err(|_| ExtractError::RegistryPoisoned)?;
        let mut records: Vec<PlaceRecord> = places.values().cloned().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayType, PlaceName, TimeEntry};

    fn record(name: &str, times: &[&str]) -> PlaceRecord {
        let mut record = PlaceRecord::new(PlaceName::parse(name).unwrap());
        record.times = times
            .iter()
            .map(|t| TimeEntry::new(*t, Some(DayType::Weekday)))
            .collect();
        record
    }

    fn raw_times(record: &PlaceRecord) -> Vec<String> {
        record.times.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn insert_then_merge() {
        let registry = PlaceRegistry::new();

        assert_eq!(
            registry.merge(record("Bellville", &["05:00", "06:00"])).unwrap(),
            MergeOutcome::Inserted
        );
        assert_eq!(
            registry.merge(record("Bellville", &["06:00", "07:00"])).unwrap(),
            MergeOutcome::Merged { added: 1 }
        );

        let stored = registry.get("Bellville").unwrap().unwrap();
        assert_eq!(raw_times(&stored), vec!["05:00wd", "06:00wd", "07:00wd"]);
        assert_eq!(registry.len().unwrap(), 1);
    }

    #[test]
    fn merge_is_idempotent() {
        let registry = PlaceRegistry::new();
        let r = record("Mowbray", &["05:00", "05:30"]);

        registry.merge(r.clone()).unwrap();
        let once = registry.snapshot().unwrap();
        assert_eq!(
            registry.merge(r).unwrap(),
            MergeOutcome::Merged { added: 0 }
        );
        assert_eq!(registry.snapshot().unwrap(), once);
    }

    #[test]
    fn first_writer_keeps_neighbours() {
        let registry = PlaceRegistry::new();

        let mut first = record("Wynberg", &["05:00"]);
        first.next = Some("Claremont".to_string());
        let mut second = record("Wynberg", &["06:00"]);
        second.next = Some("Retreat".to_string());
        second.prev = Some("Plumstead".to_string());

        registry.merge(first).unwrap();
        registry.merge(second).unwrap();

        let stored = registry.get("Wynberg").unwrap().unwrap();
        assert_eq!(stored.next.as_deref(), Some("Claremont"));
        assert_eq!(stored.prev, None);
        assert_eq!(stored.times.len(), 2);
    }

    #[test]
    fn snapshot_sorted_by_name() {
        let registry = PlaceRegistry::new();
        registry.merge(record("Wynberg", &[])).unwrap();
        registry.merge(record("Athlone", &[])).unwrap();
        registry.merge(record("Mowbray", &[])).unwrap();

        let names: Vec<String> = registry
            .snapshot()
            .unwrap()
            .into_iter()
            .map(|r| r.name.to_string())
            .collect();
        assert_eq!(names, vec!["Athlone", "Mowbray", "Wynberg"]);
    }

    #[test]
    fn empty_registry() {
        let registry = PlaceRegistry::new();
        assert!(registry.is_empty().unwrap());
        assert_eq!(registry.get("Bellville").unwrap(), None);
        assert!(registry.snapshot().unwrap().is_empty());
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let registry = PlaceRegistry::new();

        let _ = std::thread::scope(|s| {
            s.spawn(|| {
                let _guard = registry.places.lock().unwrap();
                panic!("worker died holding the lock");
            })
            .join()
        });

        assert!(matches!(
            registry.merge(record("Bellville", &[])),
            Err(ExtractError::RegistryPoisoned)
        ));
        assert!(matches!(
            registry.snapshot(),
            Err(ExtractError::RegistryPoisoned)
        ));
    }
}
