use std::io;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{Filter, FilterField};
use crate::storage::KeyValueStore;

/// Storage key of a job's filters.
pub fn filter_key(job_id: i64) -> String {
    format!("resumeFilters_{job_id}")
}

/// Stored filters for a job; all-off when absent or unreadable.
pub fn load_filters(storage: &dyn KeyValueStore, job_id: i64) -> Filter {
    let Some(raw) = storage.get(&filter_key(job_id)) else {
        return Filter::default();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!("Ignoring unreadable filters for job {job_id}: {e}");
        Filter::default()
    })
}

pub fn save_filters(storage: &dyn KeyValueStore, job_id: i64, filter: &Filter) -> io::Result<()> {
    let json = serde_json::to_string(filter).map_err(io::Error::from)?;
    storage.set(&filter_key(job_id), &json)
}

/// One job's filter flags, read from storage once and written back on every
/// change. No cross-process sync: the last writer wins.
pub struct FilterStore {
    job_id: i64,
    storage: Arc<dyn KeyValueStore>,
    filter: Filter,
}

impl FilterStore {
    pub fn open(job_id: i64, storage: Arc<dyn KeyValueStore>) -> Self {
        let filter = load_filters(storage.as_ref(), job_id);
        debug!("Loaded filters for job {job_id}: {filter:?}");
        Self {
            job_id,
            storage,
            filter,
        }
    }

    pub fn job_id(&self) -> i64 {
        self.job_id
    }

    pub fn get(&self) -> Filter {
        self.filter
    }

    /// Replaces the flags. The in-memory value changes even if the write
    /// fails, so the page keeps working on a read-only data directory.
    pub fn set(&mut self, filter: Filter) -> io::Result<()> {
        self.filter = filter;
        save_filters(self.storage.as_ref(), self.job_id, &filter)
    }

    pub fn toggle(&mut self, field: FilterField) -> io::Result<()> {
        self.set(self.filter.toggled(field))
    }

    pub fn clear(&mut self) -> io::Result<()> {
        self.set(Filter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    fn every_filter() -> impl Iterator<Item = Filter> {
        (0u8..64).map(|bits| {
            FilterField::ALL
                .into_iter()
                .enumerate()
                .fold(Filter::default(), |f, (i, field)| {
                    f.with(field, bits & (1 << i) != 0)
                })
        })
    }

    #[test]
    fn test_round_trip_every_combination() {
        let storage = MemoryStorage::new();
        for filter in every_filter() {
            save_filters(&storage, 7, &filter).unwrap();
            assert_eq!(load_filters(&storage, 7), filter);
        }
    }

    #[test]
    fn test_absent_value_is_default() {
        let storage = MemoryStorage::new();
        assert_eq!(load_filters(&storage, 7), Filter::default());
    }

    #[test]
    fn test_corrupt_value_is_default() {
        let storage = MemoryStorage::new();
        storage.set(&filter_key(7), "{not json").unwrap();
        assert_eq!(load_filters(&storage, 7), Filter::default());
        storage.set(&filter_key(7), "42").unwrap();
        assert_eq!(load_filters(&storage, 7), Filter::default());
    }

    #[test]
    fn test_partial_value_fills_missing_flags() {
        let storage = MemoryStorage::new();
        storage.set(&filter_key(7), r#"{"senior": true}"#).unwrap();
        let filter = load_filters(&storage, 7);
        assert!(filter.senior);
        assert_eq!(filter.active_count(), 1);
    }

    #[test]
    fn test_filters_are_namespaced_by_job() {
        let storage = Arc::new(MemoryStorage::new());
        let mut seven = FilterStore::open(7, storage.clone());
        seven.toggle(FilterField::Junior).unwrap();

        let eight = FilterStore::open(8, storage.clone());
        assert!(eight.get().is_empty());
        assert!(FilterStore::open(7, storage).get().junior);
    }

    #[test]
    fn test_store_persists_every_change_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStorage::new(dir.path()));

        let mut store = FilterStore::open(3, storage.clone());
        store.toggle(FilterField::Passed).unwrap();
        store.toggle(FilterField::Freshman).unwrap();
        assert_eq!(load_filters(storage.as_ref(), 3).active_count(), 2);

        store.clear().unwrap();
        assert!(load_filters(storage.as_ref(), 3).is_empty());
        assert!(dir.path().join("resumeFilters_3.json").exists());
    }
}
