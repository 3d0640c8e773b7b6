use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::Landing;
use crate::backend::Backend;
use crate::models::{Filter, FilterField, Resume, Stats};
use crate::route::Route;
use crate::storage::KeyValueStore;
use crate::stores::{AuthStore, FilterStore};

/// Resumes whose file name contains `query`, ignoring case. A resume with no
/// file name only matches the empty query.
pub fn search_resumes<'a>(resumes: &'a [Resume], query: &str) -> Vec<&'a Resume> {
    let needle = query.to_lowercase();
    resumes
        .iter()
        .filter(|r| r.file_name_or_empty().to_lowercase().contains(&needle))
        .collect()
}

/// One job's resume table, statistics and filters.
///
/// Two filters apply: the persisted flags are sent to the backend on
/// `apply_filter`, and the search string narrows the loaded list locally.
pub struct JobDetailView {
    job_id: i64,
    backend: Arc<dyn Backend>,
    filters: FilterStore,
    resumes: Vec<Resume>,
    stats: Stats,
    job_name: String,
    job_date: Option<DateTime<Utc>>,
    search: String,
    is_loading: bool,
    is_refreshing: bool,
    is_filtering: bool,
}

impl JobDetailView {
    pub fn new(job_id: i64, backend: Arc<dyn Backend>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            job_id,
            backend,
            filters: FilterStore::open(job_id, storage),
            resumes: Vec::new(),
            stats: Stats::default(),
            job_name: String::new(),
            job_date: None,
            search: String::new(),
            is_loading: true,
            is_refreshing: false,
            is_filtering: false,
        }
    }

    pub fn job_id(&self) -> i64 {
        self.job_id
    }

    pub fn resumes(&self) -> &[Resume] {
        &self.resumes
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn job_date(&self) -> Option<DateTime<Utc>> {
        self.job_date
    }

    pub fn filter(&self) -> Filter {
        self.filters.get()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.is_refreshing
    }

    pub fn is_filtering(&self) -> bool {
        self.is_filtering
    }

    /// Resolves auth, then loads resumes with the persisted filters applied.
    pub async fn mount(&mut self, auth: &mut AuthStore) -> Landing {
        if !auth.fetch_user().await {
            self.is_loading = false;
            return Landing::Redirect(Route::Root);
        }
        let filter = self.filters.get();
        self.fetch_resumes(filter).await;
        Landing::Render
    }

    /// Clears every filter (persisting the reset) and reloads unfiltered.
    pub async fn refresh(&mut self) {
        self.is_refreshing = true;
        if let Err(e) = self.filters.clear() {
            warn!("Failed to persist cleared filters for job {}: {e}", self.job_id);
        }
        self.fetch_resumes(Filter::default()).await;
        self.is_refreshing = false;
    }

    /// Reloads with the current flags, leaving them as they are.
    pub async fn apply_filter(&mut self) {
        let filter = self.filters.get();
        self.fetch_resumes(filter).await;
    }

    pub fn toggle_filter(&mut self, field: FilterField) {
        if let Err(e) = self.filters.toggle(field) {
            warn!("Failed to persist filters for job {}: {e}", self.job_id);
        }
    }

    pub fn clear_filters(&mut self) {
        if let Err(e) = self.filters.clear() {
            warn!("Failed to persist filters for job {}: {e}", self.job_id);
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// The loaded resumes narrowed by the search string.
    pub fn visible_resumes(&self) -> Vec<&Resume> {
        search_resumes(&self.resumes, &self.search)
    }

    async fn fetch_resumes(&mut self, filter: Filter) {
        self.is_filtering = !filter.is_empty();
        match self.backend.resumes(self.job_id, &filter).await {
            Ok(listing) => {
                info!(
                    "Loaded {} resumes for job {}",
                    listing.resumes.len(),
                    self.job_id
                );
                self.resumes = listing.resumes;
                self.stats = listing.stats;
                self.job_name = listing.job_name;
                self.job_date = listing.job_date;
            }
            Err(e) => {
                warn!("Error fetching resumes for job {}: {e}", self.job_id);
                self.resumes.clear();
            }
        }
        self.is_loading = false;
        self.is_filtering = false;
    }
}
