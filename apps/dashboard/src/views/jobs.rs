use std::sync::Arc;

use tracing::{info, warn};

use crate::backend::Backend;
use crate::models::Job;
use crate::stores::{AuthGate, AuthStore};

/// The jobs table on the dashboard root.
pub struct JobsView {
    backend: Arc<dyn Backend>,
    jobs: Vec<Job>,
    is_loading: bool,
    is_refreshing: bool,
}

impl JobsView {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            jobs: Vec::new(),
            is_loading: true,
            is_refreshing: false,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.is_refreshing
    }

    /// Fetches the job list once auth has settled on a user; anyone else
    /// gets an empty table.
    pub async fn load(&mut self, auth: &AuthStore) {
        self.is_loading = true;
        self.jobs = match auth.gate() {
            AuthGate::Authenticated(_) => self.fetch().await,
            AuthGate::Initializing | AuthGate::Anonymous => Vec::new(),
        };
        self.is_loading = false;
    }

    pub fn can_refresh(&self, auth: &AuthStore) -> bool {
        !self.is_refreshing && !auth.is_initializing() && auth.is_authenticated()
    }

    /// Re-issues the fetch. Returns `false` without doing anything if a
    /// refresh is not currently allowed.
    pub async fn refresh(&mut self, auth: &AuthStore) -> bool {
        if !self.can_refresh(auth) {
            return false;
        }
        self.is_refreshing = true;
        self.load(auth).await;
        self.is_refreshing = false;
        true
    }

    async fn fetch(&self) -> Vec<Job> {
        match self.backend.jobs().await {
            Ok(jobs) => {
                info!("Loaded {} jobs", jobs.len());
                jobs
            }
            Err(e) => {
                warn!("Error fetching jobs: {e}");
                Vec::new()
            }
        }
    }
}
