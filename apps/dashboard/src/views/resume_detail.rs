use std::sync::Arc;

use tracing::warn;

use super::Landing;
use crate::backend::Backend;
use crate::models::Resume;
use crate::route::Route;
use crate::scoring::{ContributionBar, Recommendation};
use crate::stores::AuthStore;

/// Score breakdown for a single resume.
pub struct ResumeDetailView {
    job_id: i64,
    resume_id: i64,
    backend: Arc<dyn Backend>,
    resume: Option<Resume>,
    is_loading: bool,
}

impl ResumeDetailView {
    pub fn new(job_id: i64, resume_id: i64, backend: Arc<dyn Backend>) -> Self {
        Self {
            job_id,
            resume_id,
            backend,
            resume: None,
            is_loading: true,
        }
    }

    pub fn job_id(&self) -> i64 {
        self.job_id
    }

    pub fn resume(&self) -> Option<&Resume> {
        self.resume.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub async fn mount(&mut self, auth: &mut AuthStore) -> Landing {
        self.is_loading = true;
        if !auth.fetch_user().await {
            self.is_loading = false;
            return Landing::Redirect(Route::Root);
        }
        self.resume = match self.backend.resume(self.resume_id).await {
            Ok(resume) => Some(resume),
            Err(e) => {
                warn!("Error fetching resume {}: {e}", self.resume_id);
                None
            }
        };
        self.is_loading = false;
        Landing::Render
    }

    /// `None` until a resume is loaded; an unscored resume reads as 0.
    pub fn recommendation(&self) -> Option<Recommendation> {
        self.resume
            .as_ref()
            .map(|r| Recommendation::for_score(r.score.unwrap_or(0.0)))
    }

    pub fn breakdown(&self) -> [ContributionBar; 3] {
        let resume = self.resume.as_ref();
        [
            ContributionBar::gpa(resume.and_then(|r| r.gpa_contribution)),
            ContributionBar::experience(resume.and_then(|r| r.experience_contribution)),
            ContributionBar::impact_quality(resume.and_then(|r| r.impact_quality_contribution)),
        ]
    }
}
