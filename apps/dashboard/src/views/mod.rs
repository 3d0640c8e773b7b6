//! Page state machines. Each view owns its loading flags and the data it
//! fetched; rendering lives in `crate::render`.

pub mod job_detail;
pub mod jobs;
pub mod new_job;
pub mod resume_detail;

pub use job_detail::{search_resumes, JobDetailView};
pub use jobs::JobsView;
pub use new_job::{NewJobWizard, WizardStep, UNTITLED_JOB};
pub use resume_detail::ResumeDetailView;

use crate::route::Route;

/// Result of mounting an auth-gated page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Render,
    Redirect(Route),
}
