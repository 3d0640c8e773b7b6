use std::fmt;

/// Where the dashboard should go next. Views return one instead of
/// navigating themselves; the front-end decides what "going there" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    NewJob,
    Job(i64),
    Resume { job_id: i64, resume_id: i64 },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::NewJob => "/jobs/new".to_string(),
            Route::Job(id) => format!("/jobs/{id}"),
            Route::Resume { job_id, resume_id } => format!("/jobs/{job_id}/resumes/{resume_id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
