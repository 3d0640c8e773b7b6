//! In-memory `Backend` for view and store tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::{endpoints, Backend};
use crate::errors::ClientError;
use crate::models::{
    DriveFolder, DriveFolderPage, Filter, Job, JobStatus, Resume, ResumeListing, ResumeStatus,
    StartJobAck, StartJobRequest, Stats, User,
};

/// Each field is the canned answer for one endpoint; `None` answers with an
/// error. Every call is recorded as `"<METHOD> <path>?<query>"`.
#[derive(Default)]
pub struct FakeBackend {
    pub user: Option<User>,
    pub logout_fails: bool,
    pub jobs: Option<Vec<Job>>,
    pub listing: Option<ResumeListing>,
    /// Number of `resumes` calls answered with `listing` before the rest fail.
    pub listing_fails_after: Option<usize>,
    pub resume: Option<Resume>,
    /// Keyed by page token; `""` is the first page.
    pub folder_pages: HashMap<String, DriveFolderPage>,
    pub start_job_fails: bool,
    pub calls: Mutex<Vec<String>>,
    pub started: Mutex<Vec<StartJobRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in() -> Self {
        Self {
            user: Some(sample_user()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.split_whitespace().nth(1).is_some_and(|p| p.starts_with(path)))
            .collect()
    }

    fn record(&self, method: &str, path: &str, query: &[(&str, String)]) {
        let query: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let call = if query.is_empty() {
            format!("{method} {path}")
        } else {
            format!("{method} {path}?{}", query.join("&"))
        };
        self.calls.lock().unwrap().push(call);
    }
}

fn server_error() -> ClientError {
    ClientError::Api {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn base_url(&self) -> &str {
        "http://backend.test"
    }

    async fn me(&self) -> Result<User, ClientError> {
        self.record("GET", endpoints::ME, &[]);
        self.user.clone().ok_or(ClientError::Unauthorized)
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.record("POST", endpoints::LOGOUT, &[]);
        if self.logout_fails {
            Err(server_error())
        } else {
            Ok(())
        }
    }

    async fn drive_folders(
        &self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<DriveFolderPage, ClientError> {
        let mut query = vec![("page_size", page_size.to_string())];
        if let Some(token) = page_token {
            query.push(("next_page_token", token.to_string()));
        }
        self.record("GET", endpoints::DRIVE_FILES, &query);
        self.folder_pages
            .get(page_token.unwrap_or(""))
            .cloned()
            .ok_or_else(server_error)
    }

    async fn start_job(&self, request: &StartJobRequest) -> Result<StartJobAck, ClientError> {
        self.record("POST", endpoints::START_JOB, &[]);
        self.started.lock().unwrap().push(request.clone());
        if self.start_job_fails {
            Err(server_error())
        } else {
            Ok(StartJobAck {
                message: Some("Job started".to_string()),
            })
        }
    }

    async fn jobs(&self) -> Result<Vec<Job>, ClientError> {
        self.record("GET", endpoints::GET_JOBS, &[]);
        self.jobs.clone().ok_or_else(server_error)
    }

    async fn resumes(&self, job_id: i64, filter: &Filter) -> Result<ResumeListing, ClientError> {
        let mut query = vec![("job_id", job_id.to_string())];
        query.extend(
            filter
                .query_pairs()
                .into_iter()
                .map(|(k, v)| (k, v.to_string())),
        );
        self.record("GET", endpoints::GET_RESUMES, &query);
        let served = self.calls_to(endpoints::GET_RESUMES).len();
        if self.listing_fails_after.is_some_and(|limit| served > limit) {
            return Err(server_error());
        }
        self.listing.clone().ok_or_else(server_error)
    }

    async fn resume(&self, resume_id: i64) -> Result<Resume, ClientError> {
        self.record(
            "GET",
            endpoints::GET_RESUME,
            &[("resume_id", resume_id.to_string())],
        );
        self.resume.clone().ok_or_else(server_error)
    }
}

pub fn sample_user() -> User {
    User {
        id: "u-1".to_string(),
        email: "recruiter@example.com".to_string(),
        picture: Some("https://example.com/me.png".to_string()),
        created_at: Some(Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()),
    }
}

pub fn sample_job(id: i64, name: &str, status: JobStatus) -> Job {
    Job {
        id,
        name: name.to_string(),
        folder_name: "Resumes".to_string(),
        resume_count: 3,
        status,
        created_at: Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap(),
    }
}

pub fn sample_resume(id: i64, file_name: &str, score: Option<f64>) -> Resume {
    Resume {
        id,
        created_at: Utc.with_ymd_and_hms(2024, 10, 2, 8, 0, 0).unwrap(),
        job_id: 7,
        score,
        gpa: Some(3.5),
        num_internships: Some(1),
        status: if score.is_some() {
            ResumeStatus::Scored
        } else {
            ResumeStatus::Pending
        },
        preview_url: None,
        text_url: None,
        view_url: None,
        candidate_name: None,
        google_id: None,
        school_year: Some("Junior".to_string()),
        file_name: Some(file_name.to_string()),
        gpa_contribution: None,
        experience_contribution: None,
        impact_quality_contribution: None,
    }
}

pub fn sample_listing(resumes: Vec<Resume>) -> ResumeListing {
    ResumeListing {
        stats: Stats {
            average_score: 80.0,
            high_score: 92.0,
            lowest_score: 61.0,
            num_resumes: resumes.len() as u64,
        },
        resumes,
        job_name: "Fall 2024 Internship Applicants".to_string(),
        job_date: Some(Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap()),
    }
}

pub fn folder(id: &str, name: &str) -> DriveFolder {
    DriveFolder {
        id: id.to_string(),
        name: name.to_string(),
    }
}
