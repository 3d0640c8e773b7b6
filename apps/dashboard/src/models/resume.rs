use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scored (or still scoring) resume. The three contribution fields are only
/// populated by `GET /api/query/get-resume`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: i64,
    #[serde(deserialize_with = "super::lenient_timestamp")]
    pub created_at: DateTime<Utc>,
    pub job_id: i64,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub num_internships: Option<u32>,
    pub status: ResumeStatus,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub text_url: Option<String>,
    #[serde(default)]
    pub view_url: Option<String>,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub google_id: Option<String>,
    #[serde(default)]
    pub school_year: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub gpa_contribution: Option<f64>,
    #[serde(default)]
    pub experience_contribution: Option<f64>,
    #[serde(default)]
    pub impact_quality_contribution: Option<f64>,
}

impl Resume {
    pub fn file_name_or_empty(&self) -> &str {
        self.file_name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeStatus {
    Scored,
    Pending,
    Failed,
}

impl ResumeStatus {
    pub fn label(self) -> &'static str {
        match self {
            ResumeStatus::Scored => "Scored",
            ResumeStatus::Pending => "Pending",
            ResumeStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for ResumeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregates computed by the backend for the (filtered) resume set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub high_score: f64,
    #[serde(default)]
    pub lowest_score: f64,
    #[serde(default)]
    pub num_resumes: u64,
}

/// Response of `GET /api/query/get-resumes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeListing {
    #[serde(default)]
    pub resumes: Vec<Resume>,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub job_name: String,
    #[serde(default, deserialize_with = "super::optional_timestamp")]
    pub job_date: Option<DateTime<Utc>>,
}
