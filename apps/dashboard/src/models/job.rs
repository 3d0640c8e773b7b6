use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub folder_name: String,
    #[serde(default)]
    pub resume_count: u32,
    pub status: JobStatus,
    #[serde(deserialize_with = "super::lenient_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Lifecycle of a review job. The backend writes `pending` when a job is
/// accepted; any status string this client does not know lands in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Pending,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
    Destructive,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        }
    }

    pub fn badge(self) -> BadgeVariant {
        match self {
            JobStatus::Queued => BadgeVariant::Secondary,
            JobStatus::Pending | JobStatus::Processing => BadgeVariant::Default,
            JobStatus::Completed | JobStatus::Unknown => BadgeVariant::Outline,
            JobStatus::Failed => BadgeVariant::Destructive,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/job/start-job`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartJobRequest {
    pub folder_id: String,
    pub folder_name: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartJobAck {
    #[serde(default)]
    pub message: Option<String>,
}
