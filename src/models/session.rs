use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewSession {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub candidate_email: Option<String>,
    pub candidate_name: Option<String>,
    pub access_token: String,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub ip_address: Option<sqlx::types::ipnetwork::IpNetwork>,
    pub user_agent: Option<String>,
    pub browser_info: Option<JsonValue>,
    pub created_at: Option<DateTime<Utc>>,
}

impl InterviewSession {
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }

    /// Elapsed seconds between start and completion, when both are stamped.
    pub fn duration_seconds(&self) -> Option<f64> {
        match (self.started_at, self.completed_at) {
            (Some(started), Some(completed)) => {
                Some((completed - started).num_milliseconds() as f64 / 1000.0)
            }
            _ => None,
        }
    }
}

/// Session joined with the interview fields the candidate flow presents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionWithInterview {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub candidate_email: Option<String>,
    pub candidate_name: Option<String>,
    pub access_token: String,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub interview_title: String,
    pub interview_description: Option<String>,
    pub instructions: Option<String>,
    pub thank_you_message: Option<String>,
}
