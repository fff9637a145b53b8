use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

use crate::models::question::QuestionType;
use crate::models::session::SessionWithInterview;

/// What the candidate sees after a token resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicSessionSummary {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub interview_title: String,
    pub interview_description: Option<String>,
    pub instructions: Option<String>,
    pub thank_you_message: Option<String>,
    pub status: String,
    pub candidate_email: Option<String>,
    pub candidate_name: Option<String>,
    pub access_token: String,
}

impl From<SessionWithInterview> for PublicSessionSummary {
    fn from(s: SessionWithInterview) -> Self {
        Self {
            id: s.id,
            interview_id: s.interview_id,
            interview_title: s.interview_title,
            interview_description: s.interview_description,
            instructions: s.instructions,
            thank_you_message: s.thank_you_message,
            status: s.status,
            candidate_email: s.candidate_email,
            candidate_name: s.candidate_name,
            access_token: s.access_token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseRequest {
    pub session_id: Uuid,
    pub question_id: Uuid,
    pub response_data: JsonValue,
    pub time_spent: Option<i32>,
    pub question_type: QuestionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseResult {
    pub response_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrackEventRequest {
    pub session_id: Uuid,
    pub question_id: Uuid,
    #[validate(length(min = 1, message = "event_type is required"))]
    pub event_type: String,
    pub event_data: JsonValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTransitionResult {
    pub session_id: Uuid,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    pub url: String,
    pub pathname: String,
    pub size: u64,
}
