use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::question::QuestionType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewOverview {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub total_sessions: usize,
    pub completed_sessions: usize,
    /// Mean duration in seconds over completed sessions carrying both
    /// timestamps; 0 when none qualify.
    pub average_completion_time: f64,
    pub abandonment_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAnalytics {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub order_index: i32,
    pub total_responses: usize,
    pub average_time_spent: f64,
    pub completion_rate: f64,
    pub response_distribution: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAnalyticsRow {
    pub id: Uuid,
    pub candidate_email: String,
    pub candidate_name: String,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_time: f64,
    pub responses_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeystrokeAnalytics {
    pub question_id: Uuid,
    pub question_title: String,
    pub total_keystrokes: usize,
    /// Rough WPM estimate: (keystrokes - backspaces) / 5, floored at 0.
    /// Deliberately not time-normalized.
    pub average_typing_speed: f64,
    pub paste_events: usize,
    pub backspace_ratio: f64,
    pub focus_changes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewAnalytics {
    pub interview: InterviewOverview,
    pub questions: Vec<QuestionAnalytics>,
    pub sessions: Vec<SessionAnalyticsRow>,
    pub keystroke_analytics: Vec<KeystrokeAnalytics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetailHeader {
    pub id: Uuid,
    pub candidate_email: String,
    pub candidate_name: String,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultipleChoiceDetails {
    pub selected_option_id: Option<Uuid>,
    pub selected_option_text: Option<String>,
    pub is_correct: Option<bool>,
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponseDetail {
    pub id: Uuid,
    pub question_id: Uuid,
    pub question_title: String,
    #[serde(rename = "question_type")]
    pub question_type: QuestionType,
    pub response_data: JsonValue,
    pub time_spent: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_choice_details: Option<MultipleChoiceDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetails {
    pub session: SessionDetailHeader,
    pub responses: Vec<SessionResponseDetail>,
}
