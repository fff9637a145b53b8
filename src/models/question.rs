use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    Text,
    Coding,
    Video,
    FileUpload,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub interview_id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub question_type: QuestionType,
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
    pub required: Option<bool>,
    pub time_limit: Option<i32>,
    pub settings: Option<JsonValue>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionOption {
    pub id: Uuid,
    pub question_id: Uuid,
    pub option_text: String,
    pub is_correct: Option<bool>,
    pub order_index: i32,
}

/// A question with its options assembled app-side (one query per table, no
/// N+1 per question).
#[derive(Debug, Clone, Serialize)]
pub struct QuestionWithOptions {
    #[serde(flatten)]
    pub question: Question,
    pub options: Vec<QuestionOption>,
}
