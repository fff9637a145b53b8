use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::models::question::QuestionType;
use crate::models::user::AdminUser;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInterviewPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub thank_you_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateInterviewPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub thank_you_message: Option<String>,
    pub status: Option<String>,
    /// When present, replaces the interview's full question set.
    pub questions: Option<Vec<QuestionPayload>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPayload {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub title: String,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub time_limit: Option<i32>,
    pub settings: Option<JsonValue>,
    pub options: Option<Vec<OptionPayload>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionPayload {
    pub option_text: String,
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveQuestionsPayload {
    #[validate(length(min = 1, message = "At least one question is required"))]
    pub questions: Vec<QuestionPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserPayload {
    #[validate(email)]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserPayload {
    #[validate(email)]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Absent or empty keeps the current password.
    pub password: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminUser,
}
