use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::question::QuestionType;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Response {
    pub id: Uuid,
    pub session_id: Uuid,
    pub question_id: Uuid,
    pub response_data: JsonValue,
    pub time_spent: Option<i32>,
    pub started_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Response joined with the question it answers; the shape the analytics
/// scans and the session-detail view work from.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResponseWithQuestion {
    pub id: Uuid,
    pub session_id: Uuid,
    pub question_id: Uuid,
    pub response_data: JsonValue,
    pub time_spent: Option<i32>,
    pub question_title: String,
    pub question_type: QuestionType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultipleChoiceResponse {
    pub selected_option_id: Option<Uuid>,
    pub selected_option_text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextResponse {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub word_count: i64,
    #[serde(default)]
    pub character_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodingResponse {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileResponse {
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

/// Typed view over the `response_data` JSONB payload. The wire shape carries
/// no tag; the question type selects the variant, so parsing happens per
/// branch and serialization goes straight to the inner struct.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    MultipleChoice(MultipleChoiceResponse),
    Text(TextResponse),
    Coding(CodingResponse),
    File(FileResponse),
}

impl ResponseData {
    /// Validate a raw payload against the question type it answers. Empty
    /// payloads are legal for every type (a timed-out question still records
    /// a response); a payload that contradicts the type is rejected.
    pub fn parse(question_type: QuestionType, raw: &JsonValue) -> Result<Self> {
        if !raw.is_object() {
            return Err(Error::BadRequest(
                "response_data must be a JSON object".to_string(),
            ));
        }

        let parsed = match question_type {
            QuestionType::MultipleChoice => ResponseData::MultipleChoice(
                serde_json::from_value(raw.clone())
                    .map_err(|e| Error::BadRequest(format!("Invalid multiple_choice response: {}", e)))?,
            ),
            QuestionType::Text => ResponseData::Text(
                serde_json::from_value(raw.clone())
                    .map_err(|e| Error::BadRequest(format!("Invalid text response: {}", e)))?,
            ),
            QuestionType::Coding => ResponseData::Coding(
                serde_json::from_value(raw.clone())
                    .map_err(|e| Error::BadRequest(format!("Invalid coding response: {}", e)))?,
            ),
            QuestionType::Video | QuestionType::FileUpload => {
                let file: FileResponse = serde_json::from_value(raw.clone())
                    .map_err(|e| Error::BadRequest(format!("Invalid file response: {}", e)))?;
                if let Some(ref file_url) = file.file_url {
                    let parsed_url = url::Url::parse(file_url)
                        .map_err(|_| Error::BadRequest("file_url is not a valid URL".to_string()))?;
                    if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
                        return Err(Error::BadRequest(
                            "file_url must be an HTTP or HTTPS URL".to_string(),
                        ));
                    }
                }
                ResponseData::File(file)
            }
        };

        Ok(parsed)
    }

    pub fn to_value(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn file_url(&self) -> Option<&str> {
        match self {
            ResponseData::File(file) => file.file_url.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn multiple_choice_allows_missing_selection() {
        let data = ResponseData::parse(QuestionType::MultipleChoice, &json!({})).unwrap();
        match data {
            ResponseData::MultipleChoice(mc) => {
                assert!(mc.selected_option_id.is_none());
                assert!(mc.selected_option_text.is_none());
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn text_payload_round_trips_counts() {
        let raw = json!({"text": "hello world", "word_count": 2, "character_count": 11});
        let data = ResponseData::parse(QuestionType::Text, &raw).unwrap();
        assert_eq!(data.to_value().unwrap(), raw);
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(ResponseData::parse(QuestionType::Text, &json!("just a string")).is_err());
        assert!(ResponseData::parse(QuestionType::Coding, &json!(42)).is_err());
    }

    #[test]
    fn file_url_must_be_http() {
        let raw = json!({"file_url": "ftp://example.com/cv.pdf"});
        assert!(ResponseData::parse(QuestionType::FileUpload, &raw).is_err());

        let raw = json!({"file_url": "https://blob.example.com/cv.pdf", "file_size": 1024});
        let data = ResponseData::parse(QuestionType::FileUpload, &raw).unwrap();
        assert_eq!(data.file_url(), Some("https://blob.example.com/cv.pdf"));
    }

    #[test]
    fn video_without_recording_is_accepted() {
        let data = ResponseData::parse(QuestionType::Video, &json!({})).unwrap();
        assert!(data.file_url().is_none());
    }
}
