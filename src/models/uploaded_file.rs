use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UploadedFile {
    pub id: Uuid,
    pub response_id: Uuid,
    pub filename: String,
    pub original_filename: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub storage_path: String,
    pub storage_provider: Option<String>,
    pub upload_status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
