use crate::dto::public_dto::{SubmitResponseRequest, TrackEventRequest};
use crate::error::{Error, Result};
use crate::models::response::{Response, ResponseData, ResponseWithQuestion};
use crate::models::tracking_event::TrackingEvent;
use crate::models::uploaded_file::UploadedFile;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ResponseService {
    pool: PgPool,
}

impl ResponseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record one response. The payload is validated against the question
    /// type before anything is written; file-bearing payloads additionally
    /// create an uploaded_files row pointing at the new response. Duplicate
    /// submissions for the same (session, question) append a new row.
    pub async fn submit(&self, req: SubmitResponseRequest) -> Result<Response> {
        if req.session_id.is_nil() || req.question_id.is_nil() {
            return Err(Error::BadRequest(
                "session_id and question_id are required".to_string(),
            ));
        }

        let data = ResponseData::parse(req.question_type, &req.response_data)?;
        let response_data = data.to_value()?;

        let response = sqlx::query_as::<_, Response>(
            r#"
            INSERT INTO responses (session_id, question_id, response_data, time_spent, started_at, submitted_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(req.session_id)
        .bind(req.question_id)
        .bind(&response_data)
        .bind(req.time_spent.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        if let ResponseData::File(ref file) = data {
            if let Some(ref file_url) = file.file_url {
                let uploaded = sqlx::query_as::<_, UploadedFile>(
                    r#"
                    INSERT INTO uploaded_files (response_id, filename, original_filename, file_size, mime_type, storage_path, storage_provider, upload_status)
                    VALUES ($1, $2, $2, $3, $4, $5, 'local', 'completed')
                    RETURNING *
                    "#,
                )
                .bind(response.id)
                .bind(file.file_name.as_deref().unwrap_or("uploaded_file"))
                .bind(file.file_size.unwrap_or(0))
                .bind(
                    file.mime_type
                        .as_deref()
                        .unwrap_or("application/octet-stream"),
                )
                .bind(file_url)
                .fetch_one(&self.pool)
                .await?;
                tracing::info!(
                    "Linked uploaded file {} to response {}",
                    uploaded.id,
                    response.id
                );
            }
        }

        tracing::info!(
            "Recorded response {} for session {} question {}",
            response.id,
            req.session_id,
            req.question_id
        );
        Ok(response)
    }

    /// Append one tracking event. Events are never updated or deleted.
    pub async fn track_event(&self, req: TrackEventRequest) -> Result<TrackingEvent> {
        let event = sqlx::query_as::<_, TrackingEvent>(
            r#"
            INSERT INTO tracking_events (session_id, question_id, event_type, event_data)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(req.session_id)
        .bind(req.question_id)
        .bind(&req.event_type)
        .bind(&req.event_data)
        .fetch_one(&self.pool)
        .await?;
        Ok(event)
    }

    pub async fn responses_for_session(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<ResponseWithQuestion>> {
        let rows = sqlx::query_as::<_, ResponseWithQuestion>(
            r#"
            SELECT r.id, r.session_id, r.question_id, r.response_data, r.time_spent,
                   q.title AS question_title, q.type AS question_type
            FROM responses r
            JOIN questions q ON r.question_id = q.id
            WHERE r.session_id = $1
            ORDER BY q.order_index
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
