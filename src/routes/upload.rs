use axum::{extract::State, response::IntoResponse};
use uuid::Uuid;

use crate::dto::public_dto::UploadResult;
use crate::error::Error;
use crate::routes::ok;
use crate::{error::Result, AppState};

/// Multipart upload for video and file answers. The blob lands under the
/// local uploads directory (served statically) and the caller gets back the
/// URL it will attach to its response payload.
#[axum::debug_handler]
pub async fn upload_file(
    State(_state): State<AppState>,
    mut multipart: axum::extract::Multipart,
) -> Result<impl IntoResponse> {
    let mut session_id: Option<Uuid> = None;
    let mut question_id: Option<Uuid> = None;
    let mut file_bytes: Option<bytes::Bytes> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(Error::Multipart)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "session_id" => {
                let raw = field.text().await.map_err(Error::Multipart)?;
                session_id = Some(
                    raw.trim()
                        .parse()
                        .map_err(|_| Error::BadRequest("Invalid session_id".to_string()))?,
                );
            }
            "question_id" => {
                let raw = field.text().await.map_err(Error::Multipart)?;
                question_id = Some(
                    raw.trim()
                        .parse()
                        .map_err(|_| Error::BadRequest("Invalid question_id".to_string()))?,
                );
            }
            "file" | "video" => {
                file_name = field.file_name().map(|f| f.to_string());
                file_bytes = Some(field.bytes().await.map_err(Error::Multipart)?);
            }
            _ => {}
        }
    }

    let session_id =
        session_id.ok_or_else(|| Error::BadRequest("session_id is required".to_string()))?;
    let question_id =
        question_id.ok_or_else(|| Error::BadRequest("question_id is required".to_string()))?;
    let data = file_bytes
        .filter(|b| !b.is_empty())
        .ok_or_else(|| Error::BadRequest("Uploaded file is empty".to_string()))?;

    let extension = file_name
        .as_deref()
        .and_then(|f| std::path::Path::new(f).extension())
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    let config = crate::config::get_config();
    let relative_dir = format!("interviews/{}/{}", session_id, question_id);
    let upload_dir = format!("{}/{}", config.uploads_dir, relative_dir);
    tokio::fs::create_dir_all(&upload_dir)
        .await
        .map_err(Error::Io)?;

    let saved_filename = format!("{}.{}", Uuid::new_v4(), extension);
    let path = format!("{}/{}", upload_dir, saved_filename);
    tokio::fs::write(&path, &data).await.map_err(Error::Io)?;

    let pathname = format!("{}/{}", relative_dir, saved_filename);
    let url = format!("{}/uploads/{}", config.app_url, pathname);
    tracing::info!("Stored upload {} ({} bytes)", pathname, data.len());

    Ok(ok(UploadResult {
        url,
        pathname,
        size: data.len() as u64,
    }))
}
