use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::routes::ok;
use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn get_interview_analytics(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let analytics = state
        .analytics_service
        .interview_analytics(interview_id)
        .await?;
    Ok(ok(analytics))
}

#[axum::debug_handler]
pub async fn get_session_details(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let details = state.analytics_service.session_details(session_id).await?;
    Ok(ok(details))
}

/// Sessions for one interview as a CSV attachment.
#[axum::debug_handler]
pub async fn export_sessions(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let (csv_text, filename) = state.analytics_service.export_sessions(interview_id).await?;
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv_text,
    ))
}
