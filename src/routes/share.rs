use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::share_dto::{CreateShareLinkRequest, SendInvitesRequest};
use crate::routes::ok;
use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn get_share_overview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let overview = state.share_service.overview(interview_id).await?;
    Ok(ok(overview))
}

#[axum::debug_handler]
pub async fn create_share_link(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
    Json(payload): Json<CreateShareLinkRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let share_link = state
        .share_service
        .create_share_link(interview_id, payload)
        .await?;
    Ok(ok(share_link))
}

#[axum::debug_handler]
pub async fn delete_share_link(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.share_service.delete_share_link(session_id).await?;
    Ok(ok(serde_json::json!({ "message": "Share link deleted" })))
}

#[axum::debug_handler]
pub async fn send_invites(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
    Json(payload): Json<SendInvitesRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    tracing::info!(
        "Dispatching {} invite(s) for interview {}",
        payload.emails.len(),
        interview_id
    );
    let report = state
        .share_service
        .send_invites(interview_id, payload)
        .await?;
    if let Some(ref failed) = report.failed_email {
        tracing::warn!(
            "Invite dispatch incomplete: {} sent, stopped at {}",
            report.invites_sent,
            failed
        );
    }
    Ok(ok(report))
}
