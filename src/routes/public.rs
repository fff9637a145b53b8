use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::dto::public_dto::{
    PublicSessionSummary, SessionTransitionResult, SubmitResponseRequest, SubmitResponseResult,
    TrackEventRequest,
};
use crate::error::Error;
use crate::routes::ok;
use crate::{error::Result, AppState};

/// Resolve an access token into a session the candidate can enter. Unknown
/// demo tokens auto-create a session; completed sessions are blocked with
/// 409.
#[axum::debug_handler]
pub async fn validate_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    tracing::info!("Validating access token");
    let session = state.session_service.resolve_token(&token).await?;
    Ok(ok(json!({
        "session": PublicSessionSummary::from(session),
    })))
}

#[axum::debug_handler]
pub async fn get_questions_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    let session = state
        .session_service
        .get_by_token(&token)
        .await?
        .ok_or_else(|| Error::NotFound("Invalid session token".to_string()))?;

    let questions = state
        .interview_service
        .get_questions(session.interview_id)
        .await?;
    tracing::info!(
        "Returning {} questions for interview {}",
        questions.len(),
        session.interview_id
    );

    Ok(ok(json!({
        "questions": questions,
        "session": PublicSessionSummary::from(session),
    })))
}

#[axum::debug_handler]
pub async fn start_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.start(session_id).await?;
    tracing::info!("Session {} started", session.id);
    Ok(ok(SessionTransitionResult {
        session_id: session.id,
        status: session.status,
        started_at: session.started_at,
        completed_at: session.completed_at,
    }))
}

#[axum::debug_handler]
pub async fn complete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.complete(session_id).await?;
    tracing::info!("Session {} completed", session.id);
    Ok(ok(SessionTransitionResult {
        session_id: session.id,
        status: session.status,
        started_at: session.started_at,
        completed_at: session.completed_at,
    }))
}

#[axum::debug_handler]
pub async fn submit_response(
    State(state): State<AppState>,
    Json(payload): Json<SubmitResponseRequest>,
) -> Result<impl IntoResponse> {
    let response = state.response_service.submit(payload).await?;
    Ok(ok(SubmitResponseResult {
        response_id: response.id,
    }))
}

#[axum::debug_handler]
pub async fn track_event(
    State(state): State<AppState>,
    Json(payload): Json<TrackEventRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let event = state.response_service.track_event(payload).await?;
    Ok(ok(json!({ "event_id": event.id })))
}
