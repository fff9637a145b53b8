use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::dto::admin_dto::{
    CreateInterviewPayload, CreateUserPayload, SaveQuestionsPayload, UpdateInterviewPayload,
    UpdateUserPayload,
};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::routes::ok;
use crate::AppState;

#[axum::debug_handler]
pub async fn create_interview(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let created_by: Uuid = claims
        .sub
        .parse()
        .map_err(|_| Error::Unauthorized("invalid_token".to_string()))?;
    let config = crate::config::get_config();

    let interview = state
        .interview_service
        .create(payload, config.organization_id, created_by)
        .await?;
    tracing::info!("Created interview {} ({})", interview.id, interview.title);
    Ok(ok(interview))
}

#[axum::debug_handler]
pub async fn list_interviews(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let config = crate::config::get_config();
    let interviews = state.interview_service.list(config.organization_id).await?;
    Ok(ok(interviews))
}

#[axum::debug_handler]
pub async fn get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let interview = state.interview_service.get(interview_id).await?;
    let questions = state.interview_service.get_questions(interview_id).await?;
    Ok(ok(json!({
        "interview": interview,
        "questions": questions,
    })))
}

#[axum::debug_handler]
pub async fn update_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
    Json(payload): Json<UpdateInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let interview = state
        .interview_service
        .update(interview_id, payload)
        .await?;
    Ok(ok(interview))
}

#[axum::debug_handler]
pub async fn delete_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.interview_service.delete(interview_id).await?;
    Ok(ok(json!({ "message": "Interview deleted successfully" })))
}

#[axum::debug_handler]
pub async fn save_questions(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
    Json(payload): Json<SaveQuestionsPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let questions = state
        .interview_service
        .save_questions(interview_id, &payload.questions)
        .await?;
    Ok(ok(questions))
}

#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.user_service.list_admin_users().await?;
    Ok(ok(users))
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .create_user(payload, claims.role.as_deref())
        .await?;
    Ok(ok(user))
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .update_user(user_id, payload, claims.role.as_deref())
        .await?;
    Ok(ok(user))
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .user_service
        .delete_user(user_id, claims.role.as_deref())
        .await?;
    Ok(ok(json!({ "message": "User deleted" })))
}
