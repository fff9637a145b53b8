use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use validator::Validate;

use crate::dto::admin_dto::{LoginPayload, LoginResponse};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::AdminUser;
use crate::routes::ok;
use crate::AppState;

const TOKEN_TTL_HOURS: i64 = 24;

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let user = state
        .user_service
        .authenticate(&payload.email, &payload.password)
        .await?;

    let config = crate::config::get_config();
    let exp = (Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        exp,
        role: user.role.clone(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to issue token: {}", e)))?;

    tracing::info!("Admin login for {}", user.email);

    Ok(ok(LoginResponse {
        token,
        user: AdminUser {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            created_at: user.created_at,
        },
    }))
}
