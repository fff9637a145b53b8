use axum::response::Json;
use serde::Serialize;
use serde_json::json;

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod health;
pub mod public;
pub mod share;
pub mod upload;

/// Success envelope: every handler answers `{"success": true, "data": ...}`;
/// the error type produces the `{"success": false, "error": ...}` half.
pub fn ok<T: Serialize>(data: T) -> Json<serde_json::Value> {
    Json(json!({ "success": true, "data": data }))
}
