use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::interview::Interview;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShareLinkRequest {
    #[validate(range(min = 1, message = "max_uses must be at least 1"))]
    pub max_uses: i32,
    #[validate(range(min = 1, max = 365, message = "expires_in_days must be 1..=365"))]
    pub expires_in_days: i64,
}

/// Freshly issued share link. `expires_at` and `max_uses` are echoed for the
/// UI but not enforced anywhere downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLink {
    pub id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub max_uses: i32,
    pub current_uses: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkSummary {
    pub id: Uuid,
    pub token: String,
    pub created_at: Option<DateTime<Utc>>,
    pub max_uses: i32,
    pub current_uses: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareOverview {
    pub interview: Interview,
    pub share_links: Vec<ShareLinkSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendInvitesRequest {
    #[validate(length(min = 1, message = "At least one email is required"))]
    pub emails: Vec<String>,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    /// May contain the `[INTERVIEW_LINK]` placeholder.
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteDetail {
    pub email: String,
    pub token: String,
    pub session_id: Uuid,
    pub share_url: String,
}

/// Invite dispatch stops at the first mail failure; sessions created for the
/// addresses already served stay in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteReport {
    pub invites_sent: usize,
    pub invites: Vec<InviteDetail>,
    pub failed_email: Option<String>,
    pub error: Option<String>,
}
