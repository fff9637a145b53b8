use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const ROLE_OWNER: &str = "owner";

/// Roles allowed onto the admin surface.
pub const ADMIN_ROLES: [&str; 3] = ["admin", "editor", "owner"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_owner(&self) -> bool {
        self.role.as_deref() == Some(ROLE_OWNER)
    }

    pub fn has_admin_access(&self) -> bool {
        self.role
            .as_deref()
            .map(|r| ADMIN_ROLES.iter().any(|a| a.eq_ignore_ascii_case(r)))
            .unwrap_or(false)
    }
}

/// User row as exposed to the admin UI: never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
