use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

pub const EVENT_KEYSTROKE: &str = "keystroke";
pub const EVENT_PASTE: &str = "paste";
pub const EVENT_FOCUS_CHANGE: &str = "focus_change";

/// Append-only behavioral signal captured while a candidate answers a
/// question; never mutated after insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrackingEvent {
    pub id: Uuid,
    pub session_id: Uuid,
    pub question_id: Uuid,
    pub event_type: String,
    pub event_data: JsonValue,
    pub timestamp: Option<DateTime<Utc>>,
}

impl TrackingEvent {
    /// The key name reported by keystroke events, when present.
    pub fn key(&self) -> Option<&str> {
        self.event_data.get("key").and_then(|v| v.as_str())
    }
}
