use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const EVENT_TYPES: [&str; 3] = ["CONFERENCE", "WORKSHOP", "SEMINAR"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub event_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub is_virtual: bool,
    pub max_attendees: i32,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub status: String,
    pub organizer_id: String,
    pub created_at: DateTime<Utc>,
}
