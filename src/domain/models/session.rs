use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::services::schedule::SessionDraft;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EventSession {
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub max_attendees: i32,
    pub created_at: DateTime<Utc>,
}

impl EventSession {
    pub fn from_draft(event_id: &str, draft: SessionDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            title: draft.title,
            description: draft.description,
            start_time: draft.start_time,
            end_time: draft.end_time,
            location: draft.location,
            max_attendees: draft.max_attendees,
            created_at: Utc::now(),
        }
    }
}
