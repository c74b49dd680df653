use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::services::schedule::SessionDraft;

#[derive(Deserialize)]
pub struct SessionPayload {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub max_attendees: Option<i32>,
}

impl SessionPayload {
    pub fn into_draft(self) -> SessionDraft {
        SessionDraft {
            title: self.title,
            description: self.description.unwrap_or_default(),
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location.filter(|loc| !loc.is_empty()),
            max_attendees: self.max_attendees.unwrap_or(0),
        }
    }
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub event_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub is_virtual: Option<bool>,
    pub max_attendees: Option<i32>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub sessions: Option<Vec<SessionPayload>>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub is_virtual: Option<bool>,
    pub max_attendees: Option<i32>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct ReplaceSessionsRequest {
    pub sessions: Vec<SessionPayload>,
}
