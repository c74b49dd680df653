use serde::Serialize;

use crate::domain::models::{event::Event, session::EventSession};

#[derive(Serialize)]
pub struct EventWithSessions {
    #[serde(flatten)]
    pub event: Event,
    pub sessions: Vec<EventSession>,
}

#[derive(Serialize)]
pub struct SessionWithAttendance {
    #[serde(flatten)]
    pub session: EventSession,
    pub attendee_count: i64,
}
