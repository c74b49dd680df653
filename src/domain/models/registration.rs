use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Registration {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(user_id: String, event_id: String, session_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            event_id,
            session_id,
            created_at: Utc::now(),
        }
    }
}
