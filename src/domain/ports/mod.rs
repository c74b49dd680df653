use crate::domain::models::{
    event::Event, registration::Registration, session::EventSession,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    /// Removes the event together with its sessions and registrations.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Atomically swaps the event's session list for the given one.
    async fn replace_for_event(
        &self,
        event_id: &str,
        sessions: &[EventSession],
    ) -> Result<Vec<EventSession>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<EventSession>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EventSession>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Inserts iff the caller is not yet registered for the session and,
    /// when `capacity` is positive, the session still has a free seat.
    /// Both checks and the insert run in one transaction.
    async fn create(&self, registration: &Registration, capacity: i32) -> Result<Registration, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>, AppError>;
    async fn count_by_session(&self, session_id: &str) -> Result<i64, AppError>;
    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError>;
    /// Deletes only when the record exists and belongs to `user_id`.
    async fn delete_owned(&self, user_id: &str, id: &str) -> Result<(), AppError>;
}
