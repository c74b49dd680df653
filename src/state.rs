use std::sync::Arc;
use crate::domain::ports::{EventRepository, RegistrationRepository, SessionRepository};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub registration_repo: Arc<dyn RegistrationRepository>,
}
