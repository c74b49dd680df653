use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::registration::Registration;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

/// Precondition order matters: existence before deadline, deadline before
/// duplicate/capacity. The last two run atomically inside the repository.
pub async fn register_for_session(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path((event_id, session_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if session.event_id != event_id {
        return Err(AppError::NotFound("Session not found for this event".into()));
    }

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.status == "CLOSED" {
        return Err(AppError::Forbidden("Event is closed".into()));
    }

    if let Some(deadline) = event.registration_deadline {
        if Utc::now() > deadline {
            return Err(AppError::DeadlinePassed);
        }
    }

    let registration = Registration::new(user.id.clone(), event_id, session_id);
    let created = state.registration_repo.create(&registration, session.max_attendees).await?;

    info!("User {} registered for session {}", user.id, created.session_id);
    Ok(Json(created))
}

pub async fn cancel_registration(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(registration_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.registration_repo.delete_owned(&user.id, &registration_id).await?;
    info!("Registration cancelled: {}", registration_id);
    Ok(Json(serde_json::json!({"status": "cancelled"})))
}

pub async fn list_my_registrations(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let registrations = state.registration_repo.list_by_user(&user.id).await?;
    Ok(Json(registrations))
}
