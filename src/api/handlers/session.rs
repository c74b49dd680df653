use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{requests::ReplaceSessionsRequest, responses::SessionWithAttendance};
use crate::domain::models::session::EventSession;
use crate::domain::services::schedule::{validate_sessions, SessionDraft};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn replace_sessions(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<ReplaceSessionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.organizer_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("Only the event owner can edit sessions".into()));
    }

    let registered = state.registration_repo.count_by_event(&event.id).await?;
    if registered > 0 {
        return Err(AppError::Conflict("Cannot replace sessions while registrations exist".into()));
    }

    let drafts: Vec<SessionDraft> = payload.sessions.into_iter().map(|s| s.into_draft()).collect();
    let normalized = validate_sessions(event.start_date, event.end_date, &event.location, drafts)?;

    let sessions: Vec<EventSession> = normalized
        .into_iter()
        .map(|draft| EventSession::from_draft(&event.id, draft))
        .collect();
    let stored = state.session_repo.replace_for_event(&event.id, &sessions).await?;

    info!("Replaced sessions for event {} ({} sessions)", event.id, stored.len());
    Ok(Json(stored))
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let sessions = state.session_repo.list_by_event(&event.id).await?;

    let mut out = Vec::with_capacity(sessions.len());
    for session in sessions {
        let attendee_count = state.registration_repo.count_by_session(&session.id).await?;
        out.push(SessionWithAttendance { session, attendee_count });
    }
    Ok(Json(out))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path((event_id, session_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.organizer_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("Only the event owner can delete sessions".into()));
    }

    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if session.event_id != event.id {
        return Err(AppError::NotFound("Session not found for this event".into()));
    }

    let registered = state.registration_repo.count_by_session(&session.id).await?;
    if registered > 0 {
        return Err(AppError::Conflict("Cannot delete session with existing registrations".into()));
    }

    state.session_repo.delete(&session_id).await?;
    info!("Deleted session {}", session_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
