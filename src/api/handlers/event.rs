use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{CreateEventRequest, UpdateEventRequest},
    responses::EventWithSessions,
};
use crate::domain::models::event::{Event, EVENT_TYPES};
use crate::domain::models::session::EventSession;
use crate::domain::services::schedule::{validate_sessions, SessionDraft};
use crate::error::AppError;
use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.is_organizer() {
        return Err(AppError::Forbidden("Only organizers can create events".into()));
    }

    if !EVENT_TYPES.contains(&payload.event_type.as_str()) {
        return Err(AppError::Validation("Invalid event_type".into()));
    }

    if payload.end_date < payload.start_date {
        return Err(AppError::Validation("End date must be after start date".into()));
    }

    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: payload.title,
        description: payload.description,
        event_type: payload.event_type,
        start_date: payload.start_date,
        end_date: payload.end_date,
        location: payload.location,
        is_virtual: payload.is_virtual.unwrap_or(false),
        max_attendees: payload.max_attendees.unwrap_or(0),
        registration_deadline: payload.registration_deadline,
        status: "UPCOMING".to_string(),
        organizer_id: user.id.clone(),
        created_at: Utc::now(),
    };

    // Validate the whole proposed schedule before anything is persisted.
    let drafts: Vec<SessionDraft> = payload.sessions
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.into_draft())
        .collect();
    let normalized = validate_sessions(event.start_date, event.end_date, &event.location, drafts)?;

    let created = state.event_repo.create(&event).await?;

    let sessions: Vec<EventSession> = normalized
        .into_iter()
        .map(|draft| EventSession::from_draft(&created.id, draft))
        .collect();
    let stored = state.session_repo.replace_for_event(&created.id, &sessions).await?;

    info!("Created event {} with {} sessions by {}", created.id, stored.len(), user.id);
    Ok(Json(EventWithSessions { event: created, sessions: stored }))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let sessions = state.session_repo.list_by_event(&event.id).await?;
    Ok(Json(EventWithSessions { event, sessions }))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.organizer_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("Only the event owner can update it".into()));
    }

    if let Some(val) = payload.title { event.title = val; }
    if let Some(val) = payload.description { event.description = val; }
    if let Some(val) = payload.event_type {
        if !EVENT_TYPES.contains(&val.as_str()) {
            return Err(AppError::Validation("Invalid event_type".into()));
        }
        event.event_type = val;
    }
    if let Some(val) = payload.start_date { event.start_date = val; }
    if let Some(val) = payload.end_date { event.end_date = val; }
    if let Some(val) = payload.location { event.location = val; }
    if let Some(val) = payload.is_virtual { event.is_virtual = val; }
    if let Some(val) = payload.max_attendees { event.max_attendees = val; }
    if let Some(val) = payload.registration_deadline { event.registration_deadline = Some(val); }
    if let Some(val) = payload.status {
        match val.as_str() {
            "UPCOMING" | "CLOSED" => event.status = val,
            _ => return Err(AppError::Validation("Invalid status".into())),
        }
    }

    if event.end_date < event.start_date {
        return Err(AppError::Validation("End date must be after start date".into()));
    }

    // A narrowed date range must still contain every stored session.
    let existing = state.session_repo.list_by_event(&event.id).await?;
    if !existing.is_empty() {
        let drafts: Vec<SessionDraft> = existing
            .iter()
            .map(|s| SessionDraft {
                title: s.title.clone(),
                description: s.description.clone(),
                start_time: s.start_time,
                end_time: s.end_time,
                location: s.location.clone(),
                max_attendees: s.max_attendees,
            })
            .collect();
        validate_sessions(event.start_date, event.end_date, &event.location, drafts)?;
    }

    let updated = state.event_repo.update(&event).await?;
    info!("Event updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.organizer_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("Only the event owner can delete it".into()));
    }

    state.event_repo.delete(&event.id).await?;
    info!("Event deleted: {}", event_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
