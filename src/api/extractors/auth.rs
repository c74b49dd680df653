use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::Span;

use crate::domain::models::user::UserIdentity;
use crate::error::AppError;

/// Caller identity forwarded by the platform gateway. Token verification
/// happens upstream; by the time a request reaches this service the gateway
/// has resolved the session cookie into plain identity headers.
pub struct AuthUser(pub UserIdentity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts.headers.get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthenticated)?
            .to_string();

        let role = parts.headers.get("X-User-Role")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("STUDENT")
            .to_string();

        Span::current().record("user_id", user_id.as_str());

        Ok(AuthUser(UserIdentity { id: user_id, role }))
    }
}
