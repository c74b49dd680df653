use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("{0}")]
    OutOfRange(String),
    #[error("{0}")]
    InvalidInterval(String),
    #[error("{0}")]
    TimeConflict(String),
    #[error("Registration deadline has passed")]
    DeadlinePassed,
    #[error("Already registered for this session")]
    DuplicateRegistration,
    #[error("Session is full")]
    SessionFull,
    #[error("Registration not found")]
    NotFoundOrUnauthorized,
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Stable machine-readable kind surfaced in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) | AppError::Internal => "INTERNAL",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION",
            AppError::OutOfRange(_) => "OUT_OF_RANGE",
            AppError::InvalidInterval(_) => "INVALID_INTERVAL",
            AppError::TimeConflict(_) => "TIME_CONFLICT",
            AppError::DeadlinePassed => "DEADLINE_PASSED",
            AppError::DuplicateRegistration => "DUPLICATE_REGISTRATION",
            AppError::SessionFull => "SESSION_FULL",
            AppError::NotFoundOrUnauthorized => "NOT_FOUND_OR_UNAUTHORIZED",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let code = db_err.code().unwrap_or_default();

                    // 2067 = SQLite Unique Constraint
                    // 23505 = PostgreSQL Unique Violation
                    if code == "2067" || code == "23505" {
                        return AppError::DuplicateRegistration.into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::OutOfRange(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidInterval(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::TimeConflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::DeadlinePassed => (StatusCode::CONFLICT, self.to_string()),
            AppError::DuplicateRegistration => (StatusCode::CONFLICT, self.to_string()),
            AppError::SessionFull => (StatusCode::CONFLICT, self.to_string()),
            AppError::NotFoundOrUnauthorized => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
        };

        let body = Json(json!({
            "error": message,
            "code": self.code()
        }));

        (status, body).into_response()
    }
}
