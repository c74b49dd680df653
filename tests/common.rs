use campus_events_backend::{
    api::router::create_router,
    config::Config,
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo,
        sqlite_registration_repo::SqliteRegistrationRepo,
        sqlite_session_repo::SqliteSessionRepo,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
        };

        let state = Arc::new(AppState {
            config,
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            session_repo: Arc::new(SqliteSessionRepo::new(pool.clone())),
            registration_repo: Arc::new(SqliteRegistrationRepo::new(pool.clone())),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

/// Builds a request carrying the gateway identity headers.
#[allow(dead_code)]
pub fn req(method: &str, uri: &str, auth: Option<(&str, &str)>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some((user_id, role)) = auth {
        builder = builder.header("X-User-Id", user_id).header("X-User-Role", role);
    }

    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };

    builder.body(body).unwrap()
}

#[allow(dead_code)]
pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
