use crate::domain::{models::session::EventSession, ports::SessionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresSessionRepo {
    pool: PgPool,
}

impl PostgresSessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepo {
    async fn replace_for_event(
        &self,
        event_id: &str,
        sessions: &[EventSession],
    ) -> Result<Vec<EventSession>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM sessions WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let mut created = Vec::with_capacity(sessions.len());
        for session in sessions {
            let row = sqlx::query_as::<_, EventSession>(
                r#"INSERT INTO sessions (id, event_id, title, description, start_time, end_time, location, max_attendees, created_at)
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                   RETURNING *"#
            )
                .bind(&session.id)
                .bind(&session.event_id)
                .bind(&session.title)
                .bind(&session.description)
                .bind(session.start_time)
                .bind(session.end_time)
                .bind(&session.location)
                .bind(session.max_attendees)
                .bind(session.created_at)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            created.push(row);
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EventSession>, AppError> {
        sqlx::query_as::<_, EventSession>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EventSession>, AppError> {
        sqlx::query_as::<_, EventSession>(
            "SELECT * FROM sessions WHERE event_id = $1 ORDER BY start_time ASC"
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Session not found".into()));
        }
        Ok(())
    }
}
