use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (id, title, description, event_type, start_date, end_date, location, is_virtual, max_attendees, registration_deadline, status, organizer_id, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
               RETURNING *"#
        )
            .bind(&event.id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.event_type)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(&event.location)
            .bind(event.is_virtual)
            .bind(event.max_attendees)
            .bind(event.registration_deadline)
            .bind(&event.status)
            .bind(&event.organizer_id)
            .bind(event.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY start_date ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"UPDATE events SET title=$1, description=$2, event_type=$3, start_date=$4, end_date=$5, location=$6, is_virtual=$7, max_attendees=$8, registration_deadline=$9, status=$10
               WHERE id=$11
               RETURNING *"#
        )
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.event_type)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(&event.location)
            .bind(event.is_virtual)
            .bind(event.max_attendees)
            .bind(event.registration_deadline)
            .bind(&event.status)
            .bind(&event.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM registrations WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        sqlx::query("DELETE FROM sessions WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
