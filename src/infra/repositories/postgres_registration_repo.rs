use crate::domain::{models::registration::Registration, ports::RegistrationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresRegistrationRepo {
    pool: PgPool,
}

impl PostgresRegistrationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepo {
    async fn create(&self, registration: &Registration, capacity: i32) -> Result<Registration, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Serialize concurrent registrations for the same session: the row
        // lock makes the duplicate check, seat count and insert one unit.
        sqlx::query("SELECT id FROM sessions WHERE id = $1 FOR UPDATE")
            .bind(&registration.session_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Session not found".into()))?;

        let duplicate = sqlx::query(
            "SELECT COUNT(*) as count FROM registrations WHERE user_id = $1 AND session_id = $2"
        )
            .bind(&registration.user_id)
            .bind(&registration.session_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .get::<i64, _>("count");

        if duplicate > 0 {
            return Err(AppError::DuplicateRegistration);
        }

        if capacity > 0 {
            let taken = sqlx::query(
                "SELECT COUNT(*) as count FROM registrations WHERE session_id = $1"
            )
                .bind(&registration.session_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::Database)?
                .get::<i64, _>("count");

            if taken >= capacity as i64 {
                return Err(AppError::SessionFull);
            }
        }

        let created = sqlx::query_as::<_, Registration>(
            r#"INSERT INTO registrations (id, user_id, event_id, session_id, created_at)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING *"#
        )
            .bind(&registration.id)
            .bind(&registration.user_id)
            .bind(&registration.event_id)
            .bind(&registration.session_id)
            .bind(registration.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE user_id = $1 ORDER BY created_at ASC"
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_by_session(&self, session_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM registrations WHERE session_id = $1")
            .bind(session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM registrations WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn delete_owned(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFoundOrUnauthorized);
        }
        Ok(())
    }
}
