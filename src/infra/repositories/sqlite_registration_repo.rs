use crate::domain::{models::registration::Registration, ports::RegistrationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

pub struct SqliteRegistrationRepo {
    pool: SqlitePool,
}

impl SqliteRegistrationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for SqliteRegistrationRepo {
    async fn create(&self, registration: &Registration, capacity: i32) -> Result<Registration, AppError> {
        // SQLite serializes writers, so the transaction alone makes the
        // duplicate check, seat count and insert atomic.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let duplicate = sqlx::query(
            "SELECT COUNT(*) as count FROM registrations WHERE user_id = ? AND session_id = ?"
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
                "SELECT COUNT(*) as count FROM registrations WHERE session_id = ?"
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
               VALUES (?, ?, ?, ?, ?)
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
            "SELECT * FROM registrations WHERE user_id = ? ORDER BY created_at ASC"
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_by_session(&self, session_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM registrations WHERE session_id = ?")
            .bind(session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM registrations WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn delete_owned(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = ? AND user_id = ?")
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
