//! Session repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use coral_core::error::{AppError, ErrorKind};
use coral_core::result::AppResult;
use coral_entity::session::Session;

/// Repository for session rows.
///
/// Deactivation queries are conditional on `active` so that counts reported
/// to callers reflect rows this call actually flipped.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new active session row.
    pub async fn create(
        &self,
        user_id: Uuid,
        ip_address: &str,
        user_agent: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (user_id, ip_address, user_agent, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(user_id)
        .bind(ip_address)
        .bind(user_agent)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))
    }

    /// Find a session by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    /// List active, unexpired sessions for a user, most recently used first.
    pub async fn find_active_by_user(&self, user_id: Uuid) -> AppResult<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE user_id = $1 AND active AND expires_at > NOW() \
             ORDER BY last_activity DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list active sessions", e)
        })
    }

    /// Update the last-activity timestamp.
    pub async fn touch(&self, session_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET last_activity = NOW() WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last activity", e)
            })?;
        Ok(())
    }

    /// Deactivate a single session. Returns the number of rows flipped.
    pub async fn deactivate(&self, session_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("UPDATE sessions SET active = FALSE WHERE id = $1 AND active")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to deactivate session", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Deactivate every active session for a user.
    pub async fn deactivate_all_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result =
            sqlx::query("UPDATE sessions SET active = FALSE WHERE user_id = $1 AND active")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to deactivate sessions", e)
                })?;
        Ok(result.rows_affected())
    }

    /// Deactivate every active session for a user except the given one.
    pub async fn deactivate_others_by_user(
        &self,
        user_id: Uuid,
        keep_session_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET active = FALSE WHERE user_id = $1 AND id != $2 AND active",
        )
        .bind(user_id)
        .bind(keep_session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate other sessions", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Delete sessions past their absolute expiry.
    pub async fn delete_expired(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to cleanup sessions", e)
            })?;
        Ok(result.rows_affected())
    }
}
