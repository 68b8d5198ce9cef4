//! Refresh token repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use coral_core::error::{AppError, ErrorKind};
use coral_core::result::AppResult;
use coral_entity::refresh_token::RefreshTokenRecord;

/// Repository for refresh-token records, keyed by token hash.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh-token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new token record.
    pub async fn insert(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshTokenRecord> {
        sqlx::query_as::<_, RefreshTokenRecord>(
            "INSERT INTO refresh_tokens (user_id, session_id, token_hash, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(user_id)
        .bind(session_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to store refresh token", e)
        })
    }

    /// Find a still-redeemable record by token hash.
    pub async fn find_valid(&self, token_hash: &str) -> AppResult<Option<RefreshTokenRecord>> {
        sqlx::query_as::<_, RefreshTokenRecord>(
            "SELECT * FROM refresh_tokens \
             WHERE token_hash = $1 AND NOT revoked AND expires_at > NOW()",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to look up refresh token", e)
        })
    }

    /// Revoke a still-valid record and return it, in one conditional update.
    ///
    /// Of any number of concurrent redemptions of the same token, exactly one
    /// observes a row here; the rest get `None`.
    pub async fn consume(&self, token_hash: &str) -> AppResult<Option<RefreshTokenRecord>> {
        sqlx::query_as::<_, RefreshTokenRecord>(
            "UPDATE refresh_tokens SET revoked = TRUE \
             WHERE token_hash = $1 AND NOT revoked AND expires_at > NOW() \
             RETURNING *",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to consume refresh token", e)
        })
    }

    /// Revoke a record by token hash. Returns whether a row was flipped.
    pub async fn revoke(&self, token_hash: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE WHERE token_hash = $1 AND NOT revoked",
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every valid record for a user.
    pub async fn revoke_all_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result =
            sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1 AND NOT revoked")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to revoke user tokens", e)
                })?;
        Ok(result.rows_affected())
    }

    /// Revoke every valid record for a user except those of one session.
    pub async fn revoke_all_by_user_except(
        &self,
        user_id: Uuid,
        keep_session_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE \
             WHERE user_id = $1 AND session_id != $2 AND NOT revoked",
        )
        .bind(user_id)
        .bind(keep_session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke other tokens", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Revoke every valid record bound to a session.
    pub async fn revoke_all_by_session(&self, session_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE WHERE session_id = $1 AND NOT revoked",
        )
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke session tokens", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Delete records past their expiry.
    pub async fn delete_expired(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to cleanup refresh tokens", e)
            })?;
        Ok(result.rows_affected())
    }
}
