//! Refresh-token store trait and Postgres implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use coral_core::result::AppResult;
use coral_db::repositories::RefreshTokenRepository;
use coral_entity::refresh_token::RefreshTokenRecord;

/// SHA-256 hex digest of a signed token string; the at-rest lookup key.
pub fn token_digest(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{digest:x}")
}

/// Trait for refresh-token persistence.
///
/// `consume` is the redemption primitive: revoke-where-still-valid in one
/// conditional update, so two concurrent redemptions of the same token can
/// never both succeed. The read-only `validate` exists for callers that must
/// not burn the token.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + 'static {
    /// Persist a newly issued token.
    async fn store(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Return the record if the token is unrevoked and unexpired.
    async fn validate(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>>;

    /// Atomically revoke a still-valid token and return its record.
    /// Returns `None` if the token was unknown, already revoked, or expired.
    async fn consume(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>>;

    /// Revoke a token. Returns whether this call revoked it.
    async fn revoke(&self, token: &str) -> AppResult<bool>;

    /// Revoke every valid token for a user.
    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64>;

    /// Revoke every valid token for a user except those of one session.
    async fn revoke_all_for_user_except(
        &self,
        user_id: Uuid,
        keep_session_id: Uuid,
    ) -> AppResult<u64>;

    /// Revoke every valid token bound to a session.
    async fn revoke_all_for_session(&self, session_id: Uuid) -> AppResult<u64>;

    /// Purge expired records. Returns the number removed.
    async fn cleanup_expired(&self) -> AppResult<u64>;
}

/// Postgres-backed refresh-token store.
#[derive(Debug, Clone)]
pub struct PgRefreshTokenStore {
    repo: Arc<RefreshTokenRepository>,
}

impl PgRefreshTokenStore {
    /// Creates a new store over the refresh-token repository.
    pub fn new(repo: Arc<RefreshTokenRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    async fn store(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.repo
            .insert(user_id, session_id, &token_digest(token), expires_at)
            .await?;
        Ok(())
    }

    async fn validate(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>> {
        self.repo.find_valid(&token_digest(token)).await
    }

    async fn consume(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>> {
        self.repo.consume(&token_digest(token)).await
    }

    async fn revoke(&self, token: &str) -> AppResult<bool> {
        self.repo.revoke(&token_digest(token)).await
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        self.repo.revoke_all_by_user(user_id).await
    }

    async fn revoke_all_for_user_except(
        &self,
        user_id: Uuid,
        keep_session_id: Uuid,
    ) -> AppResult<u64> {
        self.repo
            .revoke_all_by_user_except(user_id, keep_session_id)
            .await
    }

    async fn revoke_all_for_session(&self, session_id: Uuid) -> AppResult<u64> {
        self.repo.revoke_all_by_session(session_id).await
    }

    async fn cleanup_expired(&self) -> AppResult<u64> {
        self.repo.delete_expired(Utc::now()).await
    }
}
