//! Session store trait and Postgres implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use coral_core::result::AppResult;
use coral_db::repositories::SessionRepository;
use coral_entity::session::Session;

/// Trait for session persistence.
///
/// Server-side session records are the source of truth for revocation:
/// a cryptographically valid token whose session is gone authorizes nothing.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Insert a new active session and return the full record.
    async fn create(
        &self,
        user_id: Uuid,
        ip_address: &str,
        user_agent: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Session>;

    /// Find a session by ID.
    async fn find_by_id(&self, session_id: Uuid) -> AppResult<Option<Session>>;

    /// Update the last-activity timestamp.
    async fn touch_activity(&self, session_id: Uuid) -> AppResult<()>;

    /// Deactivate a session. Returns the number of rows flipped.
    async fn deactivate(&self, session_id: Uuid) -> AppResult<u64>;

    /// Deactivate every active session for a user.
    async fn deactivate_all_for_user(&self, user_id: Uuid) -> AppResult<u64>;

    /// Deactivate every active session for a user except the given one.
    async fn deactivate_others_for_user(
        &self,
        user_id: Uuid,
        keep_session_id: Uuid,
    ) -> AppResult<u64>;

    /// List active sessions for a user, most recently used first.
    async fn list_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<Session>>;

    /// Purge sessions past their absolute expiry. Returns the number removed.
    async fn cleanup_expired(&self) -> AppResult<u64>;
}

/// Postgres-backed session store.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    repo: Arc<SessionRepository>,
}

impl PgSessionStore {
    /// Creates a new store over the session repository.
    pub fn new(repo: Arc<SessionRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(
        &self,
        user_id: Uuid,
        ip_address: &str,
        user_agent: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Session> {
        self.repo
            .create(user_id, ip_address, user_agent, expires_at)
            .await
    }

    async fn find_by_id(&self, session_id: Uuid) -> AppResult<Option<Session>> {
        self.repo.find_by_id(session_id).await
    }

    async fn touch_activity(&self, session_id: Uuid) -> AppResult<()> {
        self.repo.touch(session_id).await
    }

    async fn deactivate(&self, session_id: Uuid) -> AppResult<u64> {
        self.repo.deactivate(session_id).await
    }

    async fn deactivate_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        self.repo.deactivate_all_by_user(user_id).await
    }

    async fn deactivate_others_for_user(
        &self,
        user_id: Uuid,
        keep_session_id: Uuid,
    ) -> AppResult<u64> {
        self.repo
            .deactivate_others_by_user(user_id, keep_session_id)
            .await
    }

    async fn list_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<Session>> {
        self.repo.find_active_by_user(user_id).await
    }

    async fn cleanup_expired(&self) -> AppResult<u64> {
        self.repo.delete_expired(Utc::now()).await
    }
}
