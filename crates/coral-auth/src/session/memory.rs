//! In-memory session store for single-node deployments and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use coral_core::result::AppResult;
use coral_entity::session::Session;

use super::store::SessionStore;

/// In-memory session store behind a Tokio mutex.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(
        &self,
        user_id: Uuid,
        ip_address: &str,
        user_agent: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Session> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            ip_address: ip_address.to_string(),
            user_agent: user_agent.to_string(),
            active: true,
            created_at: now,
            last_activity: now,
            expires_at,
        };
        self.sessions
            .lock()
            .await
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_id(&self, session_id: Uuid) -> AppResult<Option<Session>> {
        Ok(self.sessions.lock().await.get(&session_id).cloned())
    }

    async fn touch_activity(&self, session_id: Uuid) -> AppResult<()> {
        if let Some(session) = self.sessions.lock().await.get_mut(&session_id) {
            session.last_activity = Utc::now();
        }
        Ok(())
    }

    async fn deactivate(&self, session_id: Uuid) -> AppResult<u64> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(&session_id) {
            Some(session) if session.active => {
                session.active = false;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn deactivate_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let mut sessions = self.sessions.lock().await;
        let mut flipped = 0u64;
        for session in sessions.values_mut() {
            if session.user_id == user_id && session.active {
                session.active = false;
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    async fn deactivate_others_for_user(
        &self,
        user_id: Uuid,
        keep_session_id: Uuid,
    ) -> AppResult<u64> {
        let mut sessions = self.sessions.lock().await;
        let mut flipped = 0u64;
        for session in sessions.values_mut() {
            if session.user_id == user_id && session.id != keep_session_id && session.active {
                session.active = false;
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    async fn list_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<Session>> {
        let sessions = self.sessions.lock().await;
        let mut active: Vec<Session> = sessions
            .values()
            .filter(|s| s.user_id == user_id && s.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        Ok(active)
    }

    async fn cleanup_expired(&self) -> AppResult<u64> {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        Ok((before - sessions.len()) as u64)
    }
}
