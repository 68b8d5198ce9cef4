//! In-memory refresh-token store for single-node deployments and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use coral_core::result::AppResult;
use coral_entity::refresh_token::RefreshTokenRecord;

use super::store::{RefreshTokenStore, token_digest};

/// In-memory refresh-token store keyed by token digest.
///
/// Every operation runs under one mutex, so `consume` has the same
/// one-winner guarantee as the conditional SQL update.
#[derive(Debug, Default)]
pub struct MemoryRefreshTokenStore {
    records: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl MemoryRefreshTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn store(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let record = RefreshTokenRecord {
            id: Uuid::new_v4(),
            user_id,
            session_id,
            token_hash: token_digest(token),
            revoked: false,
            expires_at,
            created_at: Utc::now(),
        };
        self.records
            .lock()
            .await
            .insert(record.token_hash.clone(), record);
        Ok(())
    }

    async fn validate(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>> {
        let records = self.records.lock().await;
        Ok(records
            .get(&token_digest(token))
            .filter(|r| r.is_valid())
            .cloned())
    }

    async fn consume(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>> {
        let mut records = self.records.lock().await;
        match records.get_mut(&token_digest(token)) {
            Some(record) if record.is_valid() => {
                record.revoked = true;
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn revoke(&self, token: &str) -> AppResult<bool> {
        let mut records = self.records.lock().await;
        match records.get_mut(&token_digest(token)) {
            Some(record) if !record.revoked => {
                record.revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let mut revoked = 0u64;
        for record in records.values_mut() {
            if record.user_id == user_id && !record.revoked {
                record.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn revoke_all_for_user_except(
        &self,
        user_id: Uuid,
        keep_session_id: Uuid,
    ) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let mut revoked = 0u64;
        for record in records.values_mut() {
            if record.user_id == user_id && record.session_id != keep_session_id && !record.revoked
            {
                record.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn revoke_all_for_session(&self, session_id: Uuid) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let mut revoked = 0u64;
        for record in records.values_mut() {
            if record.session_id == session_id && !record.revoked {
                record.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn cleanup_expired(&self) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, r| !r.is_expired());
        Ok((before - records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn test_consume_is_single_use() {
        let store = MemoryRefreshTokenStore::new();
        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        store
            .store(user_id, session_id, "tok", Utc::now() + Duration::hours(1))
            .await
            .unwrap();

        let first = store.consume("tok").await.unwrap();
        assert!(first.is_some());
        assert_eq!(first.unwrap().session_id, session_id);

        let second = store.consume("tok").await.unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_expired_token_is_not_redeemable() {
        let store = MemoryRefreshTokenStore::new();
        store
            .store(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "tok",
                Utc::now() - Duration::seconds(1),
            )
            .await
            .unwrap();

        assert!(store.validate("tok").await.unwrap().is_none());
        assert!(store.consume("tok").await.unwrap().is_none());
        assert_eq!(store.cleanup_expired().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_revoke_all_for_user_except_keeps_current_session() {
        let store = MemoryRefreshTokenStore::new();
        let user_id = Uuid::new_v4();
        let current = Uuid::new_v4();
        let other = Uuid::new_v4();
        let exp = Utc::now() + Duration::hours(1);

        store.store(user_id, current, "tok-a", exp).await.unwrap();
        store.store(user_id, other, "tok-b", exp).await.unwrap();

        let revoked = store
            .revoke_all_for_user_except(user_id, current)
            .await
            .unwrap();
        assert_eq!(revoked, 1);
        assert!(store.validate("tok-a").await.unwrap().is_some());
        assert!(store.validate("tok-b").await.unwrap().is_none());
    }
}
