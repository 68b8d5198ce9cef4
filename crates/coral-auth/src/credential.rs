//! User credential store abstraction.
//!
//! The issuance service only needs account lookup and password-hash updates;
//! everything else about user management lives outside this crate. The
//! Postgres implementation wraps the user repository; the in-memory
//! implementation backs the service tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use coral_core::result::AppResult;
use coral_db::repositories::UserRepository;
use coral_entity::user::User;

/// Trait for user credential lookup and password maintenance.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Find a user by sign-in email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by ID.
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;

    /// Replace the stored password hash.
    async fn set_password_hash(&self, user_id: Uuid, password_hash: &str) -> AppResult<()>;

    /// Record a successful sign-in time.
    async fn record_login(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<()>;
}

/// Postgres-backed credential store.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    repo: Arc<UserRepository>,
}

impl PgCredentialStore {
    /// Creates a new store over the user repository.
    pub fn new(repo: Arc<UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repo.find_by_email(email).await
    }

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.repo.find_by_id(user_id).await
    }

    async fn set_password_hash(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        self.repo.set_password_hash(user_id, password_hash).await
    }

    async fn record_login(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        self.repo.update_last_login(user_id, at).await
    }
}

/// In-memory credential store for single-node tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an account and returns it.
    pub async fn add_user(&self, email: &str, password_hash: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            display_name: None,
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
            last_login_at: None,
        };
        self.users.lock().await.insert(user.id, user.clone());
        user
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().await.get(&user_id).cloned())
    }

    async fn set_password_hash(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        if let Some(user) = self.users.lock().await.get_mut(&user_id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }

    async fn record_login(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        if let Some(user) = self.users.lock().await.get_mut(&user_id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }
}
