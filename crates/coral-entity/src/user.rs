//! Console user account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A console user account.
///
/// Accounts are looked up by email at sign-in. The password hash is an
/// Argon2id PHC string and never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Sign-in email, unique.
    pub email: String,
    /// Display name shown in the console header.
    pub display_name: Option<String>,
    /// Argon2id hash of the password.
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Last successful sign-in.
    pub last_login_at: Option<DateTime<Utc>>,
}
