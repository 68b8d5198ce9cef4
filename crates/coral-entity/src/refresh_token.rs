//! Refresh token record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One still-redeemable refresh credential.
///
/// The token itself is a signed JWT held only by the client; the server
/// keeps a SHA-256 hash as the lookup key. Redemption revokes the record
/// and stores a fresh one ("rotate on use"); revocation is terminal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshTokenRecord {
    /// Record identifier.
    pub id: Uuid,
    /// The user the token was issued to.
    pub user_id: Uuid,
    /// The session the token is bound to.
    pub session_id: Uuid,
    /// SHA-256 hex digest of the signed token string.
    pub token_hash: String,
    /// Whether the token has been revoked.
    pub revoked: bool,
    /// Token expiry, mirroring the `exp` claim.
    pub expires_at: DateTime<Utc>,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Whether the token has passed its expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Whether the token can still be redeemed.
    pub fn is_valid(&self) -> bool {
        !self.revoked && !self.is_expired()
    }
}
