//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One authenticated device/browser context.
///
/// A session is created at sign-in and deactivated at sign-out, explicit
/// revocation, or a credential change. Deactivation is terminal: a session
/// row is never flipped back to active. Token validity alone never grants
/// access; the guard re-checks this row on every request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier, embedded in tokens as the `sid` claim.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// IP address from which the session was created.
    pub ip_address: String,
    /// User-Agent header value at sign-in.
    pub user_agent: String,
    /// Whether the session is still usable.
    pub active: bool,
    /// When the session was created (sign-in time).
    pub created_at: DateTime<Utc>,
    /// Last authenticated request or token refresh.
    pub last_activity: DateTime<Utc>,
    /// Absolute expiry; cleanup purges the row past this point.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session can still authorize requests.
    pub fn is_active(&self) -> bool {
        self.active && !self.is_expired()
    }

    /// Whether the session has passed its absolute expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
