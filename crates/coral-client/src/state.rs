//! Client-held auth state.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The token tuple a signed-in client holds.
///
/// Overwritten atomically on refresh, cleared on any sign-out path.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthTokens {
    /// Current access token.
    pub access_token: String,
    /// Access token expiry.
    pub access_expires_at: DateTime<Utc>,
    /// Current refresh token.
    pub refresh_token: String,
    /// Refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
    /// The server-side session both tokens belong to.
    pub session_id: Uuid,
    /// Whether the user asked to stay signed in.
    pub remember: bool,
}

impl AuthTokens {
    /// Whether the access token expires within the given buffer.
    pub fn access_expires_within(&self, buffer: chrono::Duration) -> bool {
        self.access_expires_at - Utc::now() <= buffer
    }
}
