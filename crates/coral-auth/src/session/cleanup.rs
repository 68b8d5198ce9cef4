//! Expired session and refresh-token sweeping.

use std::sync::Arc;

use tracing::{debug, error};

use crate::token::RefreshTokenStore;

use super::store::SessionStore;

/// Purges expired sessions and refresh tokens.
///
/// Invoked fire-and-forget after sign-in and on a periodic interval; a
/// failed sweep is logged and never surfaces to the triggering request.
#[derive(Clone)]
pub struct ExpirySweeper {
    /// Session persistence.
    sessions: Arc<dyn SessionStore>,
    /// Refresh-token persistence.
    refresh_tokens: Arc<dyn RefreshTokenStore>,
}

impl std::fmt::Debug for ExpirySweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpirySweeper").finish()
    }
}

impl ExpirySweeper {
    /// Creates a new sweeper over both stores.
    pub fn new(sessions: Arc<dyn SessionStore>, refresh_tokens: Arc<dyn RefreshTokenStore>) -> Self {
        Self {
            sessions,
            refresh_tokens,
        }
    }

    /// Runs one sweep. Returns the number of sessions and tokens purged.
    pub async fn run(&self) -> (u64, u64) {
        let sessions = match self.sessions.cleanup_expired().await {
            Ok(count) => count,
            Err(e) => {
                error!(error = %e, "Session cleanup failed");
                0
            }
        };

        let tokens = match self.refresh_tokens.cleanup_expired().await {
            Ok(count) => count,
            Err(e) => {
                error!(error = %e, "Refresh token cleanup failed");
                0
            }
        };

        if sessions > 0 || tokens > 0 {
            debug!(sessions, tokens, "Expiry sweep removed stale records");
        }

        (sessions, tokens)
    }

    /// Runs a sweep on a background task without blocking the caller.
    pub fn spawn(&self) {
        let sweeper = self.clone();
        tokio::spawn(async move {
            sweeper.run().await;
        });
    }
}
