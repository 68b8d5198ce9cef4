//! Outbound request token coordination with single-flight refresh.

use std::sync::Arc;

use chrono::Duration;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;
use tracing::debug;

use coral_core::error::AppError;
use coral_core::result::AppResult;

use crate::state::AuthTokens;
use crate::store::{ClientSessionStore, SignOutReason};
use crate::transport::AuthTransport;

/// Default safety buffer: refresh when the access token expires within this
/// many seconds.
const DEFAULT_REFRESH_BUFFER_SECONDS: i64 = 60;

type RefreshFuture = Shared<BoxFuture<'static, Result<(), AppError>>>;

/// Coordinates access-token attachment and refresh for outbound requests.
///
/// However many requests notice an expiring token at once, only one refresh
/// call reaches the server: concurrent callers attach to the same in-flight
/// future and share its outcome. The in-flight slot is cleared by the
/// refresh future itself, so no outcome can leave it wedged.
pub struct TokenCoordinator {
    store: Arc<ClientSessionStore>,
    transport: Arc<dyn AuthTransport>,
    refresh_buffer: Duration,
    in_flight: Arc<Mutex<Option<RefreshFuture>>>,
}

impl std::fmt::Debug for TokenCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCoordinator")
            .field("refresh_buffer", &self.refresh_buffer)
            .finish()
    }
}

impl TokenCoordinator {
    /// Creates a coordinator over a session store and transport.
    pub fn new(store: Arc<ClientSessionStore>, transport: Arc<dyn AuthTransport>) -> Self {
        Self {
            store,
            transport,
            refresh_buffer: Duration::seconds(DEFAULT_REFRESH_BUFFER_SECONDS),
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// Overrides the expiry safety buffer.
    pub fn with_refresh_buffer(mut self, seconds: i64) -> Self {
        self.refresh_buffer = Duration::seconds(seconds);
        self
    }

    /// Returns the bearer token to attach to an outbound request.
    ///
    /// - Signed out: `Ok(None)` — send unauthenticated.
    /// - Token fresh: the current access token.
    /// - Token within the buffer: refresh (single-flight), then the rotated
    ///   access token.
    /// - Refresh failed: the store has already transitioned to signed-out.
    pub async fn bearer_token(&self) -> AppResult<Option<String>> {
        let Some(tokens) = self.store.current() else {
            return Ok(None);
        };

        if !tokens.access_expires_within(self.refresh_buffer) {
            return Ok(Some(tokens.access_token));
        }

        self.refresh().await?;

        let tokens = self
            .store
            .current()
            .ok_or_else(|| AppError::unauthorized("Session expired"))?;
        Ok(Some(tokens.access_token))
    }

    /// Performs (or joins) the single in-flight refresh.
    pub async fn refresh(&self) -> AppResult<()> {
        let shared = {
            let mut slot = self.in_flight.lock().await;
            match slot.as_ref() {
                Some(existing) => {
                    debug!("Joining in-flight token refresh");
                    existing.clone()
                }
                None => {
                    let store = Arc::clone(&self.store);
                    let transport = Arc::clone(&self.transport);
                    let in_flight = Arc::clone(&self.in_flight);

                    let fut = async move {
                        let result = run_refresh(store, transport).await;
                        // Clear the slot before any awaiter observes the
                        // outcome, on success and failure alike.
                        *in_flight.lock().await = None;
                        result
                    }
                    .boxed()
                    .shared();

                    *slot = Some(fut.clone());
                    fut
                }
            }
        };

        shared.await
    }

    /// Handles a response status from the server.
    ///
    /// A 401 means the session died between token checks (revoked
    /// server-side mid-flight); treat it exactly like a refresh failure.
    pub fn on_response_status(&self, status: u16) {
        if status == 401 {
            self.store.sign_out(SignOutReason::SessionExpired);
        }
    }
}

/// The actual refresh: redeem the held refresh token, replace the tuple on
/// success, transition to signed-out on failure.
async fn run_refresh(
    store: Arc<ClientSessionStore>,
    transport: Arc<dyn AuthTransport>,
) -> AppResult<()> {
    let Some(tokens) = store.current() else {
        return Err(AppError::unauthorized("No session to refresh"));
    };

    match transport
        .refresh(&tokens.refresh_token, tokens.session_id)
        .await
    {
        Ok(grant) => {
            store.set_tokens(AuthTokens {
                access_token: grant.access_token,
                access_expires_at: grant.access_expires_at,
                refresh_token: grant.refresh_token,
                refresh_expires_at: grant.refresh_expires_at,
                session_id: grant.session_id,
                remember: tokens.remember,
            });
            Ok(())
        }
        Err(e) => {
            debug!(error = %e, "Token refresh failed, signing out");
            store.sign_out(SignOutReason::SessionExpired);
            Err(e)
        }
    }
}
