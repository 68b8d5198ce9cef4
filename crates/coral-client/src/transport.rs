//! Refresh transport: the HTTP call behind the coordinator.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use coral_core::error::AppError;
use coral_core::result::AppResult;

/// Tokens granted by a successful refresh.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    /// New access token.
    pub access_token: String,
    /// New access token expiry.
    pub access_expires_at: DateTime<Utc>,
    /// New refresh token.
    pub refresh_token: String,
    /// New refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
    /// The session the pair belongs to.
    pub session_id: Uuid,
}

/// Trait for the server call that rotates a refresh token.
#[async_trait]
pub trait AuthTransport: Send + Sync + 'static {
    /// Redeems a refresh token for a new pair.
    async fn refresh(&self, refresh_token: &str, session_id: Uuid) -> AppResult<TokenGrant>;
}

/// Reqwest-backed transport against the console API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: WireGrant,
}

#[derive(Debug, Deserialize)]
struct WireGrant {
    session_id: Uuid,
    access_token: String,
    refresh_token: String,
    access_expires_at: DateTime<Utc>,
    refresh_expires_at: DateTime<Utc>,
}

impl HttpTransport {
    /// Creates a transport for a console base URL with a request timeout.
    pub fn new(base_url: &str, timeout_seconds: u64) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AuthTransport for HttpTransport {
    async fn refresh(&self, refresh_token: &str, session_id: Uuid) -> AppResult<TokenGrant> {
        let response = self
            .client
            .post(format!("{}/api/auth/refresh", self.base_url))
            .json(&serde_json::json!({
                "refresh_token": refresh_token,
                "session_id": session_id,
            }))
            .send()
            .await
            .map_err(|e| {
                AppError::service_unavailable(format!("Refresh request failed: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(AppError::unauthorized("Session refresh failed"));
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Malformed refresh response: {e}")))?;

        Ok(TokenGrant {
            access_token: envelope.data.access_token,
            access_expires_at: envelope.data.access_expires_at,
            refresh_token: envelope.data.refresh_token,
            refresh_expires_at: envelope.data.refresh_expires_at,
            session_id: envelope.data.session_id,
        })
    }
}
