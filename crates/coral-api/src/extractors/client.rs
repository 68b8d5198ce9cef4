//! Client connection metadata extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use coral_core::error::AppError;

use crate::state::AppState;

/// IP address and User-Agent of the requesting client.
///
/// The IP is taken from the first `x-forwarded-for` entry, as populated by
/// the reverse proxy in front of the console.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    /// Client IP address, or `"unknown"`.
    pub ip_address: String,
    /// Raw User-Agent header, or empty.
    pub user_agent: String,
}

impl FromRequestParts<AppState> for ClientInfo {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            ip_address,
            user_agent,
        })
    }
}
