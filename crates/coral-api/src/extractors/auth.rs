//! `AuthUser` extractor — the server-side request guard.
//!
//! Pulls the bearer token from the Authorization header, verifies it as an
//! access token, re-checks the referenced session against the session store,
//! and injects the caller's identity. A token whose session has been revoked
//! is rejected here regardless of its own validity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use coral_auth::session::manager::AuthContext;
use coral_core::error::AppError;

use crate::state::AppState;

/// Extracted authenticated identity available in handlers.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub AuthContext);

impl AuthUser {
    /// Returns the inner context.
    pub fn context(&self) -> &AuthContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = AuthContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let ctx = state.auth.authenticate(token).await?;

        Ok(AuthUser(ctx))
    }
}
