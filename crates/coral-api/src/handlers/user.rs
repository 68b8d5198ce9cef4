//! Account self-service handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use coral_core::error::AppError;

use crate::dto::request::ChangePasswordRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// PUT /api/users/me/password
///
/// A successful change flushes every session and refresh token for the
/// account, the caller's own included; the client must sign itself out.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .auth
        .change_password(auth.context(), &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password changed; all sessions signed out".to_string(),
    })))
}
