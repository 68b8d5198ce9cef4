//! Session self-service handlers — list and revoke.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use coral_core::error::AppError;

use crate::dto::response::{ApiResponse, RevokedResponse, SessionResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/auth/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<SessionResponse>>>, AppError> {
    let sessions = state.auth.list_sessions(auth.context()).await?;

    let responses = sessions
        .into_iter()
        .map(|s| SessionResponse::from_session(s, auth.session_id))
        .collect();

    Ok(Json(ApiResponse::ok(responses)))
}

/// DELETE /api/auth/sessions/{id}
pub async fn revoke_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApiResponse<RevokedResponse>>, AppError> {
    let result = state.auth.revoke_session(auth.context(), session_id).await?;

    Ok(Json(ApiResponse::ok(RevokedResponse {
        revoked: result.revoked,
        current_session_revoked: result.current_session_revoked,
    })))
}

/// POST /api/auth/sessions/revoke-others
pub async fn revoke_other_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<RevokedResponse>>, AppError> {
    let result = state.auth.revoke_other_sessions(auth.context()).await?;

    Ok(Json(ApiResponse::ok(RevokedResponse {
        revoked: result.revoked,
        current_session_revoked: result.current_session_revoked,
    })))
}

/// POST /api/auth/sessions/revoke-all
pub async fn revoke_all_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<RevokedResponse>>, AppError> {
    let result = state.auth.revoke_all_sessions(auth.context()).await?;

    Ok(Json(ApiResponse::ok(RevokedResponse {
        revoked: result.revoked,
        current_session_revoked: result.current_session_revoked,
    })))
}
