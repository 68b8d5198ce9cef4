//! Auth handlers — login, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use coral_core::error::AppError;

use crate::dto::request::{LoginRequest, LogoutRequest, RefreshRequest};
use crate::dto::response::{
    ApiResponse, LoginResponse, MessageResponse, TokenResponse, UserResponse,
};
use crate::extractors::{AuthUser, ClientInfo};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state
        .auth
        .login(
            &req.email,
            &req.password,
            &client.ip_address,
            &client.user_agent,
            req.remember,
        )
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        user: UserResponse::from(outcome.user),
        session_id: outcome.session.id,
        access_token: outcome.tokens.access_token,
        refresh_token: outcome.tokens.refresh_token,
        access_expires_at: outcome.tokens.access_expires_at,
        refresh_expires_at: outcome.tokens.refresh_expires_at,
    })))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    let tokens = state
        .auth
        .refresh(&req.refresh_token, req.session_id)
        .await?;

    Ok(Json(ApiResponse::ok(TokenResponse {
        session_id: req.session_id,
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        access_expires_at: tokens.access_expires_at,
        refresh_expires_at: tokens.refresh_expires_at,
    })))
}

/// POST /api/auth/logout
///
/// The body is `{}` when the client no longer holds a refresh token.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogoutRequest>,
) -> Json<ApiResponse<MessageResponse>> {
    state
        .auth
        .logout(auth.session_id, req.refresh_token.as_deref())
        .await;

    Json(ApiResponse::ok(MessageResponse {
        message: "Signed out".to_string(),
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.auth.get_user(auth.context()).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
