//! Issuance service — login, refresh, logout, and revocation flows.
//!
//! This is the single place server-side auth state is mutated. Handlers and
//! the request guard call into it; the stores are never written elsewhere.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use coral_core::error::AppError;
use coral_core::result::AppResult;
use coral_entity::session::Session;
use coral_entity::user::User;

use crate::credential::CredentialStore;
use crate::fingerprint::audience_fingerprint;
use crate::jwt::encoder::TokenPair;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;
use crate::token::RefreshTokenStore;

use super::cleanup::ExpirySweeper;
use super::store::SessionStore;

/// Response text for any credential failure at sign-in. Unknown email and
/// wrong password must be indistinguishable to the caller.
const LOGIN_FAILED: &str = "Invalid email or password";

/// Response text for any refresh failure. The caller learns that refresh
/// failed, never why.
const REFRESH_FAILED: &str = "Session refresh failed";

/// Identity attached to a request after the guard accepts it.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    /// The authenticated user.
    pub user_id: Uuid,
    /// The session the presented token belongs to.
    pub session_id: Uuid,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// Created session.
    pub session: Session,
    /// Generated token pair.
    pub tokens: TokenPair,
}

/// Result of a self-service session revocation.
#[derive(Debug, Clone, Copy)]
pub struct SessionRevocation {
    /// Number of sessions deactivated.
    pub revoked: u64,
    /// Whether the caller's own session was among them; the client must
    /// follow up with a forced sign-out.
    pub current_session_revoked: bool,
}

/// Orchestrates the session and token lifecycle.
#[derive(Clone)]
pub struct AuthManager {
    /// JWT encoder for token issuance.
    encoder: Arc<JwtEncoder>,
    /// JWT decoder for token verification.
    decoder: Arc<JwtDecoder>,
    /// Session persistence.
    sessions: Arc<dyn SessionStore>,
    /// Refresh-token persistence.
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    /// User credential store.
    credentials: Arc<dyn CredentialStore>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Expiry sweeper for opportunistic cleanup.
    sweeper: ExpirySweeper,
    /// Minimum length accepted for new passwords.
    password_min_length: usize,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager").finish()
    }
}

impl AuthManager {
    /// Creates a new manager with all required dependencies.
    pub fn new(
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        sessions: Arc<dyn SessionStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        credentials: Arc<dyn CredentialStore>,
        password_hasher: Arc<PasswordHasher>,
        password_min_length: usize,
    ) -> Self {
        let sweeper = ExpirySweeper::new(Arc::clone(&sessions), Arc::clone(&refresh_tokens));
        Self {
            encoder,
            decoder,
            sessions,
            refresh_tokens,
            credentials,
            password_hasher,
            sweeper,
            password_min_length,
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Look up the account and verify the password
    /// 2. Create a session with the granted refresh horizon
    /// 3. Mint the token pair bound to the session and agent fingerprint
    /// 4. Persist the refresh token
    /// 5. Kick off an expiry sweep without blocking the response
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip_address: &str,
        user_agent: &str,
        remember: bool,
    ) -> AppResult<LoginOutcome> {
        let user = match self.credentials.find_by_email(email).await? {
            Some(user) => user,
            None => {
                warn!(email = %email, reason = "unknown_email", "Login rejected");
                return Err(AppError::unauthorized(LOGIN_FAILED));
            }
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;
        if !password_valid {
            warn!(email = %email, reason = "bad_password", "Login rejected");
            return Err(AppError::unauthorized(LOGIN_FAILED));
        }

        let expires_at = Utc::now() + self.encoder.refresh_ttl(remember);
        let session = self
            .sessions
            .create(user.id, ip_address, user_agent, expires_at)
            .await?;

        let audience = audience_fingerprint(user_agent);
        let tokens = self
            .encoder
            .issue_pair(user.id, session.id, &audience, expires_at)?;

        self.refresh_tokens
            .store(
                user.id,
                session.id,
                &tokens.refresh_token,
                tokens.refresh_expires_at,
            )
            .await?;

        if let Err(e) = self.credentials.record_login(user.id, Utc::now()).await {
            warn!(user_id = %user.id, error = %e, "Failed to record login time");
        }

        self.sweeper.spawn();

        info!(
            user_id = %user.id,
            session_id = %session.id,
            remember,
            "Login successful"
        );

        Ok(LoginOutcome {
            user,
            session,
            tokens,
        })
    }

    /// Authenticates a bearer access token for a protected request.
    ///
    /// Token validity alone is insufficient: the referenced session must
    /// still exist, be active, and belong to the token's subject. Activity
    /// is touched on a background task so a slow store never stalls the
    /// request.
    pub async fn authenticate(&self, token: &str) -> AppResult<AuthContext> {
        let claims = self.decoder.decode_access_token(token)?;

        let session = self
            .sessions
            .find_by_id(claims.session_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Session is no longer active"))?;

        if !session.is_active() {
            return Err(AppError::unauthorized("Session is no longer active"));
        }

        if session.user_id != claims.user_id() {
            return Err(AppError::forbidden("Session does not belong to this user"));
        }

        let sessions = Arc::clone(&self.sessions);
        let session_id = session.id;
        tokio::spawn(async move {
            if let Err(e) = sessions.touch_activity(session_id).await {
                warn!(session_id = %session_id, error = %e, "Failed to touch session activity");
            }
        });

        Ok(AuthContext {
            user_id: claims.user_id(),
            session_id: claims.session_id(),
        })
    }

    /// Rotates a refresh token and reissues the pair.
    ///
    /// The presented token is redeemed atomically (`consume`): of any number
    /// of concurrent redemptions exactly one proceeds. Every failure mode
    /// collapses into one uniform error.
    pub async fn refresh(&self, refresh_token: &str, session_id: Uuid) -> AppResult<TokenPair> {
        let claims = self
            .decoder
            .decode_refresh_token(refresh_token)
            .map_err(|_| AppError::unauthorized(REFRESH_FAILED))?;

        if claims.session_id() != session_id {
            warn!(session_id = %session_id, reason = "session_mismatch", "Refresh rejected");
            return Err(AppError::unauthorized(REFRESH_FAILED));
        }

        let record = match self.refresh_tokens.consume(refresh_token).await? {
            Some(record) => record,
            None => {
                warn!(session_id = %session_id, reason = "unknown_or_rotated", "Refresh rejected");
                return Err(AppError::unauthorized(REFRESH_FAILED));
            }
        };

        if record.session_id != session_id || record.user_id != claims.user_id() {
            warn!(session_id = %session_id, reason = "record_mismatch", "Refresh rejected");
            return Err(AppError::unauthorized(REFRESH_FAILED));
        }

        let session = match self.sessions.find_by_id(session_id).await? {
            Some(session) if session.is_active() && session.user_id == record.user_id => session,
            _ => {
                warn!(session_id = %session_id, reason = "inactive_session", "Refresh rejected");
                return Err(AppError::unauthorized(REFRESH_FAILED));
            }
        };

        // Rotation reuses the session and its absolute horizon; a refreshed
        // pair never outlives the session it belongs to.
        let tokens = self.encoder.issue_pair(
            record.user_id,
            session_id,
            &claims.aud,
            session.expires_at,
        )?;

        self.refresh_tokens
            .store(
                record.user_id,
                session_id,
                &tokens.refresh_token,
                tokens.refresh_expires_at,
            )
            .await?;

        if let Err(e) = self.sessions.touch_activity(session_id).await {
            warn!(session_id = %session_id, error = %e, "Failed to touch session activity");
        }

        info!(user_id = %record.user_id, session_id = %session_id, "Token refreshed");

        Ok(tokens)
    }

    /// Signs a session out.
    ///
    /// Everything here is best-effort: signing out must never hard-fail the
    /// client, even when the stores are unhappy.
    pub async fn logout(&self, session_id: Uuid, refresh_token: Option<&str>) {
        if let Some(token) = refresh_token {
            if let Err(e) = self.refresh_tokens.revoke(token).await {
                warn!(session_id = %session_id, error = %e, "Failed to revoke refresh token at logout");
            }
        }

        if let Err(e) = self.refresh_tokens.revoke_all_for_session(session_id).await {
            warn!(session_id = %session_id, error = %e, "Failed to revoke session tokens at logout");
        }

        match self.sessions.deactivate(session_id).await {
            Ok(_) => info!(session_id = %session_id, "Logout completed"),
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Failed to deactivate session at logout")
            }
        }
    }

    /// Lists the caller's active sessions, most recently used first.
    pub async fn list_sessions(&self, ctx: &AuthContext) -> AppResult<Vec<Session>> {
        self.sessions.list_active_for_user(ctx.user_id).await
    }

    /// Revokes one of the caller's sessions.
    ///
    /// Revoking the current session signs the caller out; the response tells
    /// the client so it can clear its own state.
    pub async fn revoke_session(
        &self,
        ctx: &AuthContext,
        target_session_id: Uuid,
    ) -> AppResult<SessionRevocation> {
        let session = self
            .sessions
            .find_by_id(target_session_id)
            .await?
            .ok_or_else(|| AppError::not_found("Session not found"))?;

        if session.user_id != ctx.user_id {
            return Err(AppError::forbidden("Session belongs to another user"));
        }

        let revoked = self.sessions.deactivate(target_session_id).await?;
        self.refresh_tokens
            .revoke_all_for_session(target_session_id)
            .await?;

        info!(
            user_id = %ctx.user_id,
            session_id = %target_session_id,
            "Session revoked"
        );

        Ok(SessionRevocation {
            revoked,
            current_session_revoked: target_session_id == ctx.session_id,
        })
    }

    /// Revokes every session of the caller except the current one.
    pub async fn revoke_other_sessions(&self, ctx: &AuthContext) -> AppResult<SessionRevocation> {
        let revoked = self
            .sessions
            .deactivate_others_for_user(ctx.user_id, ctx.session_id)
            .await?;
        self.refresh_tokens
            .revoke_all_for_user_except(ctx.user_id, ctx.session_id)
            .await?;

        info!(user_id = %ctx.user_id, revoked, "Other sessions revoked");

        Ok(SessionRevocation {
            revoked,
            current_session_revoked: false,
        })
    }

    /// Revokes every session of the caller, the current one included.
    pub async fn revoke_all_sessions(&self, ctx: &AuthContext) -> AppResult<SessionRevocation> {
        let revoked = self.sessions.deactivate_all_for_user(ctx.user_id).await?;
        self.refresh_tokens
            .revoke_all_for_user(ctx.user_id)
            .await?;

        info!(user_id = %ctx.user_id, revoked, "All sessions revoked");

        Ok(SessionRevocation {
            revoked,
            current_session_revoked: true,
        })
    }

    /// Changes the caller's password and flushes every logged-in context.
    ///
    /// The flush is unconditional and includes the session that made the
    /// change: a credential change invalidates everything, everywhere.
    pub async fn change_password(
        &self,
        ctx: &AuthContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self
            .credentials
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account is no longer available"))?;

        let current_valid = self
            .password_hasher
            .verify_password(current_password, &user.password_hash)?;
        if !current_valid {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        if new_password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let new_hash = self.password_hasher.hash_password(new_password)?;
        self.credentials
            .set_password_hash(ctx.user_id, &new_hash)
            .await?;

        let tokens_revoked = self.refresh_tokens.revoke_all_for_user(ctx.user_id).await?;
        let sessions_revoked = self.sessions.deactivate_all_for_user(ctx.user_id).await?;

        info!(
            user_id = %ctx.user_id,
            sessions_revoked,
            tokens_revoked,
            "Password changed, all sessions flushed"
        );

        Ok(())
    }

    /// Looks up the caller's account.
    pub async fn get_user(&self, ctx: &AuthContext) -> AppResult<User> {
        self.credentials
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Returns the expiry sweeper for scheduled sweeps.
    pub fn sweeper(&self) -> &ExpirySweeper {
        &self.sweeper
    }
}

#[cfg(test)]
mod tests {
    use coral_core::config::auth::AuthConfig;
    use coral_core::error::ErrorKind;

    use crate::credential::MemoryCredentialStore;
    use crate::session::memory::MemorySessionStore;
    use crate::token::MemoryRefreshTokenStore;

    use super::*;

    const AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:133.0) Gecko/20100101 Firefox/133.0";

    struct Harness {
        manager: AuthManager,
        credentials: Arc<MemoryCredentialStore>,
    }

    async fn harness() -> Harness {
        let config = AuthConfig {
            jwt_secret: "manager-test-secret".to_string(),
            ..AuthConfig::default()
        };

        let hasher = Arc::new(PasswordHasher::new());
        let credentials = Arc::new(MemoryCredentialStore::new());

        let manager = AuthManager::new(
            Arc::new(JwtEncoder::new(&config).unwrap()),
            Arc::new(JwtDecoder::new(&config).unwrap()),
            Arc::new(MemorySessionStore::new()),
            Arc::new(MemoryRefreshTokenStore::new()),
            Arc::clone(&credentials) as Arc<dyn CredentialStore>,
            Arc::clone(&hasher),
            config.password_min_length,
        );

        Harness {
            manager,
            credentials,
        }
    }

    async fn signed_in(h: &Harness) -> LoginOutcome {
        let hash = PasswordHasher::new().hash_password("swordfish123").unwrap();
        let user = h.credentials.add_user("dana@example.com", &hash).await;
        h.manager
            .login(&user.email, "swordfish123", "10.0.0.7", AGENT, false)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_binds_tokens_to_session() {
        let h = harness().await;
        let outcome = signed_in(&h).await;

        let decoder = JwtDecoder::new(&AuthConfig {
            jwt_secret: "manager-test-secret".to_string(),
            ..AuthConfig::default()
        })
        .unwrap();

        let access = decoder
            .decode_access_token(&outcome.tokens.access_token)
            .unwrap();
        assert_eq!(access.session_id(), outcome.session.id);
        assert_eq!(access.user_id(), outcome.user.id);

        let refresh = decoder
            .decode_refresh_token(&outcome.tokens.refresh_token)
            .unwrap();
        assert_eq!(refresh.session_id(), outcome.session.id);
    }

    #[tokio::test]
    async fn test_login_failure_is_uniform() {
        let h = harness().await;
        let hash = PasswordHasher::new().hash_password("swordfish123").unwrap();
        h.credentials.add_user("dana@example.com", &hash).await;

        let unknown = h
            .manager
            .login("nobody@example.com", "swordfish123", "10.0.0.7", AGENT, false)
            .await
            .unwrap_err();
        let wrong = h
            .manager
            .login("dana@example.com", "wrong-password", "10.0.0.7", AGENT, false)
            .await
            .unwrap_err();

        assert_eq!(unknown.kind, ErrorKind::Unauthorized);
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn test_authenticate_accepts_live_session() {
        let h = harness().await;
        let outcome = signed_in(&h).await;

        let ctx = h
            .manager
            .authenticate(&outcome.tokens.access_token)
            .await
            .unwrap();
        assert_eq!(ctx.user_id, outcome.user.id);
        assert_eq!(ctx.session_id, outcome.session.id);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_deactivated_session() {
        let h = harness().await;
        let outcome = signed_in(&h).await;
        let ctx = AuthContext {
            user_id: outcome.user.id,
            session_id: outcome.session.id,
        };

        h.manager.revoke_session(&ctx, outcome.session.id).await.unwrap();

        // The access token is still cryptographically valid; the session
        // lookup is what rejects it.
        let err = h
            .manager
            .authenticate(&outcome.tokens.access_token)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_refresh_rotates_and_rejects_replay() {
        let h = harness().await;
        let outcome = signed_in(&h).await;
        let session_id = outcome.session.id;

        let rotated = h
            .manager
            .refresh(&outcome.tokens.refresh_token, session_id)
            .await
            .unwrap();
        assert_ne!(rotated.refresh_token, outcome.tokens.refresh_token);

        // Replaying the consumed token fails uniformly.
        let err = h
            .manager
            .refresh(&outcome.tokens.refresh_token, session_id)
            .await
            .unwrap_err();
        assert_eq!(err.message, REFRESH_FAILED);

        // The rotated token still works.
        h.manager
            .refresh(&rotated.refresh_token, session_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_refresh_has_one_winner() {
        let h = harness().await;
        let outcome = signed_in(&h).await;
        let session_id = outcome.session.id;
        let token = outcome.tokens.refresh_token;

        let (a, b) = tokio::join!(
            h.manager.refresh(&token, session_id),
            h.manager.refresh(&token, session_id),
        );

        assert_eq!(
            a.is_ok() as u8 + b.is_ok() as u8,
            1,
            "exactly one concurrent redemption may succeed"
        );
    }

    #[tokio::test]
    async fn test_refresh_rejects_session_mismatch() {
        let h = harness().await;
        let outcome = signed_in(&h).await;

        let err = h
            .manager
            .refresh(&outcome.tokens.refresh_token, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.message, REFRESH_FAILED);

        // The mismatch fails before redemption, so the token survives.
        h.manager
            .refresh(&outcome.tokens.refresh_token, outcome.session.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let h = harness().await;
        let outcome = signed_in(&h).await;

        let err = h
            .manager
            .refresh(&outcome.tokens.access_token, outcome.session.id)
            .await
            .unwrap_err();
        assert_eq!(err.message, REFRESH_FAILED);
    }

    #[tokio::test]
    async fn test_logout_invalidates_refresh_and_session() {
        let h = harness().await;
        let outcome = signed_in(&h).await;
        let session_id = outcome.session.id;

        h.manager
            .logout(session_id, Some(&outcome.tokens.refresh_token))
            .await;

        let err = h
            .manager
            .refresh(&outcome.tokens.refresh_token, session_id)
            .await
            .unwrap_err();
        assert_eq!(err.message, REFRESH_FAILED);

        assert!(h
            .manager
            .authenticate(&outcome.tokens.access_token)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_revoke_others_keeps_current_session() {
        let h = harness().await;
        let hash = PasswordHasher::new().hash_password("swordfish123").unwrap();
        let user = h.credentials.add_user("dana@example.com", &hash).await;

        let first = h
            .manager
            .login(&user.email, "swordfish123", "10.0.0.7", AGENT, false)
            .await
            .unwrap();
        let second = h
            .manager
            .login(&user.email, "swordfish123", "10.0.0.8", AGENT, false)
            .await
            .unwrap();

        let ctx = AuthContext {
            user_id: user.id,
            session_id: second.session.id,
        };
        let result = h.manager.revoke_other_sessions(&ctx).await.unwrap();
        assert_eq!(result.revoked, 1);
        assert!(!result.current_session_revoked);

        assert!(h
            .manager
            .authenticate(&first.tokens.access_token)
            .await
            .is_err());
        assert!(h
            .manager
            .authenticate(&second.tokens.access_token)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_revoke_all_invalidates_every_refresh_token() {
        let h = harness().await;
        let hash = PasswordHasher::new().hash_password("swordfish123").unwrap();
        let user = h.credentials.add_user("dana@example.com", &hash).await;

        let first = h
            .manager
            .login(&user.email, "swordfish123", "10.0.0.7", AGENT, false)
            .await
            .unwrap();
        let second = h
            .manager
            .login(&user.email, "swordfish123", "10.0.0.8", AGENT, false)
            .await
            .unwrap();

        let ctx = AuthContext {
            user_id: user.id,
            session_id: second.session.id,
        };
        let result = h.manager.revoke_all_sessions(&ctx).await.unwrap();
        assert_eq!(result.revoked, 2);
        assert!(result.current_session_revoked);

        for outcome in [&first, &second] {
            let err = h
                .manager
                .refresh(&outcome.tokens.refresh_token, outcome.session.id)
                .await
                .unwrap_err();
            assert_eq!(err.message, REFRESH_FAILED);
        }
    }

    #[tokio::test]
    async fn test_password_change_flushes_everything() {
        let h = harness().await;
        let hash = PasswordHasher::new().hash_password("swordfish123").unwrap();
        let user = h.credentials.add_user("dana@example.com", &hash).await;

        let first = h
            .manager
            .login(&user.email, "swordfish123", "10.0.0.7", AGENT, false)
            .await
            .unwrap();
        let second = h
            .manager
            .login(&user.email, "swordfish123", "10.0.0.8", AGENT, true)
            .await
            .unwrap();

        let ctx = AuthContext {
            user_id: user.id,
            session_id: second.session.id,
        };
        h.manager
            .change_password(&ctx, "swordfish123", "a-new-long-password")
            .await
            .unwrap();

        // Every context is gone, the initiating session included.
        for outcome in [&first, &second] {
            assert!(h
                .manager
                .authenticate(&outcome.tokens.access_token)
                .await
                .is_err());
            assert!(h
                .manager
                .refresh(&outcome.tokens.refresh_token, outcome.session.id)
                .await
                .is_err());
        }

        // The new password signs in.
        h.manager
            .login(&user.email, "a-new-long-password", "10.0.0.7", AGENT, false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_password_rejects_wrong_current() {
        let h = harness().await;
        let outcome = signed_in(&h).await;
        let ctx = AuthContext {
            user_id: outcome.user.id,
            session_id: outcome.session.id,
        };

        let err = h
            .manager
            .change_password(&ctx, "not-the-password", "a-new-long-password")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        // Nothing was flushed.
        assert!(h
            .manager
            .authenticate(&outcome.tokens.access_token)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_list_sessions_orders_by_recency() {
        let h = harness().await;
        let hash = PasswordHasher::new().hash_password("swordfish123").unwrap();
        let user = h.credentials.add_user("dana@example.com", &hash).await;

        let first = h
            .manager
            .login(&user.email, "swordfish123", "10.0.0.7", AGENT, false)
            .await
            .unwrap();
        let second = h
            .manager
            .login(&user.email, "swordfish123", "10.0.0.8", AGENT, false)
            .await
            .unwrap();

        let ctx = AuthContext {
            user_id: user.id,
            session_id: second.session.id,
        };
        let sessions = h.manager.list_sessions(&ctx).await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, second.session.id);
        assert_eq!(sessions[1].id, first.session.id);
    }
}
