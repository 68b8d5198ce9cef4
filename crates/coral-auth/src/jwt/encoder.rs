//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use coral_core::config::auth::AuthConfig;
use coral_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Issuer embedded in every token.
    issuer: String,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in hours.
    refresh_ttl_hours: i64,
    /// Refresh token TTL in hours for remembered sign-ins.
    refresh_remember_ttl_hours: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// An unset signing secret is a fatal configuration error; no encoder
    /// exists that could later fail per-request.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret is not set; refusing to issue unsigned tokens",
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_hours: config.refresh_ttl_hours as i64,
            refresh_remember_ttl_hours: config.refresh_remember_ttl_hours as i64,
        })
    }

    /// Returns the refresh TTL granted at sign-in.
    pub fn refresh_ttl(&self, remember: bool) -> Duration {
        if remember {
            Duration::hours(self.refresh_remember_ttl_hours)
        } else {
            Duration::hours(self.refresh_ttl_hours)
        }
    }

    /// Generates an access + refresh pair bound to a user, session, and
    /// audience fingerprint.
    ///
    /// The refresh expiry is caller-supplied so rotation can pin it to the
    /// session's absolute horizon instead of extending it.
    pub fn issue_pair(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        audience: &str,
        refresh_expires_at: DateTime<Utc>,
    ) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_exp = now + Duration::minutes(self.access_ttl_minutes);

        let access_token = self.sign(
            user_id,
            session_id,
            audience,
            now,
            access_exp,
            TokenType::Access,
        )?;
        let refresh_token = self.sign(
            user_id,
            session_id,
            audience,
            now,
            refresh_expires_at,
            TokenType::Refresh,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at: access_exp,
            refresh_expires_at,
        })
    }

    fn sign(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        audience: &str,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        token_type: TokenType,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id,
            sid: session_id,
            aud: audience.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
            token_type,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_is_fatal() {
        let config = AuthConfig::default();
        assert!(config.jwt_secret.is_empty());

        let err = JwtEncoder::new(&config).unwrap_err();
        assert_eq!(err.kind, coral_core::error::ErrorKind::Configuration);
    }
}
