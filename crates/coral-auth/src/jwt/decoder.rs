//! JWT token validation with token-type enforcement.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use coral_core::config::auth::AuthConfig;
use coral_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates JWT tokens and enforces access/refresh type separation.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret is not set; token verification is impossible",
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // The audience claim carries an opaque client fingerprint, not a
        // verifier allowlist.
        validation.validate_aud = false;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        })
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::unauthorized(
                "Invalid token type: expected access token",
            ));
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::unauthorized(
                "Invalid token type: expected refresh token",
            ));
        }

        Ok(claims)
    }

    /// Internal decode without type checking.
    ///
    /// Every cryptographic or temporal failure collapses into one message so
    /// callers cannot distinguish why a token was rejected.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::with_source(
                coral_core::error::ErrorKind::Unauthorized,
                "Invalid or expired token",
                e,
            ))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::jwt::encoder::JwtEncoder;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    fn codec() -> (JwtEncoder, JwtDecoder) {
        let config = test_config();
        (
            JwtEncoder::new(&config).unwrap(),
            JwtDecoder::new(&config).unwrap(),
        )
    }

    #[test]
    fn test_pair_round_trips_with_session_binding() {
        let (encoder, decoder) = codec();
        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let refresh_exp = Utc::now() + Duration::hours(24);

        let pair = encoder
            .issue_pair(user_id, session_id, "fp-abc", refresh_exp)
            .unwrap();

        let access = decoder.decode_access_token(&pair.access_token).unwrap();
        assert_eq!(access.sub, user_id);
        assert_eq!(access.sid, session_id);
        assert_eq!(access.aud, "fp-abc");
        assert_eq!(access.token_type, TokenType::Access);

        let refresh = decoder.decode_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(refresh.sid, session_id);
        assert_eq!(refresh.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_type_confusion_is_rejected() {
        let (encoder, decoder) = codec();
        let pair = encoder
            .issue_pair(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "fp",
                Utc::now() + Duration::hours(1),
            )
            .unwrap();

        assert!(decoder.decode_access_token(&pair.refresh_token).is_err());
        assert!(decoder.decode_refresh_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (encoder, _) = codec();
        let other = AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..AuthConfig::default()
        };
        let decoder = JwtDecoder::new(&other).unwrap();

        let pair = encoder
            .issue_pair(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "fp",
                Utc::now() + Duration::hours(1),
            )
            .unwrap();

        let err = decoder.decode_access_token(&pair.access_token).unwrap_err();
        assert_eq!(err.message, "Invalid or expired token");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = test_config();
        let decoder = JwtDecoder::new(&config).unwrap();

        // Sign an already-expired access token directly.
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            sid: Uuid::new_v4(),
            aud: "fp".to_string(),
            iss: config.issuer.clone(),
            iat: (now - Duration::hours(2)).timestamp(),
            nbf: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            token_type: TokenType::Access,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let err = decoder.decode_access_token(&token).unwrap_err();
        assert_eq!(err.message, "Invalid or expired token");
    }

    #[test]
    fn test_garbage_is_rejected() {
        let (_, decoder) = codec();
        assert!(decoder.decode_access_token("not-a-jwt").is_err());
    }
}
