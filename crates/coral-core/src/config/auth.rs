//! Token issuance and credential configuration.

use serde::{Deserialize, Serialize};

/// Authentication and token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Must be set in production;
    /// an empty value is a fatal startup error.
    #[serde(default)]
    pub jwt_secret: String,
    /// Issuer embedded in every token, normally the deployment base URL.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// Refresh token TTL in hours when the user asked to stay signed in.
    #[serde(default = "default_remember_ttl")]
    pub refresh_remember_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: default_issuer(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_hours: default_refresh_ttl(),
            refresh_remember_ttl_hours: default_remember_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_issuer() -> String {
    "http://localhost:8080".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    24
}

fn default_remember_ttl() -> u64 {
    720
}

fn default_password_min() -> usize {
    8
}
