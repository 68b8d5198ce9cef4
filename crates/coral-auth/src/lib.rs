//! # coral-auth
//!
//! Session and token lifecycle for Coral Console.
//!
//! ## Modules
//!
//! - `jwt` — paired access/refresh token signing and type-checked verification
//! - `fingerprint` — client-agent normalization and audience derivation
//! - `password` — Argon2id password hashing
//! - `credential` — user credential store abstraction
//! - `session` — session store, issuance service, and expiry sweeping
//! - `token` — refresh-token store with rotate-on-use redemption

pub mod credential;
pub mod fingerprint;
pub mod jwt;
pub mod password;
pub mod session;
pub mod token;

pub use credential::CredentialStore;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::PasswordHasher;
pub use session::{AuthContext, AuthManager, ExpirySweeper, SessionStore};
pub use token::RefreshTokenStore;
