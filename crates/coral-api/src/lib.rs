//! # coral-api
//!
//! HTTP API layer for Coral Console built on Axum.
//!
//! Provides the auth, session, and account endpoints, the bearer-token
//! request guard, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
