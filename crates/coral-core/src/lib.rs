//! # coral-core
//!
//! Shared foundation for the Coral Console backend: the unified error type,
//! the `AppResult` alias, and the configuration schemas every other crate
//! consumes.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
