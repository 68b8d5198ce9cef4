//! Maps domain `AppError` to HTTP responses.
//!
//! The actual `IntoResponse` impl lives in `coral_core::error` (the crate
//! that owns `AppError`), since Rust's orphan rules forbid implementing a
//! foreign trait for a foreign type here. Re-exported for call-site
//! convenience.

pub use coral_core::error::ApiErrorResponse;
