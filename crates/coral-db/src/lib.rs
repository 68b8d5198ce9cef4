//! # coral-db
//!
//! PostgreSQL access for Coral Console: connection pool management,
//! migrations, and the repositories backing the credential, session, and
//! refresh-token stores.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
