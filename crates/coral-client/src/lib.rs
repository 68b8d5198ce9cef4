//! # coral-client
//!
//! Client-side session state and token coordination for Coral Console
//! front ends.
//!
//! The pieces mirror what a browser tab holds: a persisted, observable
//! [`store::ClientSessionStore`] of the token tuple, a
//! [`coordinator::TokenCoordinator`] that attaches access tokens to outbound
//! requests and performs single-flight refresh, and a storage-event path that
//! turns another tab's sign-out into a forced sign-out here.

pub mod coordinator;
pub mod state;
pub mod storage;
pub mod store;
pub mod transport;

pub use coordinator::TokenCoordinator;
pub use state::AuthTokens;
pub use storage::{MemoryStorage, StorageEvent, StorageKeys, TokenStorage};
pub use store::{ClientSessionStore, SessionEvent, SignOutReason};
pub use transport::{AuthTransport, HttpTransport, TokenGrant};
