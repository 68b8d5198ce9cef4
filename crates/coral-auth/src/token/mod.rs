//! Refresh-token persistence with rotate-on-use redemption.

pub mod memory;
pub mod store;

pub use memory::MemoryRefreshTokenStore;
pub use store::{PgRefreshTokenStore, RefreshTokenStore, token_digest};
