//! Persisted storage contract and key layout.
//!
//! The store persists one key per field so that key presence is itself the
//! cross-tab signal: another tab clearing the access-token key is how this
//! tab learns it was signed out elsewhere.

use std::collections::HashMap;
use std::sync::Mutex;

/// String key/value contract of browser-style persisted storage.
///
/// Implementations must be synchronous; browser storage is.
pub trait TokenStorage: Send + Sync + 'static {
    /// Read a key.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a key.
    fn set(&self, key: &str, value: &str);

    /// Remove a key.
    fn remove(&self, key: &str);
}

/// A change to persisted storage observed from outside this store, as a
/// browser delivers for mutations made by other tabs or contexts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// The key that changed.
    pub key: String,
    /// The value after the change; `None` or empty means the key was cleared.
    pub new_value: Option<String>,
}

impl StorageEvent {
    /// Whether the change cleared the key.
    pub fn is_cleared(&self) -> bool {
        match &self.new_value {
            None => true,
            Some(value) => value.is_empty(),
        }
    }
}

/// Namespaced key layout, one key per persisted field.
///
/// The namespace carries the deployment identity so consoles for different
/// clusters sharing an origin do not clobber each other.
#[derive(Debug, Clone)]
pub struct StorageKeys {
    /// Key prefix, e.g. `"coral"`.
    namespace: String,
}

impl StorageKeys {
    /// Creates the key layout for a deployment namespace.
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
        }
    }

    /// Key holding the access token.
    pub fn access_token(&self) -> String {
        format!("{}.auth.access_token", self.namespace)
    }

    /// Key holding the access token expiry (RFC 3339).
    pub fn access_expires_at(&self) -> String {
        format!("{}.auth.access_expires_at", self.namespace)
    }

    /// Key holding the refresh token.
    pub fn refresh_token(&self) -> String {
        format!("{}.auth.refresh_token", self.namespace)
    }

    /// Key holding the refresh token expiry (RFC 3339).
    pub fn refresh_expires_at(&self) -> String {
        format!("{}.auth.refresh_expires_at", self.namespace)
    }

    /// Key holding the session id.
    pub fn session_id(&self) -> String {
        format!("{}.auth.session_id", self.namespace)
    }

    /// Key holding the remember flag.
    pub fn remember(&self) -> String {
        format!("{}.auth.remember", self.namespace)
    }

    /// All keys the store persists.
    pub fn all(&self) -> [String; 6] {
        [
            self.access_token(),
            self.access_expires_at(),
            self.refresh_token(),
            self.refresh_expires_at(),
            self.session_id(),
            self.remember(),
        ]
    }

    /// The keys whose external clearing signals a sign-out elsewhere.
    pub fn signal_keys(&self) -> [String; 3] {
        [self.access_token(), self.refresh_token(), self.session_id()]
    }
}

/// In-memory storage backend.
///
/// Stands in for browser storage in tests and native shells; share one
/// instance between two stores to model two tabs of the same origin.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}
