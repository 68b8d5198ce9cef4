//! Reactive, persisted client session store.

use std::sync::{Arc, Mutex};

use chrono::DateTime;
use tracing::debug;
use uuid::Uuid;

use crate::state::AuthTokens;
use crate::storage::{StorageEvent, StorageKeys, TokenStorage};

/// Why a store transitioned to signed-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutReason {
    /// The user signed out here. No notice is shown.
    ManualLogout,
    /// Refresh failed or the server answered 401; the session is gone.
    SessionExpired,
    /// Another tab or device invalidated the session.
    SignedOutElsewhere,
}

/// Event delivered synchronously to subscribers on every state change.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The token tuple was set or replaced.
    Updated(AuthTokens),
    /// The session ended.
    SignedOut(SignOutReason),
}

type Listener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Observable holder of the client auth state, mirrored to persisted storage.
///
/// In-process subscribers are notified synchronously; cross-tab observers
/// feed storage-change events back in through [`apply_external_event`],
/// which shares the same notify path.
///
/// [`apply_external_event`]: ClientSessionStore::apply_external_event
pub struct ClientSessionStore {
    storage: Arc<dyn TokenStorage>,
    keys: StorageKeys,
    tokens: Mutex<Option<AuthTokens>>,
    /// Set while this tab's own sign-out is running, so the storage-change
    /// path does not raise a second "signed out elsewhere" notice for it.
    manual_logout_in_progress: Mutex<bool>,
    listeners: Mutex<Vec<Listener>>,
}

impl std::fmt::Debug for ClientSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSessionStore")
            .field("keys", &self.keys)
            .finish()
    }
}

impl ClientSessionStore {
    /// Creates a store over a storage backend, hydrating any persisted state.
    pub fn new(storage: Arc<dyn TokenStorage>, namespace: &str) -> Self {
        let keys = StorageKeys::new(namespace);
        let tokens = Self::hydrate(storage.as_ref(), &keys);

        Self {
            storage,
            keys,
            tokens: Mutex::new(tokens),
            manual_logout_in_progress: Mutex::new(false),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Rebuilds the token tuple from persisted keys, if all of them parse.
    fn hydrate(storage: &dyn TokenStorage, keys: &StorageKeys) -> Option<AuthTokens> {
        let access_token = storage.get(&keys.access_token())?;
        let refresh_token = storage.get(&keys.refresh_token())?;
        let session_id = storage.get(&keys.session_id())?.parse::<Uuid>().ok()?;
        let access_expires_at = DateTime::parse_from_rfc3339(&storage.get(&keys.access_expires_at())?)
            .ok()?
            .to_utc();
        let refresh_expires_at =
            DateTime::parse_from_rfc3339(&storage.get(&keys.refresh_expires_at())?)
                .ok()?
                .to_utc();
        let remember = storage
            .get(&keys.remember())
            .map(|v| v == "true")
            .unwrap_or(false);

        Some(AuthTokens {
            access_token,
            access_expires_at,
            refresh_token,
            refresh_expires_at,
            session_id,
            remember,
        })
    }

    /// Returns the current token tuple, if signed in.
    pub fn current(&self) -> Option<AuthTokens> {
        self.tokens.lock().unwrap().clone()
    }

    /// Whether the store currently holds a session.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.lock().unwrap().is_some()
    }

    /// Registers a synchronous subscriber for session events.
    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + Send + Sync + 'static) {
        self.listeners.lock().unwrap().push(Box::new(listener));
    }

    /// Replaces the token tuple, persisting every field.
    pub fn set_tokens(&self, tokens: AuthTokens) {
        self.storage.set(&self.keys.access_token(), &tokens.access_token);
        self.storage.set(
            &self.keys.access_expires_at(),
            &tokens.access_expires_at.to_rfc3339(),
        );
        self.storage
            .set(&self.keys.refresh_token(), &tokens.refresh_token);
        self.storage.set(
            &self.keys.refresh_expires_at(),
            &tokens.refresh_expires_at.to_rfc3339(),
        );
        self.storage
            .set(&self.keys.session_id(), &tokens.session_id.to_string());
        self.storage.set(
            &self.keys.remember(),
            if tokens.remember { "true" } else { "false" },
        );

        *self.tokens.lock().unwrap() = Some(tokens.clone());
        self.notify(&SessionEvent::Updated(tokens));
    }

    /// Transitions to signed-out: clears memory and persisted keys, then
    /// notifies subscribers with the reason. No-op when already signed out.
    pub fn sign_out(&self, reason: SignOutReason) {
        {
            let mut tokens = self.tokens.lock().unwrap();
            if tokens.is_none() {
                return;
            }
            *tokens = None;
        }

        if reason == SignOutReason::ManualLogout {
            *self.manual_logout_in_progress.lock().unwrap() = true;
        }

        for key in self.keys.all() {
            self.storage.remove(&key);
        }

        debug!(?reason, "Client session cleared");
        self.notify(&SessionEvent::SignedOut(reason));

        if reason == SignOutReason::ManualLogout {
            *self.manual_logout_in_progress.lock().unwrap() = false;
        }
    }

    /// Feeds a storage-change event observed from another tab or context.
    ///
    /// A previously authenticated store that sees one of its token keys
    /// cleared externally performs a forced sign-out, unless this tab's own
    /// manual logout is what is clearing the keys.
    pub fn apply_external_event(&self, event: &StorageEvent) {
        if !self.is_authenticated() {
            return;
        }
        if *self.manual_logout_in_progress.lock().unwrap() {
            return;
        }
        if !event.is_cleared() {
            return;
        }
        if !self.keys.signal_keys().contains(&event.key) {
            return;
        }

        {
            *self.tokens.lock().unwrap() = None;
        }
        for key in self.keys.all() {
            self.storage.remove(&key);
        }

        debug!(key = %event.key, "Session invalidated by another tab");
        self.notify(&SessionEvent::SignedOut(SignOutReason::SignedOutElsewhere));
    }

    /// The user signed out in this tab.
    pub fn manual_logout(&self) {
        self.sign_out(SignOutReason::ManualLogout);
    }

    fn notify(&self, event: &SessionEvent) {
        let listeners = self.listeners.lock().unwrap();
        for listener in listeners.iter() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use crate::storage::MemoryStorage;

    use super::*;

    fn tokens() -> AuthTokens {
        AuthTokens {
            access_token: "access-1".to_string(),
            access_expires_at: Utc::now() + Duration::minutes(15),
            refresh_token: "refresh-1".to_string(),
            refresh_expires_at: Utc::now() + Duration::hours(24),
            session_id: Uuid::new_v4(),
            remember: false,
        }
    }

    fn recorded_events(store: &ClientSessionStore) -> Arc<Mutex<Vec<SessionEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        events
    }

    #[test]
    fn test_set_tokens_persists_and_notifies() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ClientSessionStore::new(storage.clone(), "coral");
        let events = recorded_events(&store);

        let t = tokens();
        store.set_tokens(t.clone());

        assert!(store.is_authenticated());
        assert_eq!(
            storage.get(&StorageKeys::new("coral").access_token()),
            Some("access-1".to_string())
        );
        assert_eq!(events.lock().unwrap().len(), 1);
        assert_eq!(events.lock().unwrap()[0], SessionEvent::Updated(t));
    }

    #[test]
    fn test_hydrates_from_persisted_state() {
        let storage = Arc::new(MemoryStorage::new());
        let t = tokens();
        ClientSessionStore::new(storage.clone(), "coral").set_tokens(t.clone());

        // A second store over the same storage (a new tab) starts signed in.
        let second = ClientSessionStore::new(storage, "coral");
        let current = second.current().unwrap();
        assert_eq!(current.access_token, t.access_token);
        assert_eq!(current.session_id, t.session_id);
    }

    #[test]
    fn test_cross_tab_clear_forces_sign_out() {
        let storage = Arc::new(MemoryStorage::new());
        let tab_a = ClientSessionStore::new(storage.clone(), "coral");
        tab_a.set_tokens(tokens());
        let events = recorded_events(&tab_a);

        // Tab B clears the shared access-token key.
        let key = StorageKeys::new("coral").access_token();
        storage.remove(&key);
        tab_a.apply_external_event(&StorageEvent {
            key,
            new_value: None,
        });

        assert!(!tab_a.is_authenticated());
        assert_eq!(
            events.lock().unwrap().as_slice(),
            &[SessionEvent::SignedOut(SignOutReason::SignedOutElsewhere)]
        );
    }

    #[test]
    fn test_external_event_ignored_when_signed_out() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ClientSessionStore::new(storage, "coral");
        let events = recorded_events(&store);

        store.apply_external_event(&StorageEvent {
            key: StorageKeys::new("coral").access_token(),
            new_value: None,
        });

        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_external_event_ignored_for_unrelated_key() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ClientSessionStore::new(storage, "coral");
        store.set_tokens(tokens());

        store.apply_external_event(&StorageEvent {
            key: "coral.theme".to_string(),
            new_value: None,
        });

        assert!(store.is_authenticated());
    }

    #[test]
    fn test_manual_logout_does_not_double_notify() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(ClientSessionStore::new(storage, "coral"));
        store.set_tokens(tokens());

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        // A listener that echoes our own key-clearing back, as a storage
        // watcher wired to the same origin would.
        let echo_store = Arc::clone(&store);
        let echo_key = StorageKeys::new("coral").access_token();
        store.subscribe(move |event| {
            sink.lock().unwrap().push(event.clone());
            if matches!(event, SessionEvent::SignedOut(SignOutReason::ManualLogout)) {
                echo_store.apply_external_event(&StorageEvent {
                    key: echo_key.clone(),
                    new_value: None,
                });
            }
        });

        store.manual_logout();

        // Only the manual sign-out is observed; the echoed clear is
        // suppressed by the in-progress flag.
        assert_eq!(
            events.lock().unwrap().as_slice(),
            &[SessionEvent::SignedOut(SignOutReason::ManualLogout)]
        );
    }

    #[test]
    fn test_sign_out_when_already_out_is_a_no_op() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ClientSessionStore::new(storage, "coral");
        let events = recorded_events(&store);

        store.sign_out(SignOutReason::SessionExpired);
        assert!(events.lock().unwrap().is_empty());
    }
}
