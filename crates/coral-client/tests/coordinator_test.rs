//! Behavioral tests for the token coordinator and cross-tab invalidation.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use coral_client::{
    AuthTokens, AuthTransport, ClientSessionStore, MemoryStorage, SessionEvent, SignOutReason,
    StorageEvent, StorageKeys, TokenCoordinator, TokenGrant, TokenStorage,
};
use coral_core::error::AppError;
use coral_core::result::AppResult;

/// Counts refresh calls; optionally fails them; sleeps so concurrent
/// callers genuinely overlap.
struct MockTransport {
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl MockTransport {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    fn failing() -> Self {
        let transport = Self::new();
        transport.fail.store(true, Ordering::SeqCst);
        transport
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthTransport for MockTransport {
    async fn refresh(&self, _refresh_token: &str, session_id: Uuid) -> AppResult<TokenGrant> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::unauthorized("Session refresh failed"));
        }

        let serial = self.calls.load(Ordering::SeqCst);
        Ok(TokenGrant {
            access_token: format!("access-rotated-{serial}"),
            access_expires_at: Utc::now() + Duration::minutes(15),
            refresh_token: format!("refresh-rotated-{serial}"),
            refresh_expires_at: Utc::now() + Duration::hours(24),
            session_id,
        })
    }
}

fn expiring_tokens() -> AuthTokens {
    AuthTokens {
        access_token: "access-original".to_string(),
        // Inside the 60-second safety buffer.
        access_expires_at: Utc::now() + Duration::seconds(10),
        refresh_token: "refresh-original".to_string(),
        refresh_expires_at: Utc::now() + Duration::hours(24),
        session_id: Uuid::new_v4(),
        remember: false,
    }
}

fn fresh_tokens() -> AuthTokens {
    AuthTokens {
        access_expires_at: Utc::now() + Duration::minutes(14),
        ..expiring_tokens()
    }
}

fn store_with(tokens: Option<AuthTokens>) -> Arc<ClientSessionStore> {
    let store = Arc::new(ClientSessionStore::new(
        Arc::new(MemoryStorage::new()),
        "coral",
    ));
    if let Some(tokens) = tokens {
        store.set_tokens(tokens);
    }
    store
}

fn record_events(store: &ClientSessionStore) -> Arc<Mutex<Vec<SessionEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
    events
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_callers_share_one_refresh() {
    let store = store_with(Some(expiring_tokens()));
    let transport = Arc::new(MockTransport::new());
    let coordinator = Arc::new(TokenCoordinator::new(
        Arc::clone(&store),
        Arc::clone(&transport) as Arc<dyn AuthTransport>,
    ));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let coordinator = Arc::clone(&coordinator);
        handles.push(tokio::spawn(
            async move { coordinator.bearer_token().await },
        ));
    }

    let mut bearers = Vec::new();
    for handle in handles {
        bearers.push(handle.await.unwrap().unwrap().unwrap());
    }

    assert_eq!(transport.call_count(), 1, "refresh must be single-flight");
    assert!(bearers.iter().all(|b| b == "access-rotated-1"));
    assert_eq!(
        store.current().unwrap().refresh_token,
        "refresh-rotated-1",
        "the rotated refresh token replaced the original"
    );
}

#[tokio::test]
async fn fresh_token_is_attached_without_refresh() {
    let store = store_with(Some(fresh_tokens()));
    let transport = Arc::new(MockTransport::new());
    let coordinator =
        TokenCoordinator::new(store, Arc::clone(&transport) as Arc<dyn AuthTransport>);

    let bearer = coordinator.bearer_token().await.unwrap();
    assert_eq!(bearer.as_deref(), Some("access-original"));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn signed_out_client_sends_unauthenticated() {
    let store = store_with(None);
    let transport = Arc::new(MockTransport::new());
    let coordinator =
        TokenCoordinator::new(store, Arc::clone(&transport) as Arc<dyn AuthTransport>);

    assert_eq!(coordinator.bearer_token().await.unwrap(), None);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn refresh_failure_transitions_to_signed_out() {
    let store = store_with(Some(expiring_tokens()));
    let events = record_events(&store);
    let transport = Arc::new(MockTransport::failing());
    let coordinator = TokenCoordinator::new(
        Arc::clone(&store),
        Arc::clone(&transport) as Arc<dyn AuthTransport>,
    );

    assert!(coordinator.bearer_token().await.is_err());
    assert!(store.current().is_none());
    assert_eq!(
        events.lock().unwrap().last(),
        Some(&SessionEvent::SignedOut(SignOutReason::SessionExpired))
    );
}

#[tokio::test]
async fn coordinator_recovers_after_failed_refresh() {
    let store = store_with(Some(expiring_tokens()));
    let transport = Arc::new(MockTransport::failing());
    let coordinator = TokenCoordinator::new(
        Arc::clone(&store),
        Arc::clone(&transport) as Arc<dyn AuthTransport>,
    );

    assert!(coordinator.bearer_token().await.is_err());

    // The in-flight slot was cleared; a later sign-in refreshes again
    // instead of hanging on the dead attempt.
    transport.fail.store(false, Ordering::SeqCst);
    store.set_tokens(expiring_tokens());

    let bearer = coordinator.bearer_token().await.unwrap();
    assert!(bearer.unwrap().starts_with("access-rotated-"));
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn unauthorized_response_signs_out_with_notice() {
    // Sign in on tab A, revoke everything from elsewhere; tab A's next call
    // comes back 401 and the coordinator must land on the expired notice.
    let store = store_with(Some(fresh_tokens()));
    let events = record_events(&store);
    let transport = Arc::new(MockTransport::new());
    let coordinator = TokenCoordinator::new(
        Arc::clone(&store),
        Arc::clone(&transport) as Arc<dyn AuthTransport>,
    );

    assert!(coordinator.bearer_token().await.unwrap().is_some());

    coordinator.on_response_status(401);

    assert!(store.current().is_none());
    assert_eq!(
        events.lock().unwrap().last(),
        Some(&SessionEvent::SignedOut(SignOutReason::SessionExpired))
    );

    // Subsequent requests go out unauthenticated instead of erroring.
    assert_eq!(coordinator.bearer_token().await.unwrap(), None);
}

#[tokio::test]
async fn other_tab_clearing_storage_forces_sign_out_here() {
    let shared_storage: Arc<dyn TokenStorage> = Arc::new(MemoryStorage::new());
    let tab_a = Arc::new(ClientSessionStore::new(Arc::clone(&shared_storage), "coral"));
    tab_a.set_tokens(fresh_tokens());
    let events = record_events(&tab_a);

    // Tab B signs out: its store clears the shared keys, and the browser
    // delivers the change to tab A as storage events.
    let tab_b = ClientSessionStore::new(Arc::clone(&shared_storage), "coral");
    tab_b.manual_logout();
    for key in StorageKeys::new("coral").all() {
        tab_a.apply_external_event(&StorageEvent {
            key,
            new_value: None,
        });
    }

    assert!(!tab_a.is_authenticated());
    let observed = events.lock().unwrap();
    assert_eq!(
        observed
            .iter()
            .filter(|e| matches!(
                e,
                SessionEvent::SignedOut(SignOutReason::SignedOutElsewhere)
            ))
            .count(),
        1,
        "tab A sees exactly one signed-out-elsewhere notice"
    );
}
