//! Integration tests for the full session lifecycle, including the
//! expiry-driven auto-logout timer.
//!
//! Uses `tokio::test(start_paused = true)` so timer waits resolve
//! deterministically: awaiting a sleep in the test body advances the
//! virtual clock past any pending auto-logout timer.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rollcall_session::{Navigator, Role, SessionManager, UserIdentity};
use rollcall_store::{MemoryStore, Store, TOKEN_KEY, USER_KEY};

// =========================================================================
// Helpers
// =========================================================================

/// A [`Navigator`] that counts forced redirects instead of navigating.
#[derive(Debug, Clone, Default)]
struct RecordingNavigator {
    redirects: Arc<AtomicUsize>,
}

impl RecordingNavigator {
    fn redirect_count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn to_landing(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs() as i64
}

/// Builds a token carrying the given subject and expiry.
fn token_expiring_at(sub: &str, exp: i64) -> String {
    let payload = format!(r#"{{"sub":"{sub}","exp":{exp}}}"#);
    format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload))
}

fn setup() -> (
    MemoryStore,
    RecordingNavigator,
    SessionManager<MemoryStore, RecordingNavigator>,
) {
    let store = MemoryStore::new();
    let navigator = RecordingNavigator::default();
    let manager = SessionManager::new(store.clone(), navigator.clone());
    (store, navigator, manager)
}

// =========================================================================
// No token / malformed token
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_empty_store_restores_to_no_session_and_no_timer() {
    let (_store, navigator, manager) = setup();

    manager.restore();

    assert!(manager.identity().is_none());

    // Nothing should ever fire: advance well past any plausible expiry.
    tokio::time::sleep(Duration::from_secs(7200)).await;
    assert_eq!(navigator.redirect_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_token_matches_no_token_outcome() {
    let (store, navigator, manager) = setup();
    store.set(TOKEN_KEY, "not.a.jwt").unwrap();

    manager.restore();

    assert!(manager.identity().is_none());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(USER_KEY).unwrap(), None);

    tokio::time::sleep(Duration::from_secs(7200)).await;
    assert_eq!(navigator.redirect_count(), 0);
}

// =========================================================================
// Expired token
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_expired_token_is_purged_without_navigation() {
    let (store, navigator, manager) = setup();
    store
        .set(TOKEN_KEY, &token_expiring_at("S1", now_secs() - 3600))
        .unwrap();
    store.set(USER_KEY, r#"{"name":"Ada","role":"admin"}"#).unwrap();

    manager.restore();

    assert!(manager.identity().is_none());
    assert!(store.is_empty());
    // Expiry detected at restore time is silent; only a *firing* timer
    // forces navigation.
    assert_eq!(navigator.redirect_count(), 0);
}

// =========================================================================
// Auto-logout firing
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_auto_logout_fires_at_expiry_exactly_once() {
    let (store, navigator, manager) = setup();
    store
        .set(TOKEN_KEY, &token_expiring_at("S1", now_secs() + 2))
        .unwrap();

    manager.restore();
    assert!(manager.identity().is_some());

    tokio::time::sleep(Duration::from_secs(3)).await;

    assert!(manager.identity().is_none(), "timer should have logged out");
    assert!(store.is_empty(), "store should be purged by the timer");
    assert_eq!(navigator.redirect_count(), 1, "expiry forces navigation once");

    // No duplicate firing later.
    tokio::time::sleep(Duration::from_secs(7200)).await;
    assert_eq!(navigator.redirect_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_logout_before_expiry_suppresses_timer() {
    let (store, navigator, manager) = setup();
    store
        .set(TOKEN_KEY, &token_expiring_at("S1", now_secs() + 2))
        .unwrap();

    manager.restore();
    manager.logout();

    tokio::time::sleep(Duration::from_secs(3)).await;

    assert!(manager.identity().is_none());
    assert!(store.is_empty());
    assert_eq!(navigator.redirect_count(), 0, "cancelled timer must not fire");
}

// =========================================================================
// Superseding login
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_superseding_login_cancels_stale_timer() {
    let (store, navigator, manager) = setup();
    store
        .set(TOKEN_KEY, &token_expiring_at("S1", now_secs() + 2))
        .unwrap();
    manager.restore();

    // A fresh login replaces the token and the session before the old
    // timer fires.
    store
        .set(TOKEN_KEY, &token_expiring_at("S2", now_secs() + 3600))
        .unwrap();
    let new_identity = UserIdentity {
        name: "Grace".into(),
        role: Role::Admin,
        student_id: Some("S2".into()),
        ..Default::default()
    };
    manager.login(new_identity.clone());

    // Let the original 2 seconds elapse.
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(
        manager.identity(),
        Some(new_identity),
        "old timer must not clear the new session"
    );
    assert!(store.get(TOKEN_KEY).unwrap().is_some());
    assert_eq!(navigator.redirect_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_login_schedules_timer_from_new_token() {
    let (store, navigator, manager) = setup();

    store
        .set(TOKEN_KEY, &token_expiring_at("S2", now_secs() + 10))
        .unwrap();
    manager.login(UserIdentity {
        name: "Grace".into(),
        ..Default::default()
    });

    tokio::time::sleep(Duration::from_secs(11)).await;

    assert!(manager.identity().is_none(), "new token's expiry should fire");
    assert_eq!(navigator.redirect_count(), 1);
}

// =========================================================================
// Backend-reported 401
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_unauthorized_purges_then_navigates_after_delay() {
    let (store, navigator, manager) = setup();
    store
        .set(TOKEN_KEY, &token_expiring_at("S1", now_secs() + 3600))
        .unwrap();
    manager.restore();

    manager.handle_unauthorized();

    // Teardown is immediate.
    assert!(manager.identity().is_none());
    assert!(store.is_empty());

    // Navigation comes after the settle delay.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(navigator.redirect_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unauthorized_on_empty_session_still_navigates() {
    let (_store, navigator, manager) = setup();

    manager.handle_unauthorized();

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(navigator.redirect_count(), 1);
}
