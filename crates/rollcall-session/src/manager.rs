//! The session manager: the single source of truth for the login state.
//!
//! One `SessionManager` exists per application. It is constructed at
//! startup, [`restore`](SessionManager::restore)d once from the persistent
//! store, replaced wholesale on login, and torn down on logout, detected
//! expiry, or a backend-reported 401.
//!
//! # Concurrency note
//!
//! The manager is `Clone` over an `Arc`; all clones observe the same
//! session. Internal state sits behind a `std::sync::Mutex` that is never
//! held across an await — the only asynchronous element is the expiry
//! timer, a spawned one-shot task. Cancellation is belt and braces: the
//! task's `JoinHandle` is aborted *and* an epoch counter is checked when
//! the timer fires, so a timer racing its own cancellation can never tear
//! down a session it doesn't belong to.

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rollcall_store::{Store, TOKEN_KEY, USER_KEY};
use rollcall_token::{Claims, decode_claims};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{Navigator, Session, UserIdentity};

/// How long to wait after a 401 before forcing navigation, so in-flight
/// UI updates can settle first.
const UNAUTHORIZED_REDIRECT_DELAY: Duration = Duration::from_millis(200);

/// Owns the lifecycle of the authenticated session.
///
/// All methods are infallible from the caller's point of view: decode and
/// parse failures are logged and degrade to the unauthenticated state
/// (see the error taxonomy in the crate docs). Methods that may schedule
/// the expiry timer ([`restore`](Self::restore), [`login`](Self::login))
/// must be called from within a Tokio runtime.
pub struct SessionManager<S: Store, N: Navigator> {
    shared: Arc<Shared<S, N>>,
}

// Derived Clone would demand S: Clone and N: Clone; cloning the Arc is
// what we actually mean.
impl<S: Store, N: Navigator> Clone for SessionManager<S, N> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<S, N> {
    store: S,
    navigator: N,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    identity: Option<UserIdentity>,
    expires_at_ms: Option<i64>,
    /// The pending auto-logout task, if the current token has an expiry.
    /// At most one exists at any time.
    timer: Option<JoinHandle<()>>,
    /// Bumped on every timer cancellation. A fired timer whose captured
    /// epoch no longer matches has been superseded and must do nothing.
    epoch: u64,
}

impl<S: Store, N: Navigator> SessionManager<S, N> {
    /// Creates a manager with an empty session.
    ///
    /// Call [`restore`](Self::restore) afterwards to rebuild the session
    /// from whatever the store holds.
    pub fn new(store: S, navigator: N) -> Self {
        Self {
            shared: Arc::new(Shared {
                store,
                navigator,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Rebuilds the session from the persistent store.
    ///
    /// Invoked once at startup. Reads the stored token, validates its
    /// structure and expiry, and either produces an authenticated session
    /// (preferring the cached identity record, falling back to token
    /// claims) or purges the store and stays unauthenticated. A token
    /// with remaining time-to-live gets a one-shot auto-logout timer.
    ///
    /// Never errors: malformed tokens, expired tokens, and corrupt cached
    /// records all converge to a well-defined session state.
    pub fn restore(&self) {
        let mut state = self.shared.lock_state();
        State::cancel_timer(&mut state);

        let Some(token) = self.shared.read(TOKEN_KEY) else {
            // No token: a cached identity on its own must never produce
            // a session.
            self.shared.remove(USER_KEY);
            State::clear(&mut state);
            debug!("no stored token, starting unauthenticated");
            return;
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "stored token rejected, purging session");
                self.shared.purge();
                State::clear(&mut state);
                return;
            }
        };

        let now = now_ms();
        if claims.is_expired(now) {
            debug!("stored token expired, purging session");
            self.shared.purge();
            State::clear(&mut state);
            return;
        }

        let identity = self
            .shared
            .read(USER_KEY)
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    warn!(error = %e, "cached identity corrupt, deriving from token claims");
                    None
                }
            })
            .unwrap_or_else(|| UserIdentity::from_claims(&claims));

        info!(name = %identity.name, role = %identity.role, "session restored");
        state.identity = Some(identity);
        state.expires_at_ms = claims.expires_at_ms();
        self.schedule_expiry(&mut state, &claims, now);
    }

    /// Establishes a session for `identity` after a successful login call.
    ///
    /// The caller's network layer has already written the fresh token to
    /// the store; this persists the identity record beside it and re-runs
    /// the decode-and-schedule step against that token, so the expiry
    /// timer always matches the current token.
    ///
    /// After this call the current identity is exactly `identity`.
    pub fn login(&self, identity: UserIdentity) {
        let mut state = self.shared.lock_state();
        State::cancel_timer(&mut state);

        match serde_json::to_string(&identity) {
            Ok(json) => self.shared.write(USER_KEY, &json),
            Err(e) => warn!(error = %e, "failed to serialize identity for caching"),
        }

        info!(name = %identity.name, role = %identity.role, "session established");
        state.identity = Some(identity);
        state.expires_at_ms = None;

        if let Some(token) = self.shared.read(TOKEN_KEY) {
            if let Ok(claims) = decode_claims(&token) {
                let now = now_ms();
                state.expires_at_ms = claims.expires_at_ms();
                self.schedule_expiry(&mut state, &claims, now);
            }
        }
    }

    /// Tears down the session: cancels the timer, removes the token and
    /// identity from the store, and clears the identity.
    ///
    /// Idempotent — on an already-empty session this only clears the
    /// store entries again. Does not navigate; that's the caller's job
    /// for user-initiated logout.
    pub fn logout(&self) {
        let mut state = self.shared.lock_state();
        State::cancel_timer(&mut state);
        self.shared.purge();
        if state.identity.take().is_some() {
            info!("logged out");
        }
        state.expires_at_ms = None;
    }

    /// Reacts to a backend-reported 401: same teardown as [`logout`],
    /// then forced navigation to the landing view after a short delay.
    ///
    /// The delay lets whatever request surfaced the 401 finish updating
    /// the UI before the redirect.
    pub fn handle_unauthorized(&self) {
        warn!("backend reported unauthorized, invalidating session");
        self.logout();

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            tokio::time::sleep(UNAUTHORIZED_REDIRECT_DELAY).await;
            shared.navigator.to_landing();
        });
    }

    /// A snapshot of the current session.
    pub fn current(&self) -> Session {
        let state = self.shared.lock_state();
        Session {
            identity: state.identity.clone(),
            expires_at_ms: state.expires_at_ms,
        }
    }

    /// The current identity, or `None` when unauthenticated.
    pub fn identity(&self) -> Option<UserIdentity> {
        self.shared.lock_state().identity.clone()
    }

    /// Schedules the one-shot auto-logout timer if the token still has
    /// strictly positive time-to-live.
    ///
    /// Must be called with the prior timer already cancelled; the epoch
    /// captured here is what the fired task checks against.
    fn schedule_expiry(&self, state: &mut State, claims: &Claims, now: i64) {
        let Some(ttl) = claims.remaining_ttl(now) else {
            return;
        };

        let epoch = state.epoch;
        let shared = Arc::clone(&self.shared);
        debug!(ttl_ms = ttl.as_millis() as u64, "auto-logout scheduled");

        state.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            shared.expire(epoch);
        }));
    }
}

impl<S: Store, N: Navigator> Shared<S, N> {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("session state lock poisoned")
    }

    /// The expiry timer fired. Performs the logout side effects and the
    /// forced navigation — unless the session was replaced or torn down
    /// since the timer was scheduled.
    fn expire(self: &Arc<Self>, epoch: u64) {
        let mut state = self.lock_state();
        if state.epoch != epoch {
            debug!("expiry timer superseded, ignoring");
            return;
        }

        info!("token expired, logging out");
        self.purge();
        state.identity = None;
        state.expires_at_ms = None;
        state.timer = None;
        drop(state);

        self.navigator.to_landing();
    }

    /// Reads a key, degrading store failures to "absent".
    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "store read failed, treating as absent");
                None
            }
        }
    }

    /// Best-effort write; failures are logged, not propagated.
    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "store write failed");
        }
    }

    /// Best-effort removal; failures are logged, not propagated.
    fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!(key, error = %e, "store remove failed");
        }
    }

    /// Removes the token and identity together — the two entries are
    /// never left half-present.
    fn purge(&self) {
        self.remove(TOKEN_KEY);
        self.remove(USER_KEY);
    }
}

impl State {
    /// Cancels any pending timer and invalidates in-flight fires.
    ///
    /// Aborting the `JoinHandle` stops a timer still sleeping; bumping
    /// the epoch neutralizes one that already woke up and is waiting on
    /// the state lock.
    fn cancel_timer(state: &mut State) {
        state.epoch += 1;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
    }

    fn clear(state: &mut State) {
        state.identity = None;
        state.expires_at_ms = None;
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// A clock set before the Unix epoch reads as 0, which fails every token
/// towards "not yet expired" — the backend still rejects stale tokens.
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

// =========================================================================
// Tests
// =========================================================================
