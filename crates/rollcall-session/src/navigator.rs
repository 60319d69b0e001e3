//! Navigation hook for forced redirects.
//!
//! The session manager never drives the UI — except in two documented
//! cases: the expiry timer firing, and a backend-reported 401. Both must
//! land the user on the unauthenticated landing view even if no one is
//! currently looking at the session. The [`Navigator`] trait is that seam:
//! the embedding application decides what "go to the landing view" means
//! (swap a route, repaint, or in a CLI just print something), and the
//! manager calls it at the right moments.

/// Performs client-side navigation to the unauthenticated landing view.
///
/// - `Send + Sync` — the expiry timer fires on a runtime worker thread.
/// - `'static` — the navigator lives as long as the session manager.
///
/// User-initiated logout does **not** go through this trait; callers of
/// [`logout`](crate::SessionManager::logout) handle their own navigation.
pub trait Navigator: Send + Sync + 'static {
    /// Forces navigation to the unauthenticated landing view.
    fn to_landing(&self);
}

/// A [`Navigator`] that does nothing.
///
/// For tools and tests that have no UI to redirect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn to_landing(&self) {}
}
