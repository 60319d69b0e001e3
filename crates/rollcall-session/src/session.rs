//! A read-only snapshot of the current session.

use crate::UserIdentity;

/// What the rest of the application gets when it asks "who is logged in?".
///
/// Snapshots are cheap clones taken under the manager's lock; holding one
/// does not keep the session alive, and it does not observe later
/// logins/logouts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// The authenticated principal, or `None` when unauthenticated.
    pub identity: Option<UserIdentity>,

    /// When the session will auto-expire (epoch milliseconds), if the
    /// token carried an `exp` claim.
    pub expires_at_ms: Option<i64>,
}

impl Session {
    /// Whether a user is currently logged in.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
