//! The portal facade: wires the session manager, the API client, and the
//! routing rules together behind one handle.

use rollcall_api::{ApiClient, LoginRequest};
use rollcall_session::{Navigator, Session, SessionManager, UserIdentity};
use rollcall_store::Store;
use tracing::debug;

use crate::routing::{self, Area, Route};
use crate::RollcallError;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Builder for [`Portal`].
#[derive(Debug, Clone)]
pub struct PortalBuilder {
    base_url: String,
}

impl PortalBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The backend base URL, e.g. `https://attendance.example.edu/api`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the portal on top of `store` and `navigator`.
    ///
    /// The store is shared: the session manager owns one handle for the
    /// session lifecycle, the API client owns another for attaching the
    /// bearer header. Both must see the same entries, which is why the
    /// store has to be `Clone`-shared rather than duplicated.
    ///
    /// # Errors
    /// Returns [`RollcallError::Api`] if the HTTP client cannot be built.
    pub fn build<S, N>(self, store: S, navigator: N) -> Result<Portal<S, N>, RollcallError>
    where
        S: Store + Clone,
        N: Navigator,
    {
        debug!(base_url = %self.base_url, "building portal");
        let session = SessionManager::new(store.clone(), navigator);
        let api = ApiClient::new(self.base_url, store, session.clone())?;

        Ok(Portal { session, api })
    }
}

impl Default for PortalBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

/// The application-facing handle for the whole portal client.
///
/// Combines the three layers most applications need together: the
/// session manager (who is logged in, for how long), the API client
/// (talking to the backend with the right bearer header), and the
/// routing rules (which view to show). For finer control, the
/// underlying pieces are reachable via [`session`](Self::session) and
/// [`api`](Self::api).
pub struct Portal<S: Store, N: Navigator> {
    session: SessionManager<S, N>,
    api: ApiClient<S, N>,
}

impl<S: Store, N: Navigator> Portal<S, N> {
    /// Restores any persisted session. Call once at application startup,
    /// from within a Tokio runtime.
    pub fn start(&self) {
        self.session.restore();
    }

    /// Authenticates against the backend and establishes the session.
    ///
    /// On success the session is fully set up (identity persisted, expiry
    /// timer armed from the fresh token) and the logged-in identity is
    /// returned.
    pub async fn login(
        &self,
        identifier: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<UserIdentity, RollcallError> {
        let response = self
            .api
            .login(&LoginRequest {
                identifier: identifier.into(),
                password: password.into(),
            })
            .await?;
        Ok(response.user)
    }

    /// Tears down the session. The caller decides where to navigate next.
    pub fn logout(&self) {
        self.session.logout();
    }

    /// A snapshot of the current session.
    pub fn current(&self) -> Session {
        self.session.current()
    }

    /// The current identity, or `None` when unauthenticated.
    pub fn identity(&self) -> Option<UserIdentity> {
        self.session.identity()
    }

    /// The route to show on entry, per the current session.
    pub fn home_route(&self) -> Route {
        routing::home(self.identity().as_ref())
    }

    /// Resolves an attempt to enter `area` against the current session.
    pub fn resolve(&self, area: Area) -> Route {
        routing::guard(self.identity().as_ref(), area)
    }

    /// The session manager, for callers that need the lifecycle directly.
    pub fn session(&self) -> &SessionManager<S, N> {
        &self.session
    }

    /// The API client, for endpoints beyond login.
    pub fn api(&self) -> &ApiClient<S, N> {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use rollcall_session::{NoopNavigator, Role};
    use rollcall_store::MemoryStore;

    use super::*;

    fn portal(store: &MemoryStore) -> Portal<MemoryStore, NoopNavigator> {
        PortalBuilder::new()
            .base_url("http://localhost:5000/api")
            .build(store.clone(), NoopNavigator)
            .expect("portal should build")
    }

    #[tokio::test]
    async fn test_start_with_empty_store_routes_to_landing() {
        let store = MemoryStore::new();
        let p = portal(&store);

        p.start();

        assert!(p.identity().is_none());
        assert_eq!(p.home_route(), Route::Landing);
    }

    #[tokio::test]
    async fn test_home_route_follows_session_role() {
        let store = MemoryStore::new();
        let p = portal(&store);

        p.session().login(UserIdentity {
            name: "Ada".into(),
            role: Role::Admin,
            ..Default::default()
        });

        assert_eq!(p.home_route(), Route::Admin);
        assert_eq!(p.resolve(Area::Admin), Route::Admin);
        assert_eq!(p.resolve(Area::Student), Route::Login);
    }

    #[tokio::test]
    async fn test_logout_returns_to_landing() {
        let store = MemoryStore::new();
        let p = portal(&store);

        p.session().login(UserIdentity {
            name: "Sam".into(),
            ..Default::default()
        });
        assert_eq!(p.home_route(), Route::Student);

        p.logout();

        assert_eq!(p.home_route(), Route::Landing);
        assert!(store.is_empty());
    }

    #[test]
    fn test_builder_default_base_url() {
        assert_eq!(PortalBuilder::default().base_url, DEFAULT_BASE_URL);
    }
}
