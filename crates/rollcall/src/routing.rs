//! The role-based routing contract.
//!
//! Pure functions from session state to a view decision. The rules come
//! straight from the portal's navigation behavior:
//!
//! - no identity → the unauthenticated landing/login view;
//! - `admin` → the admin area, everyone else → the student area;
//! - asking for an area your role doesn't grant → back to login.
//!
//! This is UX routing, not access control: the backend re-authorizes
//! every API call regardless of which area the client shows.

use rollcall_session::{Role, UserIdentity};

/// A protected area of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Student,
    Admin,
}

/// Where the application should navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Public landing view (unauthenticated).
    Landing,
    /// Login form.
    Login,
    /// Student dashboard.
    Student,
    /// Admin dashboard.
    Admin,
}

/// The route for "just opened the portal".
pub fn home(identity: Option<&UserIdentity>) -> Route {
    match identity {
        None => Route::Landing,
        Some(user) if user.role == Role::Admin => Route::Admin,
        Some(_) => Route::Student,
    }
}

/// The route for an attempt to enter `area`.
///
/// Grants the area only when the identity's role matches; everything
/// else redirects to login.
pub fn guard(identity: Option<&UserIdentity>, area: Area) -> Route {
    match (identity.map(|user| user.role), area) {
        (Some(Role::Admin), Area::Admin) => Route::Admin,
        (Some(Role::Student), Area::Student) => Route::Student,
        _ => Route::Login,
    }
}
