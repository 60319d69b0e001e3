//! # Rollcall
//!
//! Client library for a face-recognition attendance portal.
//!
//! The backend owns everything hard (face matching, geofencing, model
//! training); this library owns the client side of the session: decoding
//! the bearer token, restoring the login state across restarts,
//! auto-logging-out at token expiry, calling the REST API, and deciding
//! which area of the portal a user belongs in.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use rollcall::prelude::*;
//!
//! # async fn run() -> Result<(), rollcall::RollcallError> {
//! let store = FileStore::open("session.json")?;
//! let portal = PortalBuilder::new()
//!     .base_url("https://attendance.example.edu/api")
//!     .build(store, NoopNavigator)?;
//!
//! portal.start(); // restore any persisted session
//! match portal.home_route() {
//!     Route::Landing => { /* show login */ }
//!     route => { /* enter the portal */ let _ = route; }
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod portal;
mod routing;

pub use error::RollcallError;
pub use portal::{Portal, PortalBuilder};
pub use routing::{Area, Route};

/// One-stop imports for portal applications.
pub mod prelude {
    pub use rollcall_api::{ApiClient, ApiError, LoginRequest};
    pub use rollcall_session::{
        Navigator, NoopNavigator, Role, Session, SessionManager, UserIdentity,
    };
    pub use rollcall_store::{FileStore, MemoryStore, Store};
    pub use rollcall_token::{Claims, decode_claims};

    pub use crate::{Area, Portal, PortalBuilder, RollcallError, Route};
}
