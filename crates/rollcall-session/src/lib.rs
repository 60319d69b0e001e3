//! Session and token-lifecycle management for Rollcall.
//!
//! This crate is the portal's single source of truth for "who is logged
//! in, with what role, until when". It owns:
//!
//! 1. **Restore** — rebuilding the session from the persistent store at
//!    startup ([`SessionManager::restore`])
//! 2. **Login / logout** — replacing and tearing down the session
//! 3. **Automatic expiry** — a cancellable one-shot timer that logs the
//!    user out the moment their token's `exp` claim passes
//!
//! # How it fits in the stack
//!
//! ```text
//! Routing / API layer (above)  ← reads the identity, reports 401s
//!     ↕
//! Session layer (this crate)   ← derives and tracks the identity
//!     ↕
//! Token + store layers (below) ← claims decoding, persistent key-value
//! ```
//!
//! Every failure path here converges to the unauthenticated state; the
//! manager never returns an error to its callers.

mod identity;
mod manager;
mod navigator;
mod session;

pub use identity::{Role, UserIdentity};
pub use manager::SessionManager;
pub use navigator::{Navigator, NoopNavigator};
pub use session::Session;
