//! Bearer-token payload decoding for Rollcall.
//!
//! The backend issues a three-segment signed token at login
//! (`header.payload.signature`). This crate decodes the middle segment —
//! base64url-encoded JSON — into a typed [`Claims`] struct and provides
//! expiry arithmetic on top of it.
//!
//! # Not a security boundary
//!
//! The signature is **never verified** here. Every API call is
//! independently authorized by the backend; the client-side decode exists
//! only so the UI can route and auto-logout without a network round-trip.
//! Treating these claims as trusted for anything beyond presentation would
//! be a mistake.

mod claims;
mod decode;
mod error;

pub use claims::Claims;
pub use decode::decode_claims;
pub use error::TokenError;
