//! Unified error type for the Rollcall facade.

use rollcall_api::ApiError;
use rollcall_store::StoreError;
use rollcall_token::TokenError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `rollcall` meta-crate, callers deal with this single
/// type instead of importing errors from each sub-crate; the `#[from]`
/// attributes let `?` convert sub-crate errors automatically.
///
/// Note that the session layer contributes no variant: by design it
/// never surfaces errors, only a (possibly empty) session.
#[derive(Debug, thiserror::Error)]
pub enum RollcallError {
    /// A token-decoding error (malformed structure, base64, JSON).
    #[error(transparent)]
    Token(#[from] TokenError),

    /// A storage error (I/O, corrupt store file).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An API error (transport, unauthorized, backend-reported).
    #[error(transparent)]
    Api(#[from] ApiError),
}
