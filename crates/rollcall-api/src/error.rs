//! Error types for the API layer.

use rollcall_store::StoreError;

/// Errors surfaced by API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent, timed out, or the response body
    /// could not be read/decoded.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the bearer token (HTTP 401).
    ///
    /// By the time callers see this, the session has already been
    /// invalidated and a redirect to the landing view scheduled.
    #[error("backend rejected the session (unauthorized)")]
    Unauthorized,

    /// The backend answered with a non-success status other than 401.
    /// `message` is the backend's `error` field when it sent one.
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Persisting the fresh token at login failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
