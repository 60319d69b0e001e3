//! Error types for token decoding.

/// Errors that can occur while decoding a bearer token's payload.
///
/// Callers in the session layer treat every variant identically — a token
/// that fails to decode is handled the same as no token at all — but the
/// variants are kept distinct so logs can say *why* a token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token is not exactly three dot-separated segments.
    #[error("token must have exactly three dot-separated segments")]
    MalformedStructure,

    /// The payload segment is not valid base64url.
    #[error("payload segment is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded payload is not valid JSON (or doesn't match the
    /// claims shape).
    #[error("payload is not valid claims JSON: {0}")]
    Json(#[from] serde_json::Error),
}
