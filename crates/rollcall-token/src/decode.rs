//! Splitting and decoding the token's payload segment.

use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};

use crate::{Claims, TokenError};

/// Decodes the payload segment of a bearer token into [`Claims`].
///
/// The token must be exactly three dot-separated segments. Only the middle
/// segment is touched; the header and signature are opaque to the client.
///
/// # Errors
/// - [`TokenError::MalformedStructure`] — not three segments
/// - [`TokenError::Base64`] — payload is not base64url
/// - [`TokenError::Json`] — decoded payload is not claims JSON
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::MalformedStructure);
    }

    let payload = decode_segment(segments[1])?;
    let claims = serde_json::from_slice(&payload)?;
    Ok(claims)
}

/// Base64url-decodes a single token segment.
///
/// Tokens are specified as unpadded base64url, but some backends emit
/// padded output. Try unpadded first, then padded.
fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    match URL_SAFE_NO_PAD.decode(segment) {
        Ok(bytes) => Ok(bytes),
        Err(_) => URL_SAFE.decode(segment).map_err(TokenError::Base64),
    }
}
