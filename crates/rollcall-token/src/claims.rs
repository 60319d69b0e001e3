//! The decoded token payload.

use std::time::Duration;

use serde::Deserialize;

/// Claims extracted from a token's payload segment.
///
/// Every field is optional: backends differ in what they embed, and the
/// session layer has a defined fallback for each missing claim. Unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Claims {
    /// Expiry instant, seconds since the Unix epoch.
    pub exp: Option<i64>,

    /// Display name of the principal.
    pub name: Option<String>,

    /// Subject — typically the student or admin ID.
    pub sub: Option<String>,

    /// Plain role claim (`"student"` / `"admin"`).
    pub role: Option<String>,

    /// Role claim under the namespaced key some identity providers emit
    /// instead of a plain `role` field.
    #[serde(rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role")]
    pub namespaced_role: Option<String>,

    /// Student ID, when the backend includes it directly.
    pub student_id: Option<String>,
}

impl Claims {
    /// Expiry instant in epoch **milliseconds**, if the token carries one.
    pub fn expires_at_ms(&self) -> Option<i64> {
        self.exp.map(|exp| exp * 1000)
    }

    /// Whether the token has expired as of `now_ms` (epoch milliseconds).
    ///
    /// A token without an `exp` claim never expires client-side.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        matches!(self.expires_at_ms(), Some(at) if at <= now_ms)
    }

    /// Time remaining until expiry, if it is strictly positive.
    ///
    /// Returns `None` for tokens without `exp` and for tokens already at
    /// or past their expiry — callers schedule a logout timer only when
    /// this returns `Some`.
    pub fn remaining_ttl(&self, now_ms: i64) -> Option<Duration> {
        let at = self.expires_at_ms()?;
        let remaining = at - now_ms;
        if remaining > 0 {
            Some(Duration::from_millis(remaining as u64))
        } else {
            None
        }
    }

    /// The role claim, preferring the plain key over the namespaced one.
    pub fn role_claim(&self) -> Option<&str> {
        self.role.as_deref().or(self.namespaced_role.as_deref())
    }
}
