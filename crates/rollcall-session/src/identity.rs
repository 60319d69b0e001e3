//! The authenticated principal as the rest of the application sees it.

use std::fmt;

use rollcall_token::Claims;
use serde::{Deserialize, Serialize};

/// The principal's role, which decides portal routing.
///
/// Anything the backend sends that isn't recognized parses as `Student` —
/// the less privileged area. The admin area is still enforced
/// server-side on every call; this value only steers the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

impl Role {
    /// Parses a role claim; absent callers should use [`Role::default`].
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Student
        }
    }

    /// The wire form of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logged-in user.
///
/// Two sources produce one of these, with different richness:
///
/// - the cached `user` record the backend returned at login — all fields
///   may be present;
/// - the token-claims fallback ([`UserIdentity::from_claims`]) — only
///   `name`, `role`, and `student_id`, since the token carries no
///   profile data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_registered: Option<bool>,
}

impl UserIdentity {
    /// Derives a minimal identity from token claims.
    ///
    /// Used only when no cached record exists. Profile fields stay empty
    /// on this path — they are populated exclusively from the richer
    /// record the backend returns at login.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            name: claims
                .name
                .clone()
                .or_else(|| claims.sub.clone())
                .unwrap_or_default(),
            role: claims.role_claim().map(Role::parse).unwrap_or_default(),
            student_id: claims.student_id.clone().or_else(|| claims.sub.clone()),
            ..Default::default()
        }
    }
}
