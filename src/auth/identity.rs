//! Authenticated identity record

use crate::auth::team::{self, TeamSlug};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The organizational identity of an authenticated user.
///
/// Produced by decoding a session credential or reading a cached session
/// record. Immutable for the lifetime of a page view; replaced wholesale
/// on re-login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Employee identifier
    pub employee_id: Uuid,
    /// Department identifier, when the backend supplied one
    #[serde(default)]
    pub department_id: Option<Uuid>,
    /// Department display name
    #[serde(default)]
    pub department_name: String,
    /// Role identifier, when the backend supplied one
    #[serde(default)]
    pub role_id: Option<Uuid>,
    /// Role display name
    #[serde(default)]
    pub role_name: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Login name
    #[serde(default)]
    pub username: String,
}

impl Identity {
    /// Resolve this identity's canonical team designation.
    pub fn team_slug(&self) -> TeamSlug {
        team::resolve_team_slug(&self.department_name, &self.role_name)
    }

    /// True iff this identity is the organization head.
    pub fn is_org_head(&self) -> bool {
        team::is_org_head(&self.department_name, &self.role_name)
    }

    /// True iff this identity is a per-team head.
    pub fn is_team_head(&self) -> bool {
        team::is_team_head(&self.role_name)
    }
}

/// Claims carried in the payload segment of the bearer credential.
///
/// Decoded without signature verification as a read-only UX convenience;
/// the backend re-checks authorization on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (employee ID)
    pub sub: Uuid,
    /// Department identifier
    #[serde(default)]
    pub department_id: Option<Uuid>,
    /// Department display name
    #[serde(default)]
    pub department_name: Option<String>,
    /// Role identifier
    #[serde(default)]
    pub role_id: Option<Uuid>,
    /// Role display name
    #[serde(default)]
    pub role_name: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Login name
    #[serde(default)]
    pub username: Option<String>,
    /// Expiration timestamp (unread; expiry is the backend's concern)
    #[serde(default)]
    pub exp: Option<u64>,
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            employee_id: claims.sub,
            department_id: claims.department_id,
            department_name: claims.department_name.unwrap_or_default(),
            role_id: claims.role_id,
            role_name: claims.role_name.unwrap_or_default(),
            email: claims.email.unwrap_or_default(),
            username: claims.username.unwrap_or_default(),
        }
    }
}
