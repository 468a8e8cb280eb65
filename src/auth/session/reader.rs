//! Session snapshot and identity reader
//!
//! The session travels as an explicit value. Guards and resolvers take it
//! as a parameter; nothing reads ambient global state.

use crate::auth::identity::{Identity, SessionClaims};
use crate::auth::normalize::normalize;
use crate::auth::session::store::SessionStore;
use crate::config::SessionConfig;
use crate::utils::error::Result;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

/// Snapshot of the three session keys for one navigation attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Bearer credential, verbatim
    pub token: Option<String>,
    /// Role tag written at login
    pub role_tag: Option<String>,
    /// Serialized identity record written at login
    pub identity_record: Option<String>,
}

impl Session {
    /// Snapshot the configured keys out of a session store.
    pub fn from_store(store: &dyn SessionStore, config: &SessionConfig) -> Self {
        Self {
            token: store.get(&config.token_key),
            role_tag: store.get(&config.role_tag_key),
            identity_record: store.get(&config.identity_key),
        }
    }

    /// True iff a bearer credential is present at all, decodable or not.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// True iff the role tag marks a super-admin session.
    pub fn is_super_admin(&self, config: &SessionConfig) -> bool {
        self.role_tag
            .as_deref()
            .map(|tag| normalize(tag) == normalize(&config.super_admin_tag))
            .unwrap_or(false)
    }

    /// Extract the authenticated identity from this session, if any.
    ///
    /// Primary path: parse the structured identity record; parse failures
    /// are swallowed and fall through. Fallback path: decode the bearer
    /// credential's payload segment without signature verification (a
    /// read-only UX convenience, never a security boundary). Returns
    /// `None` when neither path yields data.
    pub fn read_identity(&self) -> Option<Identity> {
        if let Some(raw) = &self.identity_record {
            match serde_json::from_str::<Identity>(raw) {
                Ok(identity) => return Some(identity),
                Err(e) => debug!("malformed identity record, falling back to credential: {}", e),
            }
        }

        if let Some(token) = &self.token {
            match decode_claims_unverified(token) {
                Ok(claims) => return Some(Identity::from(claims)),
                Err(e) => debug!("undecodable bearer credential: {}", e),
            }
        }

        None
    }
}

/// Decode the payload segment of a bearer credential without verifying
/// its signature or expiry.
fn decode_claims_unverified(token: &str) -> Result<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}
