//! Test fixtures and data factories
//!
//! Factory methods for identities, session headers, and backend payloads.
//! All factories create real objects, not mocks.

use jsonwebtoken::{EncodingKey, Header, encode};
use leadflow_rs::auth::{Identity, SessionClaims};
use serde_json::{Value, json};
use uuid::Uuid;

/// Factory for creating test identities
pub struct IdentityFactory;

impl IdentityFactory {
    /// Create an identity for a department/role pair
    pub fn create(department: &str, role: &str) -> Identity {
        Identity {
            employee_id: Uuid::new_v4(),
            department_id: Some(Uuid::new_v4()),
            department_name: department.to_string(),
            role_id: Some(Uuid::new_v4()),
            role_name: role.to_string(),
            email: format!("test-{}@example.com", &Uuid::new_v4().to_string()[..8]),
            username: format!("user_{}", &Uuid::new_v4().to_string()[..8]),
        }
    }

    /// A field-marketing executive
    pub fn field_executive() -> Identity {
        Self::create("Field Marketing", "Executive")
    }

    /// A tele-marketing team head
    pub fn tele_head() -> Identity {
        Self::create("Tele Marketing", "Tele Head")
    }

    /// The organization head
    pub fn org_head() -> Identity {
        Self::create("IPQSHead", "IPQSHead")
    }
}

/// Serialize an identity for the `X-Identity` request header
pub fn identity_header(identity: &Identity) -> String {
    serde_json::to_string(identity).unwrap()
}

/// A signed bearer credential carrying the identity's claims.
///
/// The signing secret is arbitrary: the reader decodes the payload without
/// verification.
pub fn bearer_token(identity: &Identity) -> String {
    let claims = SessionClaims {
        sub: identity.employee_id,
        department_id: identity.department_id,
        department_name: Some(identity.department_name.clone()),
        role_id: identity.role_id,
        role_name: Some(identity.role_name.clone()),
        email: Some(identity.email.clone()),
        username: Some(identity.username.clone()),
        exp: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

/// A backend lead payload in a given stage
pub fn lead_json(id: Uuid, stage: &str) -> Value {
    json!({
        "id": id,
        "company": "Acme",
        "contact": "A. Customer",
        "value": 1200.0,
        "stage": stage,
        "assigned_employee_id": null,
    })
}

/// A backend employee payload
pub fn employee_json(id: Uuid, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
    })
}
