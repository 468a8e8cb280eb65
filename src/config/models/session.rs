//! Session store configuration
//!
//! The session store is an opaque key-value boundary written at login and
//! cleared at logout. This core only reads it; these settings name the keys
//! it reads.

use serde::{Deserialize, Serialize};

/// Session boundary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Store key holding the bearer credential
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// Store key holding the role tag written at login
    #[serde(default = "default_role_tag_key")]
    pub role_tag_key: String,
    /// Store key holding the serialized identity record
    #[serde(default = "default_identity_key")]
    pub identity_key: String,
    /// Role tag value marking a super-admin session (compared normalized)
    #[serde(default = "default_super_admin_tag")]
    pub super_admin_tag: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            role_tag_key: default_role_tag_key(),
            identity_key: default_identity_key(),
            super_admin_tag: default_super_admin_tag(),
        }
    }
}

impl SessionConfig {
    /// Merge session configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.token_key != default_token_key() {
            self.token_key = other.token_key;
        }
        if other.role_tag_key != default_role_tag_key() {
            self.role_tag_key = other.role_tag_key;
        }
        if other.identity_key != default_identity_key() {
            self.identity_key = other.identity_key;
        }
        if other.super_admin_tag != default_super_admin_tag() {
            self.super_admin_tag = other.super_admin_tag;
        }
        self
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, key) in [
            ("token_key", &self.token_key),
            ("role_tag_key", &self.role_tag_key),
            ("identity_key", &self.identity_key),
        ] {
            if key.is_empty() {
                return Err(format!("Session {} cannot be empty", name));
            }
        }
        Ok(())
    }
}

/// Default store key for the bearer credential
pub fn default_token_key() -> String {
    "token".to_string()
}

/// Default store key for the role tag
pub fn default_role_tag_key() -> String {
    "role".to_string()
}

/// Default store key for the identity record
pub fn default_identity_key() -> String {
    "identity".to_string()
}

/// Default super-admin role tag
pub fn default_super_admin_tag() -> String {
    "super-admin".to_string()
}
