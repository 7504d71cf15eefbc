//! Back office user accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::DomainError;
use crate::validate;

pub const DEFAULT_ROLE: &str = "staff";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub password: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate::required_text("username", &self.username)?;
        validate::required_text("email", &self.email)?;
        validate::required_text("password", &self.password)
    }

    pub fn role(&self) -> &str {
        match self.role.as_deref() {
            Some(role) if !role.trim().is_empty() => role,
            _ => DEFAULT_ROLE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl UpdateUser {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate::required_text("username", &self.username)?;
        validate::required_text("email", &self.email)
    }

    pub fn role(&self) -> &str {
        match self.role.as_deref() {
            Some(role) if !role.trim().is_empty() => role,
            _ => DEFAULT_ROLE,
        }
    }
}

/// Salted SHA-256 password digest, stored as `salt$hex`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes `password` under a fresh random salt.
    pub fn generate(password: &str) -> Self {
        let salt = uuid::Uuid::new_v4().simple().to_string();
        Self::with_salt(&salt, password)
    }

    pub fn with_salt(salt: &str, password: &str) -> Self {
        let digest = Sha256::new()
            .chain_update(salt.as_bytes())
            .chain_update(password.as_bytes())
            .finalize();
        Self(format!("{salt}${}", hex::encode(digest)))
    }

    /// Wraps a value previously produced by [`PasswordHash::generate`].
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    pub fn verify(&self, password: &str) -> bool {
        match self.0.split_once('$') {
            Some((salt, _)) => Self::with_salt(salt, password) == *self,
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
