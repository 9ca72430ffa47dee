//! Credential Store
//! Mission: Answer whether a username/password pair is the configured identity

use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::warn;

/// The single identity allowed to log in.
///
/// Only a bcrypt hash of the password is kept after construction.
pub struct CredentialStore {
    username: String,
    password_hash: String,
}

impl CredentialStore {
    pub fn new(username: impl Into<String>, password: &str) -> Result<Self> {
        Self::with_cost(username, password, DEFAULT_COST)
    }

    /// Same as [`CredentialStore::new`] with an explicit bcrypt cost (tests use the minimum).
    pub fn with_cost(username: impl Into<String>, password: &str, cost: u32) -> Result<Self> {
        let password_hash = hash(password, cost).context("Failed to hash password")?;
        Ok(Self {
            username: username.into(),
            password_hash,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Verify username and password. Never errors; a hashing failure counts as a mismatch.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }

        verify(password, &self.password_hash).unwrap_or_else(|e| {
            warn!("Password verification failed: {}", e);
            false
        })
    }
}
