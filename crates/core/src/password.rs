//! Account passwords as a two-state value.
//!
//! A [`Password`] is either freshly set from user input (plaintext kept for
//! validation alongside its hash) or hash-only as loaded from the store.
//! Both states always carry an Argon2id PHC hash, so there is no way to
//! build a password the store could persist without one.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::CoreError;

#[derive(Clone)]
pub enum Password {
    /// Set from request input during this request.
    Pending { plaintext: String, hash: String },
    /// Loaded from the database.
    Hashed(String),
}

impl Password {
    /// Hash `plaintext` with Argon2id and a random salt.
    pub fn set(plaintext: &str) -> Result<Self, CoreError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| CoreError::Internal(format!("password hashing failed: {e}")))?;
        Ok(Self::Pending {
            plaintext: plaintext.to_string(),
            hash: hash.to_string(),
        })
    }

    /// The PHC-formatted hash.
    pub fn hash(&self) -> &str {
        match self {
            Password::Pending { hash, .. } | Password::Hashed(hash) => hash.as_str(),
        }
    }

    /// The plaintext, only while the password is pending.
    pub fn plaintext(&self) -> Option<&str> {
        match self {
            Password::Pending { plaintext, .. } => Some(plaintext.as_str()),
            Password::Hashed(_) => None,
        }
    }

    /// Check `plaintext` against the stored hash.
    pub fn matches(&self, plaintext: &str) -> Result<bool, CoreError> {
        let parsed = PasswordHash::new(self.hash())
            .map_err(|e| CoreError::Internal(format!("stored password hash is invalid: {e}")))?;
        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CoreError::Internal(format!(
                "password verification failed: {e}"
            ))),
        }
    }
}

impl From<String> for Password {
    fn from(hash: String) -> Self {
        Password::Hashed(hash)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Password::Pending { .. } => f.write_str("Password::Pending(..)"),
            Password::Hashed(_) => f.write_str("Password::Hashed(..)"),
        }
    }
}
