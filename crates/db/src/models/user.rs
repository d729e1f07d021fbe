//! User entity model and validation.

use marquee_core::password::Password;
use marquee_core::types::{DbId, Timestamp};
use marquee_core::validator::{is_email, Validator};
use serde::Serialize;
use sqlx::FromRow;

/// Longest accepted display name, in bytes.
pub const MAX_NAME_BYTES: usize = 500;

pub const MIN_PASSWORD_BYTES: usize = 8;
pub const MAX_PASSWORD_BYTES: usize = 72;

/// The writable part of a user.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    /// Never serialized.
    #[serde(skip)]
    #[sqlx(rename = "password_hash", try_from = "String")]
    pub password: Password,
    pub activated: bool,
}

/// Full row from the `users` table.
///
/// Serializes as `{id, created_at, name, email, activated}`; the password
/// and version stay internal.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: DbId,
    pub created_at: Timestamp,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: UserFields,
    #[serde(skip)]
    pub version: i32,
}

pub fn validate_name(v: &mut Validator, name: &str) {
    v.check(!name.is_empty(), "name", "must be provided");
    v.check(
        name.len() <= MAX_NAME_BYTES,
        "name",
        format!("must not be more than {MAX_NAME_BYTES} bytes long"),
    );
}

pub fn validate_email(v: &mut Validator, email: &str) {
    v.check(!email.is_empty(), "email", "must be provided");
    v.check(is_email(email), "email", "must be a valid email address");
}

pub fn validate_password_plaintext(v: &mut Validator, password: &str) {
    v.check(!password.is_empty(), "password", "must be provided");
    v.check(
        password.len() >= MIN_PASSWORD_BYTES,
        "password",
        format!("must be at least {MIN_PASSWORD_BYTES} bytes long"),
    );
    v.check(
        password.len() <= MAX_PASSWORD_BYTES,
        "password",
        format!("must not be more than {MAX_PASSWORD_BYTES} bytes long"),
    );
}

/// Check a user against the account rules.
///
/// # Panics
///
/// Panics if the password hash is empty; a user without a hash must never
/// reach the store.
pub fn validate_user(v: &mut Validator, user: &UserFields) {
    validate_name(v, &user.name);
    validate_email(v, &user.email);

    if let Some(plaintext) = user.password.plaintext() {
        validate_password_plaintext(v, plaintext);
    }

    assert!(
        !user.password.hash().is_empty(),
        "missing password hash for user"
    );
}
