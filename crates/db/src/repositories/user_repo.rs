//! Repository for the `users` table.

use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::user::{User, UserFields};
use crate::{with_deadline, QUERY_TIMEOUT};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at, name, email, password_hash, activated, version";

/// Unique constraint on `users.email`.
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Map a unique-email violation to [`StoreError::DuplicateEmail`].
fn classify_write_error(err: StoreError) -> StoreError {
    if err.violates_unique(EMAIL_UNIQUE_CONSTRAINT) {
        StoreError::DuplicateEmail
    } else {
        err
    }
}

/// Provides versioned persistence for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user, returning the stored row with `version = 1`.
    pub async fn insert(pool: &PgPool, fields: &UserFields) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, activated)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let user = with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, User>(&query)
                .bind(&fields.name)
                .bind(&fields.email)
                .bind(fields.password.hash())
                .bind(fields.activated)
                .fetch_one(pool),
        )
        .await
        .map_err(classify_write_error)?;

        tracing::debug!(user_id = user.id, "User inserted");
        Ok(user)
    }

    /// Fetch a user by id. Ids below 1 fail without touching the database.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<User, StoreError> {
        if id < 1 {
            return Err(StoreError::NotFound);
        }

        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, User>(&query)
                .bind(id)
                .fetch_optional(pool),
        )
        .await?
        .ok_or(StoreError::NotFound)
    }

    /// Fetch a user by email (case-sensitive).
    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<User, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, User>(&query)
                .bind(email)
                .fetch_optional(pool),
        )
        .await?
        .ok_or(StoreError::NotFound)
    }

    /// Write `user` back if its version still matches, bumping the version.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] when the new email belongs
    /// to another user, and with [`StoreError::EditConflict`] when the row
    /// is gone or its version moved on.
    pub async fn update(pool: &PgPool, user: &mut User) -> Result<(), StoreError> {
        let new_version = with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_scalar::<_, i32>(
                "UPDATE users
                 SET name = $1, email = $2, password_hash = $3, activated = $4,
                     version = version + 1
                 WHERE id = $5 AND version = $6
                 RETURNING version",
            )
            .bind(&user.fields.name)
            .bind(&user.fields.email)
            .bind(user.fields.password.hash())
            .bind(user.fields.activated)
            .bind(user.id)
            .bind(user.version)
            .fetch_optional(pool),
        )
        .await
        .map_err(classify_write_error)?
        .ok_or(StoreError::EditConflict)?;

        user.version = new_version;
        Ok(())
    }
}
