use std::time::Duration;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Failures surfaced by the resource stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// The row was deleted or its version moved on since it was read.
    /// The two cases are deliberately not told apart.
    #[error("edit conflict: record was modified or deleted")]
    EditConflict,

    #[error("a user with this email address already exists")]
    DuplicateEmail,

    #[error("store call exceeded {0:?}")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// `true` when this is a unique-constraint violation on `constraint`.
    pub fn violates_unique(&self, constraint: &str) -> bool {
        match self {
            StoreError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                    && db_err.constraint() == Some(constraint)
            }
            _ => false,
        }
    }
}
