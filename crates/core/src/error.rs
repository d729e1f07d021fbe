use crate::validator::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}
