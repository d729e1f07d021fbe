use std::any::Any;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use marquee_core::error::CoreError;
use marquee_core::validator::FieldErrors;
use marquee_db::error::StoreError;
use serde_json::json;

use crate::background::panic_message;
use crate::json::DecodeError;

const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";
const INTERNAL_MESSAGE: &str =
    "the server encountered a problem and could not process your request";

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses
/// of the form `{"error": ..., "code": ...}`. Validation failures add a
/// `fields` object mapping each field to its message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `marquee_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by a resource store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A request body that could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route or no resource matched the request.
    #[error("Not found")]
    NotFound,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(fields) => validation_failed(fields.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- Request body errors ---
            AppError::Decode(err @ DecodeError::BodyTooLarge { .. }) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                err.to_string(),
                None,
            ),
            AppError::Decode(err) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string(), None),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
            AppError::NotFound => not_found(),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(fields) = fields {
            body["fields"] = json!(fields);
        }

        (status, axum::Json(body)).into_response()
    }
}

type ErrorParts = (StatusCode, &'static str, String, Option<FieldErrors>);

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - `EditConflict` maps to 409.
/// - `DuplicateEmail` maps to 422 with the message under `fields.email`.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> ErrorParts {
    match err {
        StoreError::NotFound => not_found(),
        StoreError::EditConflict => (
            StatusCode::CONFLICT,
            "EDIT_CONFLICT",
            "unable to update the record due to an edit conflict, please try again".to_string(),
            None,
        ),
        StoreError::DuplicateEmail => {
            let mut fields = FieldErrors::new();
            fields.insert("email".into(), err.to_string());
            validation_failed(fields)
        }
        StoreError::Timeout(_) | StoreError::Database(_) => {
            tracing::error!(error = %err, "Store error");
            internal()
        }
    }
}

fn validation_failed(fields: FieldErrors) -> ErrorParts {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        "VALIDATION_ERROR",
        "validation failed".to_string(),
        Some(fields),
    )
}

fn not_found() -> ErrorParts {
    (StatusCode::NOT_FOUND, "NOT_FOUND", NOT_FOUND_MESSAGE.to_string(), None)
}

fn internal() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
        None,
    )
}

/// Router fallback for paths that match no route.
pub async fn route_not_found() -> AppError {
    AppError::NotFound
}

/// Response for a handler that panicked, installed in `CatchPanicLayer`.
///
/// The connection is closed after the response is written.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!(panic = %panic_message(payload.as_ref()), "Handler panicked");

    let (status, code, message, _) = internal();
    let body = json!({
        "error": message,
        "code": code,
    });
    (
        status,
        [(header::CONNECTION, "close")],
        axum::Json(body),
    )
        .into_response()
}
