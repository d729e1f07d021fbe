//! Strict JSON request decoding.
//!
//! Request bodies are capped in size, must hold exactly one JSON value,
//! and may not carry keys the target type does not declare. Every failure
//! is reported as a [`DecodeError`] whose message is safe to show to the
//! client.

use axum::extract::{FromRequest, Request};
use http_body_util::LengthLimitError;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::AppError;
use crate::state::AppState;

/// Why a request body could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("body must not be larger than {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("body could not be read")]
    UnreadableBody,

    #[error("body must not be empty")]
    EmptyBody,

    #[error("body contains badly-formed JSON (at character {offset})")]
    MalformedJson { offset: usize },

    #[error("body contains badly-formed JSON")]
    TruncatedJson,

    /// `field` is the path to the offending value when it is known.
    #[error("{}", type_mismatch_message(.field, .offset))]
    TypeMismatch { field: Option<String>, offset: usize },

    #[error("body contains unknown key \"{0}\"")]
    UnknownField(String),

    /// The value had the right JSON type but was rejected by the target
    /// type itself, e.g. a runtime string without the `min` unit.
    #[error("{0}")]
    InvalidValue(String),

    #[error("body must only contain a single JSON value")]
    MultipleJsonValues,
}

/// Decode exactly one JSON value of type `T` from `body`.
///
/// `limit` is the largest accepted body in bytes. Unknown object keys are
/// rejected only when `T` opts in with `#[serde(deny_unknown_fields)]`.
pub fn decode_strict<T: DeserializeOwned>(body: &[u8], limit: usize) -> Result<T, DecodeError> {
    if body.len() > limit {
        return Err(DecodeError::BodyTooLarge { limit });
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::EmptyBody);
    }

    let mut de = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|err| {
        let path = err.path().to_string();
        classify(&err.into_inner(), &path, body)
    })?;
    de.end().map_err(|_| DecodeError::MultipleJsonValues)?;
    Ok(value)
}

fn type_mismatch_message(field: &Option<String>, offset: &usize) -> String {
    match field {
        Some(field) => format!("body contains incorrect JSON type for field \"{field}\""),
        None => format!("body contains incorrect JSON type (at character {offset})"),
    }
}

/// `path` is the serde_path_to_error rendering of where decoding stopped;
/// `.` means the top-level value.
fn classify(err: &serde_json::Error, path: &str, body: &[u8]) -> DecodeError {
    match err.classify() {
        Category::Eof => DecodeError::TruncatedJson,
        Category::Io => DecodeError::UnreadableBody,
        Category::Syntax => DecodeError::MalformedJson {
            offset: byte_offset(body, err.line(), err.column()),
        },
        Category::Data => {
            let message = bare_message(err);
            if let Some(field) = unknown_field(&message) {
                DecodeError::UnknownField(field)
            } else if message.starts_with("invalid type:") || message.starts_with("invalid value:") {
                DecodeError::TypeMismatch {
                    field: (path != ".").then(|| path.to_string()),
                    offset: byte_offset(body, err.line(), err.column()),
                }
            } else {
                DecodeError::InvalidValue(message)
            }
        }
    }
}

/// The error text without serde_json's trailing position.
fn bare_message(err: &serde_json::Error) -> String {
    let full = err.to_string();
    let position = format!(" at line {} column {}", err.line(), err.column());
    full.strip_suffix(&position).unwrap_or(&full).to_string()
}

fn unknown_field(message: &str) -> Option<String> {
    let rest = message.strip_prefix("unknown field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

/// Convert serde_json's 1-based line/column into a byte offset.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let preceding: usize = body
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    preceding + column
}

/// JSON body extractor built on [`decode_strict`].
///
/// The body limit comes from [`ServerConfig::max_body_bytes`](crate::config::ServerConfig).
#[derive(Debug)]
pub struct StrictJson<T>(pub T);

impl<T> FromRequest<AppState> for StrictJson<T>
where
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let limit = state.config.max_body_bytes;
        let bytes = axum::body::to_bytes(req.into_body(), limit)
            .await
            .map_err(|err| {
                if err.into_inner().is::<LengthLimitError>() {
                    DecodeError::BodyTooLarge { limit }
                } else {
                    DecodeError::UnreadableBody
                }
            })?;

        Ok(StrictJson(decode_strict(&bytes, limit)?))
    }
}
