//! Shared response envelope types for API handlers.
//!
//! Successful responses wrap their payload in `{ "data": ... }`; listings add
//! a `metadata` object alongside.

use marquee_core::filters::Metadata;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: movie }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "metadata": {...} }` for paginated listings.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub metadata: Metadata,
}

/// `{ "message": "..." }` for operations with nothing to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
