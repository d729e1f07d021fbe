//! Query-string helpers for list endpoints.
//!
//! Values arrive as raw strings so that a malformed number becomes a field
//! error in the response instead of a generic extractor rejection.

use marquee_core::validator::Validator;
use serde::Deserialize;

/// `GET /v1/movies?title=&genres=&page=&page_size=&sort=`
#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesParams {
    pub title: Option<String>,
    pub genres: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
}

/// A string parameter, or `default` when absent or empty.
pub fn read_string(value: Option<&str>, default: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

/// Comma-separated values, or an empty list when absent or empty.
pub fn read_csv(value: Option<&str>) -> Vec<String> {
    match value {
        Some(s) if !s.is_empty() => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// An integer parameter, or `default` when absent or empty.
///
/// A value that does not parse records `"must be an integer value"` against
/// `key` and yields `default`.
pub fn read_int(value: Option<&str>, key: &str, default: i64, v: &mut Validator) -> i64 {
    match value {
        Some(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
            v.add_error(key, "must be an integer value");
            default
        }),
        _ => default,
    }
}
