//! Pagination and sorting parameters for list endpoints.
//!
//! The sort key arrives from the query string, so it is only ever turned
//! into SQL after [`validate_filters`] has confirmed it is on the
//! caller-supplied safelist. [`Filters::sort_column`] then returns the
//! safelist's own `'static` entry, never the caller's string.

use std::fmt;

use serde::Serialize;

use crate::validator::{permitted_value, Validator};

/// Largest accepted `page` value.
pub const MAX_PAGE: i64 = 10_000_000;

/// Largest accepted `page_size` value.
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    /// Column name, optionally prefixed with `-` for descending order.
    pub sort: String,
    pub sort_safelist: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl Filters {
    /// The column to order by, taken from the safelist.
    ///
    /// # Panics
    ///
    /// Panics if `sort` is not on the safelist. Callers must run
    /// [`validate_filters`] first; reaching this with an unknown key is a
    /// programming error.
    pub fn sort_column(&self) -> &'static str {
        self.sort_safelist
            .iter()
            .copied()
            .find(|safe| *safe == self.sort)
            .map(|safe| safe.strip_prefix('-').unwrap_or(safe))
            .unwrap_or_else(|| panic!("unsafe sort parameter: {}", self.sort))
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Check page bounds and safelist membership of the sort key.
pub fn validate_filters(v: &mut Validator, f: &Filters) {
    v.check(f.page > 0, "page", "must be greater than zero");
    v.check(
        f.page <= MAX_PAGE,
        "page",
        format!("must be a maximum of {MAX_PAGE}"),
    );
    v.check(f.page_size > 0, "page_size", "must be greater than zero");
    v.check(
        f.page_size <= MAX_PAGE_SIZE,
        "page_size",
        format!("must be a maximum of {MAX_PAGE_SIZE}"),
    );
    v.check(
        permitted_value(f.sort.as_str(), f.sort_safelist),
        "sort",
        "invalid sort value",
    );
}

/// Pagination details returned alongside a page of results.
///
/// Every field is absent when there are no matching records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_records: Option<i64>,
}

pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    if total_records == 0 {
        return Metadata::default();
    }

    Metadata {
        current_page: Some(page),
        page_size: Some(page_size),
        first_page: Some(1),
        last_page: Some((total_records + page_size - 1) / page_size),
        total_records: Some(total_records),
    }
}
