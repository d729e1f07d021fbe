//! Movie entity model, DTOs, and validation.

use marquee_core::runtime::Runtime;
use marquee_core::types::{DbId, Timestamp};
use marquee_core::validator::{unique, Validator};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Earliest accepted release year.
pub const MIN_YEAR: i32 = 1888;

/// Longest accepted title, in bytes.
pub const MAX_TITLE_BYTES: usize = 500;

/// Most genres a movie may carry.
pub const MAX_GENRES: usize = 5;

/// Sort keys accepted by the movie listing.
pub const SORT_SAFELIST: &[&str] = &[
    "id", "title", "year", "runtime", "-id", "-title", "-year", "-runtime",
];

/// The editable part of a movie. Also the request body for creation.
///
/// Missing fields decode to their zero values so that validation, not
/// decoding, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(deny_unknown_fields)]
pub struct MovieFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    #[sqlx(try_from = "i32")]
    pub runtime: Runtime,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Full row from the `movies` table.
///
/// Serializes as `{id, title, year, runtime, genres, version}`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Movie {
    pub id: DbId,
    #[serde(skip)]
    pub created_at: Timestamp,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: MovieFields,
    /// Optimistic-concurrency token; starts at 1.
    pub version: i32,
}

/// Partial update body. Absent or `null` fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<Runtime>,
    pub genres: Option<Vec<String>>,
}

impl UpdateMovie {
    pub fn apply_to(self, fields: &mut MovieFields) {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(year) = self.year {
            fields.year = year;
        }
        if let Some(runtime) = self.runtime {
            fields.runtime = runtime;
        }
        if let Some(genres) = self.genres {
            fields.genres = genres;
        }
    }
}

/// Check a movie against the catalog rules. `current_year` bounds the
/// release year from above.
pub fn validate_movie(v: &mut Validator, movie: &MovieFields, current_year: i32) {
    v.check(!movie.title.is_empty(), "title", "must be provided");
    v.check(
        movie.title.len() <= MAX_TITLE_BYTES,
        "title",
        format!("must not be more than {MAX_TITLE_BYTES} bytes long"),
    );

    v.check(movie.year != 0, "year", "must be provided");
    v.check(
        movie.year >= MIN_YEAR,
        "year",
        format!("must be greater than {MIN_YEAR}"),
    );
    v.check(movie.year <= current_year, "year", "must not be in the future");

    v.check(movie.runtime.minutes() != 0, "runtime", "must be provided");
    v.check(
        movie.runtime.minutes() > 0,
        "runtime",
        "must be a positive integer",
    );

    v.check(
        !movie.genres.is_empty(),
        "genres",
        "must contain at least 1 genre",
    );
    v.check(
        movie.genres.len() <= MAX_GENRES,
        "genres",
        format!("must not contain more than {MAX_GENRES} genres"),
    );
    v.check(
        unique(&movie.genres),
        "genres",
        "must not contain duplicate values",
    );
}
