//! Repository for the `movies` table.

use marquee_core::filters::{calculate_metadata, Filters, Metadata};
use marquee_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::error::StoreError;
use crate::models::movie::{Movie, MovieFields};
use crate::{with_deadline, QUERY_TIMEOUT};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at, title, year, runtime, genres, version";

/// A listed movie plus the size of the whole filtered set.
#[derive(FromRow)]
struct ListedMovie {
    total_records: i64,
    #[sqlx(flatten)]
    movie: Movie,
}

/// Provides versioned CRUD and filtered listing for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a movie. The database assigns `id`, `created_at`, and
    /// `version = 1`; the stored row is returned.
    pub async fn insert(pool: &PgPool, fields: &MovieFields) -> Result<Movie, StoreError> {
        let query = format!(
            "INSERT INTO movies (title, year, runtime, genres)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let movie = with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Movie>(&query)
                .bind(&fields.title)
                .bind(fields.year)
                .bind(fields.runtime.minutes())
                .bind(&fields.genres)
                .fetch_one(pool),
        )
        .await?;

        tracing::debug!(movie_id = movie.id, "Movie inserted");
        Ok(movie)
    }

    /// Fetch a movie by id. Ids below 1 fail without touching the database.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Movie, StoreError> {
        if id < 1 {
            return Err(StoreError::NotFound);
        }

        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Movie>(&query)
                .bind(id)
                .fetch_optional(pool),
        )
        .await?
        .ok_or(StoreError::NotFound)
    }

    /// Write `movie` back if its version still matches the stored one,
    /// bumping the version by one. On success `movie.version` holds the new
    /// version.
    ///
    /// A missing row and a stale version both yield
    /// [`StoreError::EditConflict`]; callers that need to tell them apart
    /// must re-fetch.
    pub async fn update(pool: &PgPool, movie: &mut Movie) -> Result<(), StoreError> {
        let new_version = with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_scalar::<_, i32>(
                "UPDATE movies
                 SET title = $1, year = $2, runtime = $3, genres = $4, version = version + 1
                 WHERE id = $5 AND version = $6
                 RETURNING version",
            )
            .bind(&movie.fields.title)
            .bind(movie.fields.year)
            .bind(movie.fields.runtime.minutes())
            .bind(&movie.fields.genres)
            .bind(movie.id)
            .bind(movie.version)
            .fetch_optional(pool),
        )
        .await?
        .ok_or(StoreError::EditConflict)?;

        movie.version = new_version;
        Ok(())
    }

    /// Delete a movie by id. Deleting a missing movie is `NotFound`, so a
    /// repeated delete fails the second time.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), StoreError> {
        if id < 1 {
            return Err(StoreError::NotFound);
        }

        let result = with_deadline(
            QUERY_TIMEOUT,
            sqlx::query("DELETE FROM movies WHERE id = $1")
                .bind(id)
                .execute(pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// One page of movies matching `title` (full-text, empty matches all)
    /// and containing every genre in `genres` (empty matches all), plus
    /// pagination metadata computed over the whole filtered set.
    ///
    /// `filters` must already have passed
    /// [`validate_filters`](marquee_core::filters::validate_filters).
    pub async fn list(
        pool: &PgPool,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, Metadata), StoreError> {
        let query = format!(
            "SELECT count(*) OVER() AS total_records, {COLUMNS}
             FROM movies
             WHERE (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '')
               AND (genres @> $2 OR cardinality($2::text[]) = 0)
             ORDER BY {column} {direction}, id ASC
             LIMIT $3 OFFSET $4",
            column = filters.sort_column(),
            direction = filters.sort_direction(),
        );

        let rows = with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, ListedMovie>(&query)
                .bind(title)
                .bind(genres)
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(pool),
        )
        .await?;

        let total_records = rows.first().map_or(0, |row| row.total_records);
        let metadata = calculate_metadata(total_records, filters.page, filters.page_size);
        let movies = rows.into_iter().map(|row| row.movie).collect();

        Ok((movies, metadata))
    }
}
