//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every method issues a single
//! statement under [`crate::QUERY_TIMEOUT`].

pub mod movie_repo;
pub mod user_repo;

pub use movie_repo::MovieRepo;
pub use user_repo::UserRepo;
