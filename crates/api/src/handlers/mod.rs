//! Request handlers.
//!
//! Handlers decode and validate input, delegate to the repositories in
//! `marquee_db`, and map failures via [`AppError`](crate::error::AppError).

pub mod movies;
pub mod users;
