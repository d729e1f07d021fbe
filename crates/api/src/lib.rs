//! HTTP layer for the movie catalog: routing, request decoding, error
//! mapping, and background work.

pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod json;
pub mod mailer;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
