//! Pure domain layer for the movie catalog: identifiers, the input
//! validator, list filters, the runtime field codec, and password values.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod filters;
pub mod password;
pub mod runtime;
pub mod types;
pub mod validator;
