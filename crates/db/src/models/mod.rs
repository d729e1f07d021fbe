//! Row models, request DTOs, and the validation rules for each resource.

pub mod movie;
pub mod user;
