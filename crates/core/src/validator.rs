//! Field-level validation accumulator.
//!
//! A [`Validator`] collects at most one message per field: the first
//! failure recorded for a field wins and later ones are ignored. Create a
//! fresh instance per request.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

use validator::ValidateEmail;

use crate::error::CoreError;

/// Field name -> first failure message for that field.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no failures have been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` for `field` unless the field already failed.
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) {
        if !ok {
            self.add_error(field, message);
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Consume the validator, yielding `Ok(())` when valid or the collected
    /// failures as [`CoreError::Validation`].
    pub fn finish(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self.errors))
        }
    }
}

/// `true` when `value` is one of `permitted`.
pub fn permitted_value<T: PartialEq + ?Sized>(value: &T, permitted: &[&T]) -> bool {
    permitted.iter().any(|p| *p == value)
}

/// `true` when every element of `values` is distinct.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}

/// `true` when `value` is a syntactically valid email address.
pub fn is_email(value: &str) -> bool {
    value.validate_email()
}
