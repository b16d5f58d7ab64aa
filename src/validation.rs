//! Interop with stillwater's `Validation`.
//!
//! [`FieldError`] is a `Semigroup`, so it can serve as the error side of a
//! `stillwater::Validation` and be accumulated with `Validation::and`.

use stillwater::Validation;

use crate::error::FieldError;

/// Type alias for validation results carrying a [`FieldError`].
pub type ValidationResult<T> = Validation<T, FieldError>;

/// Pairs a value with the outcome of validating it.
///
/// `None` and errors without leaves become `Validation::Success(value)`.
///
/// # Example
///
/// ```rust
/// use fielderr::{into_validation, FieldError};
///
/// let ok = into_validation("web", None);
/// assert!(ok.is_success());
///
/// let failed = into_validation("", Some(FieldError::missing_field(["name"])));
/// assert!(failed.is_failure());
/// ```
pub fn into_validation<T>(value: T, error: Option<FieldError>) -> ValidationResult<T> {
    match error {
        Some(error) if !error.is_empty() => Validation::Failure(error),
        _ => Validation::Success(value),
    }
}
