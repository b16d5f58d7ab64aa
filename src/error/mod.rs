//! Error types for validation failures.
//!
//! [`FieldError`] accumulates field-level validation failures and renders
//! them; [`FieldErrorExt`] extends `Option<FieldError>`, the "maybe failed"
//! result of a validation function, with the same operations.

mod ext;
mod field_error;

pub use ext::FieldErrorExt;
pub use field_error::FieldError;
