//! Chaining on `Option<FieldError>`.

use crate::error::FieldError;

/// Field error operations for `Option<FieldError>`.
///
/// Validation functions return `None` on success. This trait gives that
/// optional value the same surface as [`FieldError`], so an error can be
/// prefixed and combined without checking for success first. Every
/// operation on `None` yields `None`, except [`also`](Self::also), which
/// yields the other side.
///
/// # Example
///
/// ```rust
/// use fielderr::{FieldError, FieldErrorExt};
///
/// fn validate_name(name: &str) -> Option<FieldError> {
///     name.is_empty().then(|| FieldError::missing_field(["name"]))
/// }
///
/// let ok = validate_name("web").via_field("metadata");
/// assert!(ok.is_none());
/// assert_eq!(ok.to_error_string(), "");
///
/// let err = validate_name("").via_field("metadata");
/// assert_eq!(err.to_error_string(), "missing field(s): metadata.name");
/// ```
pub trait FieldErrorExt {
    /// See [`FieldError::via_field`].
    fn via_field(&self, prefix: impl AsRef<str>) -> Option<FieldError>;

    /// See [`FieldError::via_fields`].
    fn via_fields<I, S>(&self, prefix: I) -> Option<FieldError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    /// See [`FieldError::via_index`].
    fn via_index(&self, index: usize) -> Option<FieldError>;

    /// See [`FieldError::via_key`].
    fn via_key(&self, key: &str) -> Option<FieldError>;

    /// See [`FieldError::via_field_index`].
    fn via_field_index(&self, field: &str, index: usize) -> Option<FieldError>;

    /// See [`FieldError::via_field_key`].
    fn via_field_key(&self, field: &str, key: &str) -> Option<FieldError>;

    /// See [`FieldError::also`].
    fn also(&self, other: impl Into<Option<FieldError>>) -> Option<FieldError>;

    /// See [`FieldError::also_all`].
    fn also_all<I>(&self, others: I) -> Option<FieldError>
    where
        I: IntoIterator,
        I::Item: Into<Option<FieldError>>;

    /// Renders the error, or the empty string for `None`.
    fn to_error_string(&self) -> String;

    /// Converts into a `Result`, treating `None` and empty errors as success.
    fn into_result(self) -> Result<(), FieldError>;
}

impl FieldErrorExt for Option<FieldError> {
    fn via_field(&self, prefix: impl AsRef<str>) -> Option<FieldError> {
        self.as_ref().and_then(|err| err.via_field(prefix))
    }

    fn via_fields<I, S>(&self, prefix: I) -> Option<FieldError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.as_ref().and_then(|err| err.via_fields(prefix))
    }

    fn via_index(&self, index: usize) -> Option<FieldError> {
        self.as_ref().and_then(|err| err.via_index(index))
    }

    fn via_key(&self, key: &str) -> Option<FieldError> {
        self.as_ref().and_then(|err| err.via_key(key))
    }

    fn via_field_index(&self, field: &str, index: usize) -> Option<FieldError> {
        self.as_ref()
            .and_then(|err| err.via_field_index(field, index))
    }

    fn via_field_key(&self, field: &str, key: &str) -> Option<FieldError> {
        self.as_ref().and_then(|err| err.via_field_key(field, key))
    }

    fn also(&self, other: impl Into<Option<FieldError>>) -> Option<FieldError> {
        self.also_all([other.into()])
    }

    fn also_all<I>(&self, others: I) -> Option<FieldError>
    where
        I: IntoIterator,
        I::Item: Into<Option<FieldError>>,
    {
        match self {
            Some(err) => err.also_all(others),
            None => FieldError::default().also_all(others),
        }
    }

    fn to_error_string(&self) -> String {
        self.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    fn into_result(self) -> Result<(), FieldError> {
        match self {
            Some(err) if !err.is_empty() => Err(err),
            _ => Ok(()),
        }
    }
}
