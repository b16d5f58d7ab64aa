//! Kind-to-validator lookup for admission webhooks.
//!
//! A webhook receives objects of several kinds on one endpoint; the
//! [`ValidatorRegistry`] maps each kind to its [`ObjectValidator`] and turns
//! an unknown kind or an oversized batch into a [`RegistryError`].

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::FieldError;
use crate::validators::ObjectValidator;

type ValidatorMap = Arc<RwLock<HashMap<String, Arc<ObjectValidator>>>>;

/// Default upper bound on the number of items in one batch validation.
pub const DEFAULT_MAX_ITEMS: usize = 1000;

/// Validators keyed by kind.
///
/// Lookups take a read lock only long enough to clone the validator's
/// `Arc`, so validation itself runs without holding the lock. A clone of
/// the registry sees every kind registered through any other clone.
///
/// # Example
///
/// ```rust
/// use fielderr::{ObjectValidator, ValidatorRegistry};
/// use serde_json::json;
///
/// let registry = ValidatorRegistry::new();
/// registry
///     .register(
///         "Service",
///         ObjectValidator::new().field("name", "QualifiedName,Required").unwrap(),
///     )
///     .unwrap();
///
/// let err = registry.validate("Service", &json!({})).unwrap();
/// assert_eq!(err.unwrap().to_string(), "missing field(s): name");
/// ```
#[derive(Clone)]
pub struct ValidatorRegistry {
    validators: ValidatorMap,
    max_items: usize,
}

impl ValidatorRegistry {
    /// Creates an empty registry that accepts batches of up to
    /// [`DEFAULT_MAX_ITEMS`] objects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of items accepted by
    /// [`validate_items`](Self::validate_items).
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Returns the maximum number of items accepted in one batch.
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Registers a validator under the given kind.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the kind is already registered.
    pub fn register(
        &self,
        kind: impl Into<String>,
        validator: ObjectValidator,
    ) -> Result<(), RegistryError> {
        let kind = kind.into();
        let mut validators = self.validators.write();

        if validators.contains_key(&kind) {
            return Err(RegistryError::DuplicateName(kind));
        }

        tracing::debug!(kind = %kind, "registered validator");
        validators.insert(kind, Arc::new(validator));
        Ok(())
    }

    /// Retrieves the validator for a kind.
    pub fn get(&self, kind: &str) -> Option<Arc<ObjectValidator>> {
        self.validators.read().get(kind).cloned()
    }

    /// Returns the registered kinds, sorted.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.validators.read().keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Validates an object with the validator registered for `kind`.
    ///
    /// The outer `Result` reports registry problems; the inner `Option` is
    /// the validation outcome.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ValidatorNotFound` if the kind is unknown.
    pub fn validate(&self, kind: &str, value: &Value) -> Result<Option<FieldError>, RegistryError> {
        Ok(self.lookup(kind)?.validate(value))
    }

    /// Validates a batch of objects of one kind.
    ///
    /// Paths are prefixed with the item index, see
    /// [`ObjectValidator::validate_items`].
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ValidatorNotFound` if the kind is unknown,
    /// whatever the batch size, and `RegistryError::TooManyItems` if a known
    /// kind's batch exceeds the item limit.
    pub fn validate_items(
        &self,
        kind: &str,
        items: &[Value],
    ) -> Result<Option<FieldError>, RegistryError> {
        let validator = self.lookup(kind)?;
        if items.len() > self.max_items {
            tracing::debug!(kind = %kind, count = items.len(), max = self.max_items, "batch too large");
            return Err(RegistryError::TooManyItems {
                count: items.len(),
                max: self.max_items,
            });
        }
        Ok(validator.validate_items(items))
    }

    fn lookup(&self, kind: &str) -> Result<Arc<ObjectValidator>, RegistryError> {
        self.get(kind).ok_or_else(|| {
            tracing::debug!(kind = %kind, "no validator registered");
            RegistryError::ValidatorNotFound(kind.to_string())
        })
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self {
            validators: ValidatorMap::default(),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a validator for a kind that already has one.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate a kind that has no validator.
    #[error("validator '{0}' not found")]
    ValidatorNotFound(String),

    /// A batch held more items than the registry accepts.
    #[error("{count} items exceed the limit of {max}")]
    TooManyItems { count: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_storage() {
        let registry = ValidatorRegistry::new();
        let clone = registry.clone();

        registry.register("A", ObjectValidator::new()).unwrap();
        assert!(clone.get("A").is_some());
    }

    #[test]
    fn test_kinds_sorted() {
        let registry = ValidatorRegistry::default();
        registry.register("b", ObjectValidator::new()).unwrap();
        registry.register("a", ObjectValidator::new()).unwrap();
        assert_eq!(registry.kinds(), vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_kind_reported_before_item_limit() {
        let registry = ValidatorRegistry::new().with_max_items(0);
        let err = registry
            .validate_items("Nope", &[Value::Null])
            .unwrap_err();
        assert!(matches!(err, RegistryError::ValidatorNotFound(kind) if kind == "Nope"));
    }

    #[test]
    fn test_max_items_default() {
        assert_eq!(ValidatorRegistry::new().max_items(), DEFAULT_MAX_ITEMS);
        assert_eq!(ValidatorRegistry::new().with_max_items(2).max_items(), 2);
    }
}
