//! Rule-driven validation of JSON objects.
//!
//! This module provides [`ObjectValidator`], which checks the string fields
//! of a JSON object against [`Rule`]s and reports failures as a
//! [`FieldError`] keyed by the JSON field names.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::Value;

use crate::error::{FieldError, FieldErrorExt};
use crate::path::CURRENT_FIELD;
use crate::validators::names::is_qualified_name;
use crate::validators::rules::{parse_rules, Rule, RuleParseError};

/// Validates the fields of a JSON object against per-field rules.
///
/// Fields are checked in the order they were added, and every failure is
/// collected: one bad field never hides another.
///
/// # Example
///
/// ```rust
/// use fielderr::validators::ObjectValidator;
/// use serde_json::json;
///
/// let validator = ObjectValidator::new()
///     .field("optionalName", "QualifiedName")
///     .unwrap()
///     .field("requiredName", "QualifiedName,Required")
///     .unwrap();
///
/// assert!(validator.validate(&json!({ "requiredName": "valid" })).is_none());
///
/// let err = validator.validate(&json!({})).unwrap();
/// assert_eq!(err.to_string(), "missing field(s): requiredName");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectValidator {
    fields: IndexMap<String, Vec<Rule>>,
}

impl ObjectValidator {
    /// Creates a validator with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field with rules given as a tag, e.g. `QualifiedName,Required`.
    ///
    /// A tag of `-` leaves the field unchecked.
    ///
    /// # Errors
    ///
    /// Returns `RuleParseError::UnknownRule` if the tag names an unknown rule.
    pub fn field(self, name: impl Into<String>, tag: &str) -> Result<Self, RuleParseError> {
        Ok(self.rules(name, parse_rules(tag)?))
    }

    /// Adds a field with the given rules, replacing any earlier rules for it.
    pub fn rules(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        let name = name.into();
        let rules: Vec<Rule> = rules.into_iter().collect();
        if rules.is_empty() {
            self.fields.shift_remove(&name);
        } else {
            self.fields.insert(name, rules);
        }
        self
    }

    /// Returns the checked fields and their rules in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    /// Validates a single object. Returns `None` if it passes.
    pub fn validate(&self, value: &Value) -> Option<FieldError> {
        let Some(object) = value.as_object() else {
            tracing::trace!(value = %value, "rejecting non-object value");
            return Some(FieldError::invalid_value(value.to_string(), CURRENT_FIELD));
        };

        let mut errs: Option<FieldError> = None;
        for (name, rules) in &self.fields {
            errs = errs.also(validate_field(name, object.get(name), rules));
        }
        errs
    }

    /// Validates a list of objects in parallel.
    ///
    /// Each item's errors are prefixed with its index, so the caller only
    /// has to add the name of the list:
    ///
    /// ```rust
    /// use fielderr::validators::ObjectValidator;
    /// use fielderr::FieldErrorExt;
    /// use serde_json::json;
    ///
    /// let validator = ObjectValidator::new().field("name", "Required").unwrap();
    /// let items = [json!({ "name": "a" }), json!({})];
    ///
    /// let err = validator.validate_items(&items).via_field("items");
    /// assert_eq!(err.to_error_string(), "missing field(s): items[1].name");
    /// ```
    pub fn validate_items(&self, items: &[Value]) -> Option<FieldError> {
        let errors: Vec<Option<FieldError>> = items
            .par_iter()
            .enumerate()
            .map(|(index, item)| self.validate(item).via_index(index))
            .collect();
        FieldError::default().also_all(errors)
    }
}

fn validate_field(name: &str, value: Option<&Value>, rules: &[Rule]) -> Option<FieldError> {
    let text = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        Some(Value::String(text)) => Some(text.as_str()),
        Some(other) if rules.contains(&Rule::QualifiedName) => {
            tracing::trace!(field = name, value = %other, "rejecting non-string value");
            return Some(FieldError::invalid_value(other.to_string(), name));
        }
        // Present, and only its presence is checked.
        Some(_) => Some(""),
    };

    let mut errs: Option<FieldError> = None;
    for rule in rules {
        let err = match (rule, text) {
            (Rule::Required, None) => Some(FieldError::missing_field([name])),
            (Rule::QualifiedName, Some(text)) if !text.is_empty() => {
                let msgs = is_qualified_name(text);
                (!msgs.is_empty()).then(|| FieldError::invalid_key_name(text, name, msgs))
            }
            _ => None,
        };
        errs = errs.also(err);
    }

    if errs.is_some() {
        tracing::trace!(field = name, "field failed validation");
    }
    errs
}
