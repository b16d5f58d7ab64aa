//! Field validators that report through [`FieldError`](crate::FieldError).
//!
//! Validation rules are attached to JSON field names with short tags such as
//! `QualifiedName,Required`. A field tagged `Required` must be present and
//! non-empty; a field tagged `QualifiedName` must, when set, be a valid
//! Kubernetes qualified name.
//!
//! # Example
//!
//! ```rust
//! use fielderr::validators::ObjectValidator;
//! use serde_json::json;
//!
//! let validator = ObjectValidator::new()
//!     .field("requiredName", "QualifiedName,Required")
//!     .unwrap();
//!
//! let err = validator.validate(&json!({ "requiredName": "v@lid" })).unwrap();
//! assert!(err.to_string().starts_with("invalid key name \"v@lid\": requiredName\n"));
//! ```

mod names;
mod object;
mod rules;

pub use names::{is_dns1123_subdomain, is_qualified_name};
pub use object::ObjectValidator;
pub use rules::{parse_rules, Rule, RuleParseError};
