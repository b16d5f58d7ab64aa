//! # fielderr
//!
//! Field-level validation errors for Kubernetes-style controllers and
//! admission webhooks.
//!
//! ## Overview
//!
//! Validation of a resource is a recursive walk over its fields. A failure
//! is detected deep inside the walk (a missing field in a container of a
//! pod template, say) but has to be reported with its full path and
//! alongside every other failure of the same object. [`FieldError`] is the
//! value that travels back up that walk:
//!
//! - leaves are created with constructors such as
//!   [`FieldError::missing_field`] or [`FieldError::invalid_value`];
//! - each level adds its context with `via_field`, `via_index` or `via_key`;
//! - sibling checks are merged with `also`, deduplicating identical messages;
//! - the result renders as a stable, sorted, multi-line string.
//!
//! Success is `None`. [`FieldErrorExt`] gives `Option<FieldError>` the same
//! operations, so validation functions compose without special-casing it.
//!
//! ## Core Types
//!
//! - [`FieldError`]: accumulated validation failures with their field paths
//! - [`FieldErrorExt`]: the same operations on `Option<FieldError>`
//! - [`ObjectValidator`]: tag-driven field rules for JSON objects
//! - [`ValidatorRegistry`]: validators looked up by resource kind
//!
//! ## Example
//!
//! ```rust
//! use fielderr::{FieldError, FieldErrorExt};
//!
//! fn validate_port(port: i64) -> Option<FieldError> {
//!     (!(1..=65535).contains(&port))
//!         .then(|| FieldError::invalid_value(port.to_string(), "port"))
//! }
//!
//! let ports = [80, 0, 70000];
//! let mut errs: Option<FieldError> = None;
//! for (i, port) in ports.iter().enumerate() {
//!     errs = errs.also(validate_port(*port).via_field_index("ports", i));
//! }
//! let errs = errs.via_field("spec");
//!
//! assert_eq!(
//!     errs.to_error_string(),
//!     "invalid value \"0\": spec.ports[1].port\ninvalid value \"70000\": spec.ports[2].port"
//! );
//! ```

pub mod error;
pub mod path;
pub mod registry;
pub mod validation;
pub mod validators;

pub use error::{FieldError, FieldErrorExt};
pub use path::CURRENT_FIELD;
pub use registry::{RegistryError, ValidatorRegistry};
pub use validation::{into_validation, ValidationResult};
pub use validators::{ObjectValidator, Rule, RuleParseError};
