//! Field error accumulation.
//!
//! This module provides [`FieldError`], an error value that records which
//! fields of an object failed validation and why. Errors are built at the
//! leaves of a validation walk, prefixed with field names, indices and keys
//! on the way back up, and combined with the errors of sibling checks.

use std::fmt::{self, Display, Write};

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::{json, Value};
use stillwater::prelude::*;

use crate::path::{as_index, as_key, flatten, merge_paths};

/// Identity of a leaf error. Leaves sharing a key are merged into one entry
/// whose paths are the union of theirs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ErrorKey {
    message: String,
    details: String,
}

/// Flat view of an error: one leaf per distinct message and details.
type Leaves = IndexMap<ErrorKey, FieldError>;

/// A validation failure tied to one or more field paths.
///
/// A `FieldError` is either a *leaf*, holding a message and the paths it
/// applies to, or a *container* holding independent leaves collected with
/// [`also`](FieldError::also). All operations are non-mutating and return a
/// new value. The absence of an error is represented by `None`; the
/// [`FieldErrorExt`](crate::FieldErrorExt) trait lets `Option<FieldError>`
/// chain the same operations, so a validation function can return
/// `Option<FieldError>` and callers never have to special-case success.
///
/// # Example
///
/// ```rust
/// use fielderr::{FieldError, FieldErrorExt};
///
/// let err = FieldError::missing_field(["image"])
///     .via_index(0)
///     .via_field("containers")
///     .also(FieldError::invalid_value("-1", "replicas"))
///     .via_field("spec");
///
/// assert_eq!(
///     err.to_error_string(),
///     "invalid value \"-1\": spec.replicas\nmissing field(s): spec.containers[0].image"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldError {
    /// Human-readable description of the failure. Empty for containers.
    pub message: String,
    /// Field paths the message applies to, relative to the current object.
    pub paths: Vec<String>,
    /// Optional longer explanation, rendered verbatim below the message.
    pub details: String,
    errors: IndexMap<ErrorKey, FieldError>,
}

impl FieldError {
    /// Creates a leaf error for the given paths.
    pub fn new<I, S>(message: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            message: message.into(),
            paths: paths.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the details payload and returns self for chaining.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// A set of required fields is missing.
    pub fn missing_field<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("missing field(s)", paths)
    }

    /// A set of fields is present that must not be set.
    pub fn disallowed_fields<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("must not set the field(s)", paths)
    }

    /// A field received an invalid value.
    pub fn invalid_value(value: impl AsRef<str>, path: impl Into<String>) -> Self {
        Self::new(format!("invalid value {}", Quoted(value.as_ref())), [path])
    }

    /// None of the fields of a mutually exclusive group is set.
    pub fn missing_one_of<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("expected exactly one, got neither", paths)
    }

    /// More than one field of a mutually exclusive group is set.
    pub fn multiple_one_of<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("expected exactly one, got both", paths)
    }

    /// A key name is invalid. The `details` are joined with `", "`.
    pub fn invalid_key_name<I, S>(
        value: impl AsRef<str>,
        path: impl Into<String>,
        details: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let details: Vec<String> = details
            .into_iter()
            .map(|detail| detail.as_ref().to_string())
            .collect();
        Self::new(format!("invalid key name {}", Quoted(value.as_ref())), [path])
            .with_details(details.join(", "))
    }

    /// Prefixes every path with a field name.
    ///
    /// The name may hold several dotted segments; index and key fragments
    /// (`[...]`) attach to the segment before them.
    ///
    /// ```rust
    /// use fielderr::FieldError;
    ///
    /// let err = FieldError::missing_field(["foo", "bar"]).via_field("baz");
    /// assert_eq!(err.unwrap().to_string(), "missing field(s): baz.bar, baz.foo");
    /// ```
    pub fn via_field(&self, prefix: impl AsRef<str>) -> Option<Self> {
        self.via_fields([prefix])
    }

    /// Prefixes every path with several segments at once.
    ///
    /// The first segment ends up outermost: `via_fields(["a", "b"])` turns
    /// `c` into `a.b.c`.
    pub fn via_fields<I, S>(&self, prefix: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefix: Vec<String> = prefix
            .into_iter()
            .map(|segment| segment.as_ref().to_string())
            .collect();
        let leaves = self.normalized().into_values().map(|mut leaf| {
            leaf.paths = leaf
                .paths
                .iter()
                .map(|old| flatten(prefix.iter().chain(std::iter::once(old))))
                .collect();
            leaf
        });
        Self::from_leaves(leaves)
    }

    /// Prefixes every path with an array index. Binds to the next
    /// [`via_field`](Self::via_field).
    pub fn via_index(&self, index: usize) -> Option<Self> {
        self.via_field(as_index(index))
    }

    /// Prefixes every path with a map key. Binds to the next
    /// [`via_field`](Self::via_field).
    pub fn via_key(&self, key: &str) -> Option<Self> {
        self.via_field(as_key(key))
    }

    /// Shorthand for `via_index(index).via_field(field)`.
    pub fn via_field_index(&self, field: &str, index: usize) -> Option<Self> {
        self.via_fields([field.to_string(), as_index(index)])
    }

    /// Shorthand for `via_key(key).via_field(field)`.
    pub fn via_field_key(&self, field: &str, key: &str) -> Option<Self> {
        self.via_fields([field.to_string(), as_key(key)])
    }

    /// Combines this error with another one.
    ///
    /// Leaves with the same message and details are merged into one entry.
    /// Returns `None` if neither side holds a leaf.
    pub fn also(&self, other: impl Into<Option<FieldError>>) -> Option<Self> {
        self.also_all([other.into()])
    }

    /// Combines this error with any number of others.
    pub fn also_all<I>(&self, others: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<Option<FieldError>>,
    {
        let mut leaves = self.normalized();
        for other in others {
            let other: Option<FieldError> = other.into();
            if let Some(other) = other {
                for leaf in other.normalized().into_values() {
                    insert_leaf(&mut leaves, leaf);
                }
            }
        }
        Self::container(leaves)
    }

    /// Returns true if this value holds no leaf error.
    pub fn is_empty(&self) -> bool {
        self.message.is_empty() && self.errors.values().all(Self::is_empty)
    }

    /// Returns the flattened leaves in rendering order.
    ///
    /// Entries are sorted by message (then details) and each entry's paths
    /// are sorted.
    pub fn entries(&self) -> Vec<FieldError> {
        let mut entries = merge(self.normalized().into_values().collect());
        for entry in &mut entries {
            entry.paths.sort();
        }
        entries
    }

    /// Renders the entries as a JSON array, e.g. for admission responses.
    ///
    /// ```rust
    /// use fielderr::FieldError;
    /// use serde_json::json;
    ///
    /// let err = FieldError::missing_field(["name"]);
    /// assert_eq!(
    ///     err.to_json(),
    ///     json!([{ "message": "missing field(s)", "paths": ["name"] }])
    /// );
    /// ```
    pub fn to_json(&self) -> Value {
        self.entries()
            .into_iter()
            .map(|entry| {
                let FieldError {
                    message,
                    paths,
                    details,
                    ..
                } = entry;
                let mut object = json!({ "message": message, "paths": paths });
                if !details.is_empty() {
                    object["details"] = Value::String(details);
                }
                object
            })
            .collect()
    }

    fn key(&self) -> ErrorKey {
        ErrorKey {
            message: self.message.clone(),
            details: self.details.clone(),
        }
    }

    fn normalized(&self) -> Leaves {
        let mut leaves = Leaves::with_capacity(self.errors.len() + 1);
        if !self.message.is_empty() {
            insert_leaf(
                &mut leaves,
                Self {
                    message: self.message.clone(),
                    paths: self.paths.clone(),
                    details: self.details.clone(),
                    errors: IndexMap::new(),
                },
            );
        }
        for nested in self.errors.values() {
            for leaf in nested.normalized().into_values() {
                insert_leaf(&mut leaves, leaf);
            }
        }
        leaves
    }

    fn from_leaves(leaves: impl IntoIterator<Item = FieldError>) -> Option<Self> {
        let mut collected = Leaves::new();
        for leaf in leaves {
            insert_leaf(&mut collected, leaf);
        }
        Self::container(collected)
    }

    fn container(errors: Leaves) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self {
                errors,
                ..Self::default()
            })
        }
    }
}

fn insert_leaf(leaves: &mut Leaves, leaf: FieldError) {
    match leaves.entry(leaf.key()) {
        Entry::Occupied(mut entry) => {
            let existing = entry.get_mut();
            existing.paths = merge_paths(&existing.paths, &leaf.paths);
        }
        Entry::Vacant(entry) => {
            let paths = merge_paths(&leaf.paths, &[]);
            entry.insert(FieldError { paths, ..leaf });
        }
    }
}

/// Collapses entries that differ only in their paths.
///
/// Sorts by message and details, then unions the paths of neighbours that
/// share both.
fn merge(mut errors: Vec<FieldError>) -> Vec<FieldError> {
    if errors.len() <= 1 {
        return errors;
    }
    errors.sort_by(|a, b| {
        a.message
            .cmp(&b.message)
            .then_with(|| a.details.cmp(&b.details))
    });

    let mut merged: Vec<FieldError> = Vec::with_capacity(errors.len());
    for error in errors {
        match merged.last_mut() {
            Some(last) if last.message == error.message && last.details == error.details => {
                last.paths = merge_paths(&last.paths, &error.paths);
            }
            _ => merged.push(error),
        }
    }
    merged
}

/// A value in double quotes, escaped the way the Kubernetes API server
/// quotes values in its messages.
///
/// Quotes and backslashes are escaped, printable characters are kept, and
/// everything else becomes `\a`-style, `\xNN`, `\uNNNN` or `\UNNNNNNNN`.
struct Quoted<'a>(&'a str);

impl Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                c if is_printable(c) => f.write_char(c)?,
                '\u{7}' => f.write_str("\\a")?,
                '\u{8}' => f.write_str("\\b")?,
                '\u{c}' => f.write_str("\\f")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                '\u{b}' => f.write_str("\\v")?,
                c if c.is_ascii() => write!(f, "\\x{:02x}", u32::from(c))?,
                c if u32::from(c) < 0x10000 => write!(f, "\\u{:04x}", u32::from(c))?,
                c => write!(f, "\\U{:08x}", u32::from(c))?,
            }
        }
        f.write_char('"')
    }
}

/// Whether a character is shown as is inside [`Quoted`].
///
/// Controls, whitespace other than the ASCII space, format characters,
/// private use characters and noncharacters are not.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    let code = u32::from(c);
    let format = matches!(
        code,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0xE0001
            | 0xE0020..=0xE007F
    );
    let private_use = matches!(code, 0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD);
    let noncharacter = matches!(code, 0xFDD0..=0xFDEF) || code & 0xFFFE == 0xFFFE;
    !(format || private_use || noncharacter)
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", entry.message, entry.paths.join(", "))?;
            if !entry.details.is_empty() {
                write!(f, "\n{}", entry.details)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}

impl Semigroup for FieldError {
    fn combine(self, other: Self) -> Self {
        self.also(other).unwrap_or_default()
    }
}

// Field errors are handed across threads by batch validation.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldError>();
    assert_sync::<FieldError>();
};
