//! Field path fragments and flattening.
//!
//! Field errors carry their location as plain strings such as
//! `spec.containers[0].image`. This module holds the helpers used to build
//! those strings as an error travels up a recursive validation walk.

/// Path to supply when a problem concerns the current field itself rather
/// than one of its sub-fields.
///
/// When flattened under a prefix it contributes no segment of its own, so
/// `missing_field([CURRENT_FIELD]).via_field("spec")` reports `spec`.
pub const CURRENT_FIELD: &str = "";

/// Returns the path fragment for an array index, e.g. `[3]`.
pub fn as_index(index: usize) -> String {
    format!("[{index}]")
}

/// Returns the path fragment for a map key, e.g. `[app]`.
pub fn as_key(key: &str) -> String {
    format!("[{key}]")
}

/// Returns true if `part` is an index or key fragment (`[...]`).
pub fn is_index(part: &str) -> bool {
    part.starts_with('[') && part.ends_with(']')
}

/// Joins path fragments into a single dotted path.
///
/// Every fragment is split on `.` first, so a fragment may itself contain
/// several segments. Index and key fragments are glued onto the preceding
/// segment instead of being separated by a dot, and [`CURRENT_FIELD`]
/// segments are dropped.
///
/// # Example
///
/// ```rust
/// use fielderr::path::flatten;
///
/// assert_eq!(flatten(["foo", "[0]", "bar"]), "foo[0].bar");
/// assert_eq!(flatten(["foo", "[1]", "[0]", "bar"]), "foo[1][0].bar");
/// assert_eq!(flatten(["[0]", "foo", "bar"]), "[0].foo.bar");
/// assert_eq!(flatten(["spec", ""]), "spec");
/// ```
pub fn flatten<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segments: Vec<String> = Vec::new();
    for part in parts {
        for p in part.as_ref().split('.') {
            if p == CURRENT_FIELD {
                continue;
            }
            match segments.last_mut() {
                Some(last) if is_index(p) => last.push_str(p),
                _ => segments.push(p.to_string()),
            }
        }
    }
    segments.join(".")
}

/// Appends the paths of `b` that are not already in `a`.
///
/// Order is preserved: everything from `a` first, then the unseen entries
/// of `b` in the order they appear.
pub(crate) fn merge_paths(a: &[String], b: &[String]) -> Vec<String> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    for path in a.iter().chain(b) {
        if !merged.contains(path) {
            merged.push(path.clone());
        }
    }
    merged
}
