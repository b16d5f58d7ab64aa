//! Kubernetes name checks.
//!
//! Adapted from Kubernetes, see apimachinery/pkg/util/validation/validation.go.
//! Each check returns the list of problems found; an empty list means the
//! value is valid. The wording matches the API server so messages can be
//! compared with what `kubectl` reports.

use std::fmt::{self, Display};
use std::sync::LazyLock;

use regex::Regex;

const QUALIFIED_NAME_FMT: &str = "([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]";
const QUALIFIED_NAME_ERROR_MSG: &str = "must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character";
const QUALIFIED_NAME_EXAMPLES: &[&str] = &["MyName", "my.name", "123-abc"];
const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
const QUALIFIED_NAME_REGEX_ERROR: RegexError = RegexError {
    msg: QUALIFIED_NAME_ERROR_MSG,
    regex: QUALIFIED_NAME_FMT,
    examples: QUALIFIED_NAME_EXAMPLES,
};

const DNS1123_SUBDOMAIN_FMT: &str =
    "[a-z0-9]([-a-z0-9]*[a-z0-9])?(\\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*";
const DNS1123_SUBDOMAIN_ERROR_MSG: &str = "a DNS-1123 subdomain must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character";
const DNS1123_SUBDOMAIN_EXAMPLES: &[&str] = &["example.com"];
const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
const DNS1123_SUBDOMAIN_REGEX_ERROR: RegexError = RegexError {
    msg: DNS1123_SUBDOMAIN_ERROR_MSG,
    regex: DNS1123_SUBDOMAIN_FMT,
    examples: DNS1123_SUBDOMAIN_EXAMPLES,
};

static QUALIFIED_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{QUALIFIED_NAME_FMT}$")).expect("failed to compile qualified name regex")
});

static DNS1123_SUBDOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{DNS1123_SUBDOMAIN_FMT}$"))
        .expect("failed to compile DNS-1123 subdomain regex")
});

/// Checks a qualified name such as `app` or `example.com/app`, as used for
/// label and annotation keys.
///
/// # Example
///
/// ```rust
/// use fielderr::validators::is_qualified_name;
///
/// assert!(is_qualified_name("example.com/my-app").is_empty());
/// assert_eq!(is_qualified_name("v@lid").len(), 1);
/// ```
pub fn is_qualified_name(value: &str) -> Vec<String> {
    let mut errs = Vec::new();
    let parts: Vec<&str> = value.split('/').collect();
    let name = match parts.as_slice() {
        [name] => *name,
        [prefix, name] => {
            if prefix.is_empty() {
                errs.push(format!("prefix part {}", empty_error()));
            } else {
                errs.extend(
                    is_dns1123_subdomain(prefix)
                        .into_iter()
                        .map(|msg| format!("prefix part {msg}")),
                );
            }
            *name
        }
        _ => {
            errs.push(format!(
                "a qualified name {QUALIFIED_NAME_REGEX_ERROR} with an optional DNS subdomain prefix and '/' (e.g. 'example.com/MyName')"
            ));
            return errs;
        }
    };

    if name.is_empty() {
        errs.push(format!("name part {}", empty_error()));
    } else if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        errs.push(format!(
            "name part {}",
            max_len_error(QUALIFIED_NAME_MAX_LENGTH)
        ));
    }
    if !QUALIFIED_NAME_REGEX.is_match(name) {
        errs.push(format!("name part {QUALIFIED_NAME_REGEX_ERROR}"));
    }
    errs
}

/// Checks a lower case RFC 1123 subdomain such as `example.com`.
pub fn is_dns1123_subdomain(value: &str) -> Vec<String> {
    let mut errs = Vec::new();
    if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        errs.push(max_len_error(DNS1123_SUBDOMAIN_MAX_LENGTH));
    }
    if !DNS1123_SUBDOMAIN_REGEX.is_match(value) {
        errs.push(DNS1123_SUBDOMAIN_REGEX_ERROR.to_string());
    }
    errs
}

fn empty_error() -> &'static str {
    "must be non-empty"
}

fn max_len_error(length: usize) -> String {
    format!("must be no more than {length} characters")
}

/// A failed regex match, rendered with examples of valid values and the
/// regex itself, e.g. `... (e.g. 'MyName',  or 'my.name', regex used for
/// validation is '...')`.
struct RegexError {
    msg: &'static str,
    regex: &'static str,
    examples: &'static [&'static str],
}

impl Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.msg)?;
        for (i, example) in self.examples.iter().enumerate() {
            f.write_str(if i == 0 { "e.g. " } else { " or " })?;
            write!(f, "'{example}', ")?;
        }
        write!(f, "regex used for validation is '{}')", self.regex)
    }
}
