//! Integration tests for path fragments and flattening.

use fielderr::path::{as_index, as_key, flatten, is_index};
use fielderr::CURRENT_FIELD;

#[test]
fn test_fragments() {
    assert_eq!(as_index(7), "[7]");
    assert_eq!(as_key("app.kubernetes.io/name"), "[app.kubernetes.io/name]");
    assert!(is_index(&as_index(0)));
    assert!(is_index(&as_key("k")));
}

#[test]
fn test_flatten_examples() {
    // err([0]).via_field(bar).via_field(foo)
    assert_eq!(flatten(["foo", "bar", "[0]"]), "foo.bar[0]");
    // err(bar).via_index(0).via_field(foo)
    assert_eq!(flatten(["foo", "[0]", "bar"]), "foo[0].bar");
    // err(bar).via_field(foo).via_index(0)
    assert_eq!(flatten(["[0]", "foo", "bar"]), "[0].foo.bar");
    // err(bar).via_index(0).via_index(1).via_field(foo)
    assert_eq!(flatten(["foo", "[1]", "[0]", "bar"]), "foo[1][0].bar");
}

#[test]
fn test_flatten_accepts_owned_strings() {
    let parts = vec!["spec".to_string(), as_index(3), "name".to_string()];
    assert_eq!(flatten(&parts), "spec[3].name");
}

#[test]
fn test_flatten_current_field_anywhere() {
    assert_eq!(flatten([CURRENT_FIELD, "spec", CURRENT_FIELD]), "spec");
    assert_eq!(flatten(["spec", CURRENT_FIELD, "[0]"]), "spec[0]");
}

#[test]
fn test_key_with_dots_is_split() {
    // Keys are not escaped, so dots inside them still separate segments.
    let key = as_key("a.b");
    assert_eq!(flatten(["labels", key.as_str()]), "labels.[a.b]");
}
