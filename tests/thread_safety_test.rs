//! Tests for sharing field errors and validators across threads.

use fielderr::{FieldError, FieldErrorExt, ObjectValidator, ValidatorRegistry};
use serde_json::json;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_reads_of_shared_error() {
    let err = Arc::new(
        FieldError::missing_field(["foo", "bar"])
            .via_field("spec")
            .also(FieldError::invalid_value("x", "baz"))
            .unwrap(),
    );
    let want = err.to_string();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let err = Arc::clone(&err);
            thread::spawn(move || {
                // Deriving new errors leaves the shared one untouched.
                let derived = err.via_index(i).via_field("items");
                assert!(derived.to_error_string().contains(&format!("items[{i}].spec.bar")));
                err.to_string()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), want);
    }
}

#[test]
fn test_errors_built_on_threads_combine() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || FieldError::missing_field(["name"]).via_field_index("items", i))
        })
        .collect();

    let errs: Vec<Option<FieldError>> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    let err = FieldError::default().also_all(errs).unwrap();

    let entries = err.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].paths.len(), 8);
    assert_eq!(entries[0].paths[0], "items[0].name");
}

#[test]
fn test_concurrent_registry_validation() {
    let registry = Arc::new(ValidatorRegistry::new());
    registry
        .register(
            "Service",
            ObjectValidator::new()
                .field("name", "QualifiedName,Required")
                .unwrap(),
        )
        .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let value = if i % 2 == 0 {
                    json!({ "name": format!("svc-{i}") })
                } else {
                    json!({})
                };
                registry.validate("Service", &value).unwrap().is_some()
            })
        })
        .collect();

    let failures = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|failed| *failed)
        .count();
    assert_eq!(failures, 5);
}

#[test]
fn test_concurrent_registration() {
    let registry = ValidatorRegistry::new();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                registry
                    .register(format!("Kind{i}"), ObjectValidator::new())
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.kinds().len(), 10);
}
