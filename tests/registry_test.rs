//! Integration tests for the validator registry.

use fielderr::{FieldErrorExt, ObjectValidator, RegistryError, ValidatorRegistry};
use serde_json::json;

fn service_validator() -> ObjectValidator {
    ObjectValidator::new()
        .field("name", "QualifiedName,Required")
        .unwrap()
}

#[test]
fn test_register_and_validate() {
    let registry = ValidatorRegistry::new();
    registry.register("Service", service_validator()).unwrap();

    let ok = registry.validate("Service", &json!({ "name": "web" })).unwrap();
    assert!(ok.is_none());

    let err = registry.validate("Service", &json!({})).unwrap();
    assert_eq!(err.to_error_string(), "missing field(s): name");
}

#[test]
fn test_duplicate_registration_fails() {
    let registry = ValidatorRegistry::new();
    registry.register("Service", service_validator()).unwrap();

    let result = registry.register("Service", ObjectValidator::new());
    assert!(matches!(result, Err(RegistryError::DuplicateName(ref name)) if name == "Service"));
    assert_eq!(
        result.unwrap_err().to_string(),
        "validator 'Service' already registered"
    );
}

#[test]
fn test_unknown_kind() {
    let registry = ValidatorRegistry::new();
    let result = registry.validate("Pod", &json!({}));

    match result {
        Err(RegistryError::ValidatorNotFound(kind)) => assert_eq!(kind, "Pod"),
        other => panic!("Expected ValidatorNotFound, got {other:?}"),
    }
}

#[test]
fn test_get_and_kinds() {
    let registry = ValidatorRegistry::new();
    registry.register("Service", service_validator()).unwrap();
    registry.register("ConfigMap", ObjectValidator::new()).unwrap();

    assert!(registry.get("Service").is_some());
    assert!(registry.get("Secret").is_none());
    assert_eq!(registry.kinds(), vec!["ConfigMap", "Service"]);
}

#[test]
fn test_validate_items_prefixes_indices() {
    let registry = ValidatorRegistry::new();
    registry.register("Service", service_validator()).unwrap();

    let items = [json!({ "name": "a" }), json!({ "name": "" }), json!({})];
    let err = registry
        .validate_items("Service", &items)
        .unwrap()
        .via_field("items");

    assert_eq!(
        err.to_error_string(),
        "missing field(s): items[1].name, items[2].name"
    );
}

#[test]
fn test_validate_items_limit() {
    let registry = ValidatorRegistry::new().with_max_items(2);
    registry.register("Service", service_validator()).unwrap();

    let items = vec![json!({ "name": "a" }); 3];
    let result = registry.validate_items("Service", &items);

    match result {
        Err(RegistryError::TooManyItems { count, max }) => {
            assert_eq!(count, 3);
            assert_eq!(max, 2);
        }
        other => panic!("Expected TooManyItems, got {other:?}"),
    }

    assert!(registry.validate_items("Service", &items[..2]).unwrap().is_none());
}

#[test]
fn test_validate_items_unknown_kind_over_limit() {
    let registry = ValidatorRegistry::new().with_max_items(1);
    registry.register("Service", service_validator()).unwrap();

    let items = vec![json!({ "name": "a" }); 5];
    match registry.validate_items("Pod", &items) {
        Err(RegistryError::ValidatorNotFound(kind)) => assert_eq!(kind, "Pod"),
        other => panic!("Expected ValidatorNotFound, got {other:?}"),
    }
}
