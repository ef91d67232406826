#![allow(clippy::unwrap_used, clippy::expect_used)]

use datashape_core::errors::{DataShapeError, ErrorKind, ExError};

#[test]
fn test_unknown_spec_type_is_shape_error() {
    let err = DataShapeError::UnknownSpecType {
        type_tag: "slider".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ErrorKind::Shape);
    assert_eq!(ex_err.code(), "ERR_SHAPE");
    assert!(ex_err.message().contains("slider"));
}

#[test]
fn test_registry_collision_carries_type_name() {
    let err = DataShapeError::RegistryCollision {
        type_name: "Part".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ErrorKind::Shape);
    assert_eq!(ex_err.type_name(), Some("Part"));
}

#[test]
fn test_invalid_default_is_type_error() {
    let err = DataShapeError::InvalidDefault {
        field: "tags".to_string(),
        reason: "list default must be a sequence, got 3".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ErrorKind::Type);
    assert_eq!(ex_err.code(), "ERR_TYPE");
    assert_eq!(ex_err.member(), Some("tags"));
    assert!(ex_err.message().contains("must be a sequence"));
}

#[test]
fn test_unknown_enum_value_is_value_error() {
    let err = DataShapeError::UnknownEnumValue {
        enum_name: "SelEnum".to_string(),
        value: "\"c\"".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ErrorKind::Value);
    assert_eq!(ex_err.type_name(), Some("SelEnum"));
}

#[test]
fn test_not_a_map_distinct_from_strict_violation() {
    let shape: ExError = DataShapeError::NotAMap {
        type_name: "Wrap".to_string(),
        found: "int".to_string(),
    }
    .into();
    let strict: ExError = DataShapeError::UnexpectedKey {
        key: "z".to_string(),
        type_name: "Wrap".to_string(),
    }
    .into();

    assert_eq!(shape.kind(), ErrorKind::DataShape);
    assert_eq!(strict.kind(), ErrorKind::StrictViolation);
    assert_ne!(shape.code(), strict.code());
}

#[test]
fn test_path_errors_carry_path() {
    let err = DataShapeError::IndexOutOfRange {
        path: "arr.9".to_string(),
        index: 9,
        len: 3,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ErrorKind::Path);
    assert_eq!(ex_err.code(), "ERR_PATH");
    assert_eq!(ex_err.path(), Some("arr.9"));
    assert!(ex_err.message().contains("len 3"));
}

#[test]
fn test_input_lists_not_implemented() {
    let err = DataShapeError::InputListsNotSupported {
        field: "points".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ErrorKind::NotImplemented);
    assert_eq!(ex_err.code(), "ERR_NOT_IMPLEMENTED");
    assert_eq!(ex_err.member(), Some("points"));
}

#[test]
fn test_serde_error_converts_to_serialization() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

    let err: DataShapeError = serde_err.into();

    assert_eq!(err.kind(), ErrorKind::Serialization);
}

#[test]
fn test_ex_error_builder_pattern() {
    let ex_err = ExError::new(ErrorKind::Path)
        .with_op("path_get")
        .with_type_name("Settings")
        .with_member("alt")
        .with_path("location.alt")
        .with_message("member not found");

    assert_eq!(ex_err.kind(), ErrorKind::Path);
    assert_eq!(ex_err.op(), Some("path_get"));
    assert_eq!(ex_err.type_name(), Some("Settings"));
    assert_eq!(ex_err.member(), Some("alt"));
    assert_eq!(ex_err.path(), Some("location.alt"));
    assert!(ex_err.message().contains("not found"));
}

#[test]
fn test_ex_error_display() {
    let ex_err = ExError::new(ErrorKind::StrictViolation)
        .with_op("decode_instance")
        .with_member("z")
        .with_message("z must be in Wrap fields");

    let display_str = format!("{}", ex_err);

    assert!(display_str.contains("ERR_STRICT_VIOLATION"));
    assert!(display_str.contains("decode_instance"));
    assert!(display_str.contains("member: z"));
}

#[test]
fn test_all_error_kinds_have_unique_codes() {
    use std::collections::HashSet;

    let kinds = vec![
        ErrorKind::Shape,
        ErrorKind::Type,
        ErrorKind::Value,
        ErrorKind::DataShape,
        ErrorKind::StrictViolation,
        ErrorKind::Path,
        ErrorKind::NotImplemented,
        ErrorKind::Serialization,
    ];

    let codes: HashSet<_> = kinds.iter().map(|k| k.code()).collect();

    assert_eq!(codes.len(), kinds.len());
    for code in codes {
        assert!(code.starts_with("ERR_"));
    }
}
