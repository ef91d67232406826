#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Default builder tests
//!
//! ## Scenarios Covered
//!
//! 1. Fully defaulted schemas build without input and leave nothing null
//! 2. Caller input seeds fields and nested groups
//! 3. default_size replicates list items
//! 4. Lists of groups reject caller input
//! 5. Providers whose value does not fit the member fail with a type error

mod common;

use common::{fully_defaulted_schema, generated_type_schema, inst};
use datashape_core::errors::{DataShapeError, ErrorKind};
use datashape_core::shape::{
    constant, provider, ChoiceOption, ChoiceSpec, FieldSpec, GroupSpec, ListSpec, ValueType,
};
use datashape_core::synth::SynthesizedType;
use datashape_core::value::Instance;
use serde_json::json;

#[test]
fn test_fully_defaulted_schema_builds_without_input() {
    let ty = SynthesizedType::new(fully_defaulted_schema()).unwrap();

    let out = ty.build_default(None).unwrap();

    assert_eq!(
        out.to_untyped(),
        json!({
            "name": "untitled",
            "mode": "safe",
            "location": {"lat": 51.5, "lon": -0.1},
            "tags": ["tag", "tag"],
            "points": [{"x": 0}, {"x": 0}, {"x": 0}]
        })
    );
    let record = out.as_record().unwrap();
    for member in ty.record().required_members() {
        assert!(!record.get(member).unwrap().is_null(), "{} is null", member);
    }
}

#[test]
fn test_choice_default_resolves_enum_member() {
    let ty = SynthesizedType::new(fully_defaulted_schema()).unwrap();

    let out = ty.build_default(None).unwrap();

    let mode = out.as_record().unwrap().get("mode").unwrap();
    assert_eq!(mode.to_string(), "ModeEnum.Safe");
}

#[test]
fn test_input_seeds_fields_and_nested_groups() {
    let ty = SynthesizedType::new(generated_type_schema()).unwrap();
    let input = json!({"foo": "hello", "main": {"inner": "in"}, "bar": 12});

    let out = ty.build_default(Some(&input)).unwrap();

    assert_eq!(
        out.to_untyped(),
        json!({
            "foo": "hello",
            "sel": null,
            "bar": 12,
            "main": {"inner": "in"},
            "other": {"inner_b": null}
        })
    );
}

#[test]
fn test_input_values_are_not_type_checked() {
    let ty = SynthesizedType::new(generated_type_schema()).unwrap();

    let out = ty.build_default(Some(&json!({"bar": "not a number"}))).unwrap();

    assert_eq!(
        out.as_record().unwrap().get("bar"),
        Some(&Instance::Str("not a number".into()))
    );
}

#[test]
fn test_field_list_uses_supplied_sequence_verbatim() {
    let ty = SynthesizedType::new(fully_defaulted_schema()).unwrap();

    let out = ty.build_default(Some(&json!({"tags": ["a", 1]}))).unwrap();

    assert_eq!(out.as_record().unwrap().get("tags"), Some(&inst(json!(["a", 1]))));
}

#[test]
fn test_group_list_rejects_input() {
    let ty = SynthesizedType::new(fully_defaulted_schema()).unwrap();

    let err = ty.build_default(Some(&json!({"points": [{"x": 1}]}))).unwrap_err();

    assert_eq!(
        err,
        DataShapeError::InputListsNotSupported {
            field: "points".into()
        }
    );
    assert_eq!(err.kind(), ErrorKind::NotImplemented);
}

#[test]
fn test_list_without_size_uses_provider_or_empty() {
    let group = GroupSpec::new("root", "Lists")
        .with_field(ListSpec::of_field(FieldSpec::new("plain", "Plain", ValueType::Integer)))
        .with_field(
            ListSpec::of_field(FieldSpec::new("seeded", "Seeded", ValueType::Integer))
                .with_default(constant(json!([1, 2, 3]))),
        );
    let ty = SynthesizedType::new(group).unwrap();

    let out = ty.build_default(None).unwrap();

    assert_eq!(out.to_untyped(), json!({"plain": [], "seeded": [1, 2, 3]}));
}

#[test]
fn test_providers_run_on_every_build() {
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    let counter = Arc::new(AtomicI64::new(0));
    let seen = counter.clone();
    let group = GroupSpec::new("root", "Counter").with_field(
        FieldSpec::new("n", "N", ValueType::Integer)
            .with_default(provider(move || json!(seen.fetch_add(1, Ordering::SeqCst)))),
    );
    let ty = SynthesizedType::new(group).unwrap();

    let first = ty.build_default(None).unwrap();
    let second = ty.build_default(None).unwrap();

    assert_eq!(first.to_untyped(), json!({"n": 0}));
    assert_eq!(second.to_untyped(), json!({"n": 1}));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_list_provider_must_yield_sequence() {
    let group = GroupSpec::new("root", "Broken").with_field(
        ListSpec::of_field(FieldSpec::new("xs", "Xs", ValueType::Integer))
            .with_default(constant(json!(5))),
    );
    let ty = SynthesizedType::new(group).unwrap();

    let err = ty.build_default(None).unwrap_err();

    assert!(matches!(err, DataShapeError::InvalidDefault { ref field, .. } if field == "xs"));
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_choice_provider_outside_options_is_value_error() {
    let group = GroupSpec::new("root", "Pick").with_field(
        ChoiceSpec::new("c", "C")
            .with_option(ChoiceOption::new("a", "A"))
            .with_default(constant(json!("zzz"))),
    );
    let ty = SynthesizedType::new(group).unwrap();

    let err = ty.build_default(None).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Value);
}

#[test]
fn test_non_map_input_is_data_shape_error() {
    let ty = SynthesizedType::new(generated_type_schema()).unwrap();

    let err = ty.build_default(Some(&json!([1]))).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DataShape);
}
