#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Structural diff tests
//!
//! ## Scenarios Covered
//!
//! 1. Scalar changes under a caller-supplied prefix
//! 2. Null on both sides is not a change
//! 3. Floats compare with a relative tolerance
//! 4. Nested maps, added and removed keys, sequences
//! 5. Records diff member-wise and against plain maps
//! 6. Exact per-member comparison of two records

mod common;

use common::{fully_defaulted_schema, inst};
use datashape_core::diff::{diff, diff_changes, ensure_matched, mismatched_members, Change};
use datashape_core::errors::{DataShapeError, ErrorKind};
use datashape_core::path::set;
use datashape_core::synth::SynthesizedType;
use datashape_core::value::Instance;
use serde_json::json;

#[test]
fn test_simple_difference() {
    let a = inst(json!({"foo": "bar", "hello": "world"}));
    let b = inst(json!({"foo": "bar", "hello": "earth"}));

    assert_eq!(diff("fieldex", &a, &b), vec!["fieldex.hello: world -> earth"]);
}

#[test]
fn test_nulls_are_equal() {
    let a = inst(json!({"foo": "bar", "hello": null}));

    assert!(diff("fieldex", &a, &a.clone()).is_empty());
}

#[test]
fn test_similar_floats_are_equal() {
    let a = inst(json!({"foo": "bar", "hello": 10.0 / 3.0, "goodbye": 3.33333, "world": 3.3}));
    let b = inst(json!({
        "foo": "bar",
        "hello": 3.33333333,
        "goodbye": 3.333,
        "world": 3.333333333333
    }));

    assert_eq!(diff("fieldex", &a, &b), vec!["fieldex.world: 3.3 -> 3.333333333333"]);
}

#[test]
fn test_nested_map_difference() {
    let a = inst(json!({"foo": "bar", "hello": {"world": 1}}));
    let b = inst(json!({"foo": "bar", "hello": {"world": 2}}));

    assert_eq!(diff("fieldex", &a, &b), vec!["fieldex.hello.world: 1 -> 2"]);
}

#[test]
fn test_added_and_removed_keys() {
    let a = inst(json!({"foo": "bar", "hello": {"world": 1}}));
    let b = inst(json!({"foo": "bar", "hello": {"earth": 2}}));

    assert_eq!(
        diff("fieldex", &a, &b),
        vec!["fieldex.hello.earth: null -> 2", "fieldex.hello.world: 1 -> null"]
    );
}

#[test]
fn test_sequence_difference() {
    let a = inst(json!({"foo": "bar", "hello": ["world"]}));
    let b = inst(json!({"foo": "bar", "hello": ["earth", "moon"]}));

    assert_eq!(
        diff("fieldex", &a, &b),
        vec!["fieldex.hello.0: world -> earth", "fieldex.hello.1: null -> moon"]
    );
}

#[test]
fn test_empty_prefix_yields_bare_paths() {
    let a = inst(json!({"x": 1}));
    let b = inst(json!({"x": 2}));

    assert_eq!(diff("", &a, &b), vec!["x: 1 -> 2"]);
}

#[test]
fn test_record_diff_reports_changed_members() {
    let ty = SynthesizedType::new(fully_defaulted_schema()).unwrap();
    let a = ty.build_default(None).unwrap();
    let b = set(a.clone(), "location.lat", Instance::Float(40.0), false).unwrap();

    let changes = diff_changes("settings", &a, &b);

    assert_eq!(
        changes,
        vec![Change::new(
            "settings.location.lat",
            Instance::Float(51.5),
            Instance::Float(40.0)
        )]
    );
    assert_eq!(changes[0].to_string(), "settings.location.lat: 51.5 -> 40.0");
}

#[test]
fn test_record_against_unpacked_map_differs_only_in_enums() {
    let ty = SynthesizedType::new(fully_defaulted_schema()).unwrap();
    let typed = ty.build_default(None).unwrap();
    let untyped = inst(typed.to_untyped());

    // enum members compare equal to nothing but other enum members
    let changes = diff("", &typed, &untyped);

    assert_eq!(changes, vec!["mode: ModeEnum.Safe -> safe"]);
}

#[test]
fn test_mismatched_members_reports_whole_members() {
    let ty = SynthesizedType::new(fully_defaulted_schema()).unwrap();
    let a = ty.build_default(None).unwrap();
    let b = set(a.clone(), "location.lat", Instance::Float(51.6), false).unwrap();
    let b = set(b, "name", Instance::Str("renamed".into()), false).unwrap();

    let changes = mismatched_members(a.as_record().unwrap(), b.as_record().unwrap());

    let members: Vec<_> = changes.iter().map(|c| c.path.as_str()).collect();
    // required members are declared first
    assert_eq!(members, vec!["location", "name"]);
    assert_eq!(changes[1].before, Instance::Str("untitled".into()));
}

#[test]
fn test_ensure_matched_names_differing_members() {
    let ty = SynthesizedType::new(fully_defaulted_schema()).unwrap();
    let a = ty.build_default(None).unwrap();
    let b = set(a.clone(), "tags.0", Instance::Str("other".into()), false).unwrap();

    assert!(ensure_matched(a.as_record().unwrap(), a.as_record().unwrap()).is_ok());

    let err = ensure_matched(a.as_record().unwrap(), b.as_record().unwrap()).unwrap_err();
    assert_eq!(
        err,
        DataShapeError::RecordsDiffer {
            type_name: "Settings".into(),
            members: vec!["tags".into()],
        }
    );
    assert_eq!(err.kind(), ErrorKind::Value);
}
