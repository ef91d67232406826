#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Path addressing tests
//!
//! ## Scenarios Covered
//!
//! 1. `get` through maps, records, sequences and the `_` wildcard
//! 2. `set` replaces nested values and creates missing intermediates on request
//! 3. `delete` removes sequence elements and map keys, resets record members
//! 4. `find_key` / `find_all_keys` report dotted paths in document order
//! 5. Error kinds for unresolvable segments
//! 6. Writes far past the end of a sequence fail instead of allocating

mod common;

use common::{fully_defaulted_schema, inst};
use datashape_core::errors::{DataShapeError, ErrorKind};
use datashape_core::path::{delete, find_all_keys, find_key, get, set, Path, MAX_PADDING};
use datashape_core::synth::SynthesizedType;
use datashape_core::value::Instance;
use serde_json::json;

fn sample() -> Instance {
    inst(json!({
        "foo": "bar",
        "arr": [1, 2, 3],
        "a": {"val": 5, "lat": 1.0},
        "b": [{"foo": "hello"}, {"foo": "there"}],
        "deepmatrix": [[[1, 2], [3, 4]], [[5, 6], [7, 8]]]
    }))
}

#[test]
fn test_get_simple_paths() {
    let root = sample();

    assert_eq!(get(&root, "foo").unwrap(), Instance::Str("bar".into()));
    assert_eq!(get(&root, "arr.1").unwrap(), Instance::Int(2));
    assert_eq!(get(&root, "a.val").unwrap(), Instance::Int(5));
    assert_eq!(get(&root, "").unwrap(), root);
}

#[test]
fn test_get_with_wildcards() {
    let root = sample();

    assert_eq!(
        get(&root, "deepmatrix._.1._").unwrap(),
        inst(json!([[3, 4], [7, 8]]))
    );
    assert_eq!(
        get(&root, "b._.foo").unwrap(),
        inst(json!(["hello", "there"]))
    );
}

#[test]
fn test_get_accepts_pre_split_segments() {
    let root = sample();
    let path = Path::from_segments(["b", "1", "foo"]);

    assert_eq!(get(&root, path).unwrap(), Instance::Str("there".into()));
}

#[test]
fn test_get_error_kinds() {
    let root = sample();

    let err = get(&root, "arr.x").unwrap_err();
    assert!(matches!(err, DataShapeError::InvalidIndex { .. }));
    assert_eq!(err.kind(), ErrorKind::Path);

    let err = get(&root, "arr.9").unwrap_err();
    assert_eq!(
        err,
        DataShapeError::IndexOutOfRange {
            path: "arr.9".into(),
            index: 9,
            len: 3
        }
    );

    let err = get(&root, "foo.bar").unwrap_err();
    assert!(matches!(err, DataShapeError::PathNotFound { ref found, .. } if found == "str"));

    let err = get(&root, "foo._.x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Path);
}

#[test]
fn test_trailing_wildcard_returns_value_of_any_kind() {
    let root = sample();

    assert_eq!(get(&root, "a._").unwrap(), inst(json!({"val": 5, "lat": 1.0})));
    assert_eq!(get(&root, "foo._").unwrap(), Instance::Str("bar".into()));
    assert_eq!(get(&root, "arr._").unwrap(), inst(json!([1, 2, 3])));
}

#[test]
fn test_set_replaces_nested_values() {
    let root = sample();

    let root = set(root, "a.lat", Instance::Int(5), false).unwrap();
    let root = set(root, "b.0.foo", Instance::Str("world".into()), false).unwrap();

    assert_eq!(get(&root, "a.lat").unwrap(), Instance::Int(5));
    assert_eq!(
        get(&root, "b").unwrap(),
        inst(json!([{"foo": "world"}, {"foo": "there"}]))
    );
}

#[test]
fn test_set_creates_missing_sequence() {
    let out = set(inst(json!({})), "foo.3", Instance::Str("bar".into()), true).unwrap();

    assert_eq!(out, inst(json!({"foo": [null, null, null, "bar"]})));
}

#[test]
fn test_set_refuses_oversized_padding() {
    let err = set(inst(json!({"a": [1]})), "a.18446744073709551615", Instance::Int(1), false)
        .unwrap_err();
    assert!(matches!(err, DataShapeError::IndexOutOfRange { index: usize::MAX, len: 1, .. }));

    let err = set(inst(json!({})), "foo.18446744073709551615.x", Instance::Int(1), true)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Path);

    let err = set(inst(json!({"a": []})), "a.1000000000000", Instance::Int(1), true).unwrap_err();
    assert!(matches!(err, DataShapeError::IndexOutOfRange { .. }));
}

#[test]
fn test_set_pads_up_to_the_limit() {
    let index = MAX_PADDING - 1;
    let out = set(inst(json!({"a": []})), format!("a.{}", index), Instance::Int(1), false).unwrap();

    let items = get(&out, "a").unwrap();
    let items = items.as_seq().unwrap();
    assert_eq!(items.len(), MAX_PADDING);
    assert_eq!(items[index], Instance::Int(1));
}

#[test]
fn test_set_creates_missing_maps() {
    let out = set(inst(json!({"a": null})), "a.b.c", Instance::Int(1), true).unwrap();

    assert_eq!(out, inst(json!({"a": {"b": {"c": 1}}})));
}

#[test]
fn test_set_without_create_missing_fails_on_gap() {
    let err = set(inst(json!({})), "a.b", Instance::Int(1), false).unwrap_err();

    assert!(matches!(err, DataShapeError::PathNotFound { ref segment, .. } if segment == "a"));
}

#[test]
fn test_set_on_scalar_parent_fails() {
    let err = set(sample(), "foo.x", Instance::Int(1), false).unwrap_err();

    assert!(matches!(err, DataShapeError::NotAContainer { .. }));
}

#[test]
fn test_set_on_record_member() {
    let ty = SynthesizedType::new(fully_defaulted_schema()).unwrap();
    let root = ty.build_default(None).unwrap();

    let root = set(root, "location.lat", Instance::Float(10.0), false).unwrap();
    assert_eq!(get(&root, "location.lat").unwrap(), Instance::Float(10.0));

    let err = set(root, "location.alt", Instance::Float(1.0), false).unwrap_err();
    assert_eq!(
        err,
        DataShapeError::UnknownMember {
            type_name: "Location".into(),
            member: "alt".into()
        }
    );
}

#[test]
fn test_delete_sequence_element_and_map_key() {
    let root = delete(sample(), "arr.0").unwrap();
    assert_eq!(get(&root, "arr").unwrap(), inst(json!([2, 3])));

    let root = delete(root, "a.val").unwrap();
    assert_eq!(get(&root, "a").unwrap(), inst(json!({"lat": 1.0})));
}

#[test]
fn test_delete_resets_record_member() {
    let ty = SynthesizedType::new(fully_defaulted_schema()).unwrap();
    let root = ty.build_default(None).unwrap();

    let root = delete(root, "name").unwrap();

    assert_eq!(get(&root, "name").unwrap(), Instance::Null);
    assert!(root.as_record().unwrap().contains("name"));
}

#[test]
fn test_delete_absent_intermediate_is_noop() {
    let root = sample();

    assert_eq!(delete(root.clone(), "missing.key").unwrap(), root);
}

#[test]
fn test_find_keys_in_document_order() {
    let root = inst(json!({
        "z": {"id": 1},
        "a": [{"id": 2}, {"other": {"id": 3}}],
        "id": 0
    }));

    assert_eq!(find_key(&root, "id"), Some("a.0.id".to_string()));
    assert_eq!(find_all_keys(&root, "id"), vec!["a.0.id", "a.1.other.id", "id", "z.id"]);
    assert_eq!(find_key(&root, "nope"), None);
}

#[test]
fn test_find_keys_ignore_sequence_indices() {
    let root = inst(json!({"list": ["0", "1"]}));

    assert!(find_all_keys(&root, "0").is_empty());
}
