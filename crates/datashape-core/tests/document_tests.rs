#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Schema document tests
//!
//! ## Scenarios Covered
//!
//! 1. A canonical document parses and renders back unchanged
//! 2. Schemas built in code survive a trip through their document form
//! 3. Document-defined schemas synthesize and build defaults
//! 4. Malformed documents are shape errors

mod common;

use common::generated_type_schema;
use datashape_core::errors::{DataShapeError, ErrorKind};
use datashape_core::shape::{schema_from_document, schema_to_document, Spec};
use datashape_core::synth::SynthesizedType;
use serde_json::{json, Value};

fn canonical_document() -> Value {
    json!({
        "type": "group",
        "variable": "root",
        "label": "Sensor Config",
        "required": false,
        "fields": [
            {
                "type": "field",
                "variable": "name",
                "label": "Name",
                "valueType": "string",
                "description": "Display name",
                "required": true,
                "default": "sample"
            },
            {
                "type": "number",
                "variable": "rate",
                "label": "Rate",
                "valueType": "integer",
                "required": false,
                "default": 10,
                "unit": "Hz",
                "min": 1.0,
                "max": 100.0,
                "step": 1.0
            },
            {
                "type": "choice",
                "variable": "mode",
                "label": "Sample Mode",
                "required": true,
                "default": "avg",
                "options": [
                    {"uid": "avg", "label": "Average"},
                    {"uid": "max", "label": "Peak", "dependencies": ["rate"]}
                ]
            },
            {
                "type": "list",
                "defaultSize": 2,
                "item": {
                    "type": "field",
                    "variable": "offsets",
                    "label": "Offsets",
                    "valueType": "float",
                    "required": true,
                    "default": 0.5
                }
            },
            {
                "type": "group",
                "variable": "site",
                "label": "Site",
                "required": true,
                "fields": [
                    {
                        "type": "field",
                        "variable": "code",
                        "label": "Code",
                        "valueType": "string",
                        "required": false
                    }
                ]
            }
        ]
    })
}

#[test]
fn test_canonical_document_renders_back_unchanged() {
    let doc = canonical_document();

    let schema = schema_from_document(&doc).unwrap();

    assert_eq!(schema_to_document(&schema).unwrap(), doc);
}

#[test]
fn test_document_fields_are_parsed() {
    let schema = schema_from_document(&canonical_document()).unwrap();

    let kinds: Vec<&str> = schema.fields.iter().map(Spec::kind_name).collect();
    assert_eq!(kinds, vec!["field", "number", "choice", "list", "group"]);

    let Spec::Number(rate) = &schema.fields[1] else {
        panic!("expected a number spec");
    };
    assert_eq!((rate.min, rate.max, rate.step), (1.0, 100.0, 1.0));
    assert_eq!(rate.field.unit, Some(json!("Hz")));
}

#[test]
fn test_code_built_schema_survives_document_form() {
    let original = generated_type_schema();

    let doc = schema_to_document(&original).unwrap();
    let reparsed = schema_from_document(&doc).unwrap();

    let a = SynthesizedType::new(original).unwrap();
    let b = SynthesizedType::new(reparsed).unwrap();
    assert!(a.record().same_structure(b.record()));
    assert_eq!(
        a.build_default(Some(&json!({"foo": "x"}))).unwrap(),
        b.build_default(Some(&json!({"foo": "x"}))).unwrap()
    );
}

#[test]
fn test_document_schema_builds_default() {
    let schema = schema_from_document(&canonical_document()).unwrap();
    let ty = SynthesizedType::new(schema).unwrap();

    let out = ty.build_default(None).unwrap();

    assert_eq!(
        out.to_untyped(),
        json!({
            "name": "sample",
            "mode": "avg",
            "site": {"code": null},
            "rate": 10,
            "offsets": [0.5, 0.5]
        })
    );
    let names: Vec<&str> = ty.registry().names().collect();
    assert_eq!(names, vec!["SampleMode", "Site"]);
}

#[test]
fn test_unknown_node_type_is_shape_error() {
    let doc = json!({
        "type": "group", "variable": "root", "label": "Root",
        "fields": [{"type": "slider", "variable": "s", "label": "S"}]
    });

    let err = schema_from_document(&doc).unwrap_err();

    assert_eq!(
        err,
        DataShapeError::UnknownSpecType {
            type_tag: "slider".into()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Shape);
}

#[test]
fn test_missing_value_type_is_invalid_document() {
    let doc = json!({"type": "field", "variable": "x", "label": "X"});

    let err = datashape_core::shape::spec_from_document(&doc).unwrap_err();

    assert!(matches!(err, DataShapeError::InvalidSchemaDocument { .. }));
    assert_eq!(err.kind(), ErrorKind::Shape);
}
