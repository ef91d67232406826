//! Type descriptors rendered as JSON metadata
//!
//! A record renders as its name plus one entry per member:
//!
//! ```json
//! {
//!   "name": "Point",
//!   "fields": {
//!     "lat": {"label": "Float", "type": "float", "required": true},
//!     "tag": {"label": "String", "type": "string", "required": false, "default": "home"}
//!   }
//! }
//! ```
//!
//! Nested records carry their own `name`/`fields` under `"record"`, so the
//! rendering is self-contained for UI or documentation generators.

use crate::errors::Result;
use crate::types::{MemberDefault, PrimitiveKind, RecordType, TypeShape};
use serde_json::{json, Map, Value};

fn primitive_label(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Integer => "Integer",
        PrimitiveKind::Float => "Float",
        PrimitiveKind::String => "String",
        PrimitiveKind::Boolean => "Boolean",
    }
}

/// Metadata for a single shape
///
/// # Errors
///
/// Whatever a nested record's member default factories report.
pub fn shape_meta(shape: &TypeShape) -> Result<Value> {
    let meta = match shape {
        TypeShape::Primitive(kind) => json!({
            "label": primitive_label(*kind),
            "type": kind.name(),
        }),
        TypeShape::Union(_) => json!({
            "label": "Union",
            "type": shape.describe(),
        }),
        TypeShape::Enum(enumeration) => json!({
            "label": "Enumeration",
            "type": enumeration.name(),
            "options": enumeration
                .variants()
                .iter()
                .map(|v| json!({"label": v.label, "value": v.value}))
                .collect::<Vec<_>>(),
        }),
        TypeShape::Sequence(item) => json!({
            "label": "List",
            "type": shape.describe(),
            "items": shape_meta(item)?,
        }),
        TypeShape::Map(value) => json!({
            "label": "Dictionary",
            "type": shape.describe(),
            "values": shape_meta(value)?,
        }),
        TypeShape::Record(record) => json!({
            "label": "Record",
            "type": record.name(),
            "record": record_meta(record)?,
        }),
    };
    Ok(meta)
}

/// Metadata for a record type and, recursively, its members
///
/// Member defaults are produced once and unpacked. Required members carry
/// no `default` key.
///
/// # Errors
///
/// Whatever a member default factory reports.
pub fn record_meta(record: &RecordType) -> Result<Value> {
    let mut fields = Map::new();
    for member in record.members() {
        let mut entry = match shape_meta(&member.shape)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        entry.insert(
            "required".to_string(),
            Value::Bool(matches!(member.default, MemberDefault::Required)),
        );
        if let Some(default) = member.default.produce()? {
            entry.insert("default".to_string(), default.to_untyped());
        }
        fields.insert(member.name.clone(), Value::Object(entry));
    }

    let mut meta = Map::new();
    meta.insert("name".to_string(), Value::String(record.name().to_string()));
    if !record.doc().is_empty() {
        meta.insert("doc".to_string(), Value::String(record.doc().to_string()));
    }
    meta.insert("fields".to_string(), Value::Object(fields));
    Ok(Value::Object(meta))
}
