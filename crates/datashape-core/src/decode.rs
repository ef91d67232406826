//! Generic decoder: untyped data -> typed instance
//!
//! Parser selection is driven entirely by the member's declared
//! [`TypeShape`], resolved once at synthesis time:
//!
//! | shape       | behaviour                                                     |
//! |-------------|---------------------------------------------------------------|
//! | `Primitive` | pass through; type-checked only in strict mode                |
//! | `Union`     | first compatible primitive arm                                |
//! | `Enum`      | member whose value equals the input                           |
//! | `Sequence`  | element-wise, recursively                                     |
//! | `Map`       | value-wise, recursively                                       |
//! | `Record`    | recursive decode; empty input falls back to zero-arg construct |
//!
//! An explicit `null` for a record member that defaults to `null` stays
//! `null`, so an unset optional record survives an unpack/decode cycle.

use crate::errors::{DataShapeError, Result};
use crate::types::{EnumType, Member, MemberDefault, PrimitiveKind, RecordType, TypeShape};
use crate::value::{untyped_kind, Instance};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Decoder settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject undeclared keys and type-check non-null primitives
    pub strict: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Decode `data` into an instance of `target`
///
/// `null` data yields the zero-argument construction of `target`, or
/// `Instance::Null` when `target` has required members.
///
/// # Errors
///
/// - `NotAMap` if `data` is neither `null` nor a map
/// - `UnexpectedKey` in strict mode, naming the first undeclared key
/// - `TypeMismatch`, `UnsupportedUnionArm` or `UnknownEnumValue` from member parsers
/// - `MissingMembers` if the assembled members leave a required one unset
pub fn decode(data: &Value, target: &RecordType, options: DecodeOptions) -> Result<Instance> {
    match data {
        Value::Null => default_or_null(target),
        Value::Object(map) => decode_record(map, target, options),
        other => Err(DataShapeError::NotAMap {
            type_name: target.name().to_string(),
            found: untyped_kind(other).to_string(),
        }),
    }
}

/// Decode `data` against any shape
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_shape(data: &Value, shape: &TypeShape, options: DecodeOptions) -> Result<Instance> {
    match shape {
        TypeShape::Record(record) => decode(data, record, options),
        _ => Ok(decode_value("<root>", shape, data, options)?.unwrap_or_default()),
    }
}

fn default_or_null(target: &RecordType) -> Result<Instance> {
    match target.construct_default() {
        Err(DataShapeError::MissingMembers { .. }) => Ok(Instance::Null),
        other => other,
    }
}

fn decode_record(
    data: &Map<String, Value>,
    target: &RecordType,
    options: DecodeOptions,
) -> Result<Instance> {
    if options.strict {
        if let Some(key) = data.keys().find(|k| !target.has_member(k)) {
            tracing::debug!(key = %key, type_name = target.name(), "strict decode rejected key");
            return Err(DataShapeError::UnexpectedKey {
                key: key.clone(),
                type_name: target.name().to_string(),
            });
        }
    }

    let mut values = BTreeMap::new();
    for member in target.members() {
        let Some(raw) = data.get(&member.name) else {
            continue;
        };
        if keeps_explicit_null(member, raw) {
            values.insert(member.name.clone(), Instance::Null);
            continue;
        }
        match decode_value(&member.name, &member.shape, raw, options)? {
            Some(value) => {
                values.insert(member.name.clone(), value);
            }
            None => tracing::debug!(
                type_name = target.name(),
                member = %member.name,
                "omitting member without a constructible value"
            ),
        }
    }
    target.construct(values)
}

fn keeps_explicit_null(member: &Member, raw: &Value) -> bool {
    raw.is_null()
        && matches!(member.shape, TypeShape::Record(_))
        && matches!(member.default, MemberDefault::Null)
}

/// Parse one value; `None` means the member should be omitted
fn decode_value(
    member: &str,
    shape: &TypeShape,
    raw: &Value,
    options: DecodeOptions,
) -> Result<Option<Instance>> {
    match shape {
        TypeShape::Primitive(kind) => parse_primitive(member, *kind, raw, options).map(Some),
        TypeShape::Union(arms) => parse_union(member, arms, raw, options).map(Some),
        TypeShape::Enum(enumeration) => parse_enum(enumeration, raw, options),
        TypeShape::Sequence(item) => parse_sequence(member, item, raw, options).map(Some),
        TypeShape::Map(value_shape) => parse_map(member, value_shape, raw, options).map(Some),
        TypeShape::Record(record) => parse_nested(record, raw, options),
    }
}

fn parse_primitive(
    member: &str,
    kind: PrimitiveKind,
    raw: &Value,
    options: DecodeOptions,
) -> Result<Instance> {
    if options.strict && !raw.is_null() && !kind.matches(raw) {
        return Err(DataShapeError::TypeMismatch {
            member: member.to_string(),
            expected: kind.name().to_string(),
            found: untyped_kind(raw).to_string(),
        });
    }
    Ok(Instance::from_untyped(raw))
}

fn parse_union(
    member: &str,
    arms: &[TypeShape],
    raw: &Value,
    options: DecodeOptions,
) -> Result<Instance> {
    let mut kinds = Vec::with_capacity(arms.len());
    for arm in arms {
        match arm {
            TypeShape::Primitive(kind) => kinds.push(*kind),
            other => {
                return Err(DataShapeError::UnsupportedUnionArm {
                    member: member.to_string(),
                    arm: other.describe(),
                })
            }
        }
    }
    match kinds.iter().find(|k| k.matches(raw)) {
        Some(kind) => parse_primitive(member, *kind, raw, options),
        None if options.strict => Err(DataShapeError::TypeMismatch {
            member: member.to_string(),
            expected: TypeShape::Union(arms.to_vec()).describe(),
            found: untyped_kind(raw).to_string(),
        }),
        None => Ok(Instance::from_untyped(raw)),
    }
}

fn parse_enum(enumeration: &EnumType, raw: &Value, options: DecodeOptions) -> Result<Option<Instance>> {
    if raw.is_null() && !options.strict {
        return Ok(Some(Instance::Null));
    }
    enumeration.resolve(raw).map(|m| Some(Instance::Enum(m)))
}

fn parse_sequence(
    member: &str,
    item: &TypeShape,
    raw: &Value,
    options: DecodeOptions,
) -> Result<Instance> {
    let Value::Array(items) = raw else {
        if raw.is_null() || (!options.strict && item.is_primitive()) {
            return Ok(Instance::from_untyped(raw));
        }
        return Err(DataShapeError::TypeMismatch {
            member: member.to_string(),
            expected: TypeShape::sequence_of(item.clone()).describe(),
            found: untyped_kind(raw).to_string(),
        });
    };
    items
        .iter()
        // elements are positional: an omitted element stays in place as null
        .map(|element| Ok(decode_value(member, item, element, options)?.unwrap_or_default()))
        .collect::<Result<Vec<_>>>()
        .map(Instance::Seq)
}

fn parse_map(
    member: &str,
    value_shape: &TypeShape,
    raw: &Value,
    options: DecodeOptions,
) -> Result<Instance> {
    match raw {
        Value::Null => Ok(Instance::Null),
        Value::Object(map) => {
            let mut out = BTreeMap::new();
            for (key, value) in map {
                let decoded = decode_value(member, value_shape, value, options)?;
                out.insert(key.clone(), decoded.unwrap_or_default());
            }
            Ok(Instance::Map(out))
        }
        other => Err(DataShapeError::NotAMap {
            type_name: value_shape.describe(),
            found: untyped_kind(other).to_string(),
        }),
    }
}

fn parse_nested(record: &RecordType, raw: &Value, options: DecodeOptions) -> Result<Option<Instance>> {
    let is_empty = match raw {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if !is_empty {
        return decode(raw, record, options).map(Some);
    }
    match record.construct_default() {
        Ok(instance) => Ok(Some(instance)),
        Err(DataShapeError::MissingMembers { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
