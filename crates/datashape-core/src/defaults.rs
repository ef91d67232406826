//! Default construction from a group spec, optionally seeded by caller input

use crate::errors::{DataShapeError, Result};
use crate::shape::{ChoiceSpec, FieldSpec, GroupSpec, ListItem, ListSpec, Spec};
use crate::synth::{type_name_from_label, Registry};
use crate::types::{RecordType, TypeShape};
use crate::value::{untyped_kind, Instance};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Build a fully populated instance of `record`
///
/// `input` is a partial untyped override keyed by child variable. Supplied
/// field values are taken verbatim, without checking them against the
/// declared value type. A `null` input is the same as no input.
///
/// # Errors
///
/// - `NotAMap` if `input` is present but not a map
/// - `InputListsNotSupported` if `input` supplies a value for a list of groups
/// - `UnregisteredSubtype` if a nested group is missing from `registry`
/// - `InvalidDefault` if a provider's value does not fit its member
/// - `UnknownEnumValue` if a choice provider names no option
pub fn build_default(
    group: &GroupSpec,
    record: &RecordType,
    registry: &Registry,
    input: Option<&Value>,
) -> Result<Instance> {
    let input = match input {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            return Err(DataShapeError::NotAMap {
                type_name: record.name().to_string(),
                found: untyped_kind(other).to_string(),
            })
        }
    };

    let mut values = BTreeMap::new();
    for child in &group.fields {
        let variable = child.variable();
        let value = match child {
            Spec::Group(sub) => {
                let sub_record = lookup_record(registry, &sub.label)?;
                build_default(sub, sub_record, registry, supplied(input, variable))?
            }
            Spec::List(list) => list_default(list, record, registry, supplied(input, variable))?,
            Spec::Choice(choice) => choice_default(choice, record)?,
            Spec::Field(field) => field_default(field, supplied(input, variable)),
            Spec::Number(number) => field_default(&number.field, supplied(input, variable)),
        };
        values.insert(variable.to_string(), value);
    }

    tracing::trace!(type_name = record.name(), "built default instance");
    record.construct(values)
}

fn supplied<'a>(input: Option<&'a Map<String, Value>>, variable: &str) -> Option<&'a Value> {
    input
        .and_then(|map| map.get(variable))
        .filter(|v| !v.is_null())
}

fn lookup_record<'r>(registry: &'r Registry, label: &str) -> Result<&'r RecordType> {
    let type_name = type_name_from_label(label);
    registry
        .record(&type_name)
        .map(|r| r.as_ref())
        .ok_or(DataShapeError::UnregisteredSubtype { type_name })
}

fn field_default(field: &FieldSpec, supplied: Option<&Value>) -> Instance {
    match (supplied, &field.default) {
        (Some(value), _) => Instance::from_untyped(value),
        (None, Some(provider)) => Instance::from_untyped(&provider.invoke()),
        (None, None) => Instance::Null,
    }
}

fn choice_default(choice: &ChoiceSpec, record: &RecordType) -> Result<Instance> {
    let Some(provider) = &choice.field.default else {
        return Ok(Instance::Null);
    };
    match record.member(&choice.field.variable).map(|m| &m.shape) {
        Some(TypeShape::Enum(enumeration)) => {
            enumeration.resolve(&provider.invoke()).map(Instance::Enum)
        }
        _ => Err(DataShapeError::InvalidDefault {
            field: choice.field.variable.clone(),
            reason: "member is not an enumeration".to_string(),
        }),
    }
}

fn list_default(
    list: &ListSpec,
    record: &RecordType,
    registry: &Registry,
    supplied: Option<&Value>,
) -> Result<Instance> {
    let variable = list.variable();
    match &list.item {
        ListItem::Group(sub) => {
            if supplied.is_some() {
                return Err(DataShapeError::InputListsNotSupported {
                    field: variable.to_string(),
                });
            }
            if list.default_size > 0 {
                let sub_record = lookup_record(registry, &sub.label)?;
                let items = (0..list.default_size)
                    .map(|_| build_default(sub, sub_record, registry, None))
                    .collect::<Result<Vec<_>>>()?;
                return Ok(Instance::Seq(items));
            }
        }
        item => {
            if let Some(value) = supplied {
                return match value {
                    Value::Array(_) => Ok(Instance::from_untyped(value)),
                    other => Err(DataShapeError::TypeMismatch {
                        member: variable.to_string(),
                        expected: "sequence".to_string(),
                        found: untyped_kind(other).to_string(),
                    }),
                };
            }
            if list.default_size > 0 {
                let fill = item
                    .field()
                    .and_then(|f| f.default.as_ref())
                    .map(|p| Instance::from_untyped(&p.invoke()))
                    .unwrap_or_default();
                return Ok(Instance::Seq(vec![fill; list.default_size]));
            }
        }
    }

    if list.default.is_none() {
        return Ok(Instance::Seq(Vec::new()));
    }
    // the synthesized member converts the provider's value
    match record.member(variable) {
        Some(member) => Ok(member.default.produce()?.unwrap_or_default()),
        None => Err(DataShapeError::UnknownMember {
            type_name: record.name().to_string(),
            member: variable.to_string(),
        }),
    }
}
