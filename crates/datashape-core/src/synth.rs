//! Type synthesis: GroupSpec -> RecordType descriptor plus a flat registry
//!
//! Every nested group and every choice produces a named sub-type. The
//! registry keys them by the type name derived from their label, flattened
//! across nesting, so the default builder can find the sub-type for any
//! group without re-walking the tree.

use crate::decode::{decode_shape, DecodeOptions};
use crate::defaults::build_default;
use crate::errors::{DataShapeError, Result};
use crate::shape::{ChoiceSpec, DefaultProvider, FieldSpec, GroupSpec, ListItem, ListSpec, Spec};
use crate::types::{
    EnumType, EnumVariant, Member, MemberDefault, RecordType, RecordTypeBuilder, TypeShape,
};
use crate::value::Instance;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// A generated sub-type
#[derive(Debug, Clone)]
pub enum RegisteredType {
    Record(Arc<RecordType>),
    Enum(Arc<EnumType>),
}

/// Flat name -> sub-type map produced by synthesis
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<String, RegisteredType>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sub-type
    ///
    /// Re-registering a structurally identical type is a no-op.
    ///
    /// # Errors
    ///
    /// `RegistryCollision` if a different type already holds `name`.
    pub fn insert(&mut self, name: impl Into<String>, entry: RegisteredType) -> Result<()> {
        let name = name.into();
        match self.entries.get(&name) {
            None => {
                tracing::trace!(type_name = %name, "registering sub-type");
                self.entries.insert(name, entry);
                Ok(())
            }
            Some(existing) if same_entry(existing, &entry) => Ok(()),
            Some(_) => Err(DataShapeError::RegistryCollision { type_name: name }),
        }
    }

    /// Fold another registry into this one
    ///
    /// # Errors
    ///
    /// `RegistryCollision` on the first conflicting name.
    pub fn extend(&mut self, other: Registry) -> Result<()> {
        for (name, entry) in other.entries {
            self.insert(name, entry)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredType> {
        self.entries.get(name)
    }

    pub fn record(&self, name: &str) -> Option<&Arc<RecordType>> {
        match self.entries.get(name) {
            Some(RegisteredType::Record(record)) => Some(record),
            _ => None,
        }
    }

    pub fn enumeration(&self, name: &str) -> Option<&Arc<EnumType>> {
        match self.entries.get(name) {
            Some(RegisteredType::Enum(e)) => Some(e),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn same_entry(a: &RegisteredType, b: &RegisteredType) -> bool {
    match (a, b) {
        (RegisteredType::Record(x), RegisteredType::Record(y)) => {
            Arc::ptr_eq(x, y) || x.same_structure(y)
        }
        (RegisteredType::Enum(x), RegisteredType::Enum(y)) => x == y,
        _ => false,
    }
}

/// Convert a display label into a type name
///
/// Words are split on anything that is not alphanumeric, capitalized and
/// concatenated: `"generated type"` becomes `GeneratedType`.
pub fn type_name_from_label(label: &str) -> String {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn enum_name_for(variable: &str) -> String {
    format!("{}Enum", type_name_from_label(variable))
}

/// Synthesize the record type for `group` and the registry of its sub-types
///
/// Members whose spec has no default provider and is required come first;
/// the relative order inside each partition follows the group.
///
/// # Errors
///
/// `DuplicateMember` if two children share a variable, `RegistryCollision`
/// if two different sub-types map to the same name.
pub fn synthesize(group: &GroupSpec) -> Result<(Arc<RecordType>, Registry)> {
    let type_name = type_name_from_label(&group.label);
    let mut registry = Registry::new();
    let mut seen = HashSet::new();
    let mut members: Vec<Member> = Vec::with_capacity(group.fields.len());

    for child in &group.fields {
        if !seen.insert(child.variable()) {
            return Err(DataShapeError::DuplicateMember {
                group: type_name.clone(),
                variable: child.variable().to_string(),
            });
        }
        members.push(member_for(child, &mut registry)?);
    }

    // stable: keeps declaration order within each partition
    members.sort_by_key(|m| !m.default.is_required());

    let record = members
        .into_iter()
        .fold(
            RecordTypeBuilder::new(type_name).doc(format!("{} generated record", group.label)),
            RecordTypeBuilder::member,
        )
        .build()?;

    tracing::debug!(
        type_name = record.name(),
        member_count = record.members().len(),
        registry_len = registry.len(),
        "synthesized record type"
    );
    Ok((record, registry))
}

fn member_for(child: &Spec, registry: &mut Registry) -> Result<Member> {
    let (shape, default) = match child {
        Spec::Field(field) => field_member(field),
        Spec::Number(number) => field_member(&number.field),
        Spec::Choice(choice) => {
            let enumeration = enum_for(choice);
            registry.insert(
                type_name_from_label(&choice.field.label),
                RegisteredType::Enum(enumeration.clone()),
            )?;
            let default = choice_default(choice, &enumeration);
            (TypeShape::Enum(enumeration), default)
        }
        Spec::Group(sub) => {
            let record = nested_record(sub, registry)?;
            let default = group_default(sub, &record);
            (TypeShape::Record(record), default)
        }
        Spec::List(list) => list_member(list, registry)?,
    };
    Ok(Member {
        name: child.variable().to_string(),
        shape,
        default,
    })
}

fn nested_record(sub: &GroupSpec, registry: &mut Registry) -> Result<Arc<RecordType>> {
    let (record, sub_registry) = synthesize(sub)?;
    registry.extend(sub_registry)?;
    registry.insert(
        type_name_from_label(&sub.label),
        RegisteredType::Record(record.clone()),
    )?;
    Ok(record)
}

fn field_member(field: &FieldSpec) -> (TypeShape, MemberDefault) {
    let default = match &field.default {
        Some(provider) => {
            let provider = provider.clone();
            MemberDefault::Factory(Arc::new(move || Ok(Instance::from_untyped(&provider.invoke()))))
        }
        None if !field.required => MemberDefault::Null,
        None => MemberDefault::Required,
    };
    (TypeShape::Primitive(field.value_type), default)
}

fn enum_for(choice: &ChoiceSpec) -> Arc<EnumType> {
    Arc::new(EnumType::new(
        enum_name_for(&choice.field.variable),
        choice
            .options
            .iter()
            .map(|opt| EnumVariant {
                label: opt.label.clone(),
                value: Value::String(opt.uid.clone()),
            })
            .collect(),
    ))
}

fn choice_default(choice: &ChoiceSpec, enumeration: &Arc<EnumType>) -> MemberDefault {
    match &choice.field.default {
        Some(provider) => {
            let provider = provider.clone();
            let enumeration = enumeration.clone();
            MemberDefault::Factory(Arc::new(move || {
                enumeration.resolve(&provider.invoke()).map(Instance::Enum)
            }))
        }
        None if !choice.field.required => MemberDefault::Null,
        None => MemberDefault::Required,
    }
}

fn group_default(sub: &GroupSpec, record: &Arc<RecordType>) -> MemberDefault {
    match &sub.default {
        Some(provider) => {
            let provider = provider.clone();
            let record = record.clone();
            let field = sub.variable.clone();
            MemberDefault::Factory(Arc::new(move || {
                let value = provider.invoke();
                if !value.is_object() {
                    return Err(DataShapeError::InvalidDefault {
                        field: field.clone(),
                        reason: format!("group default must be a map, got {}", value),
                    });
                }
                decode_shape(&value, &TypeShape::Record(record.clone()), DecodeOptions::default())
            }))
        }
        None if !sub.required => MemberDefault::Null,
        None => MemberDefault::Required,
    }
}

fn list_member(list: &ListSpec, registry: &mut Registry) -> Result<(TypeShape, MemberDefault)> {
    let item_shape = match &list.item {
        ListItem::Group(sub) => TypeShape::Record(nested_record(sub, registry)?),
        ListItem::Field(field) => TypeShape::Primitive(field.value_type),
        ListItem::Number(number) => TypeShape::Primitive(number.field.value_type),
    };
    let shape = TypeShape::sequence_of(item_shape);

    let default = match &list.default {
        Some(provider) => list_default(provider, &shape, list.variable()),
        None if !list.item.required() => MemberDefault::Null,
        None => MemberDefault::Required,
    };
    Ok((shape, default))
}

fn list_default(provider: &DefaultProvider, shape: &TypeShape, variable: &str) -> MemberDefault {
    let provider = provider.clone();
    let shape = shape.clone();
    let field = variable.to_string();
    MemberDefault::Factory(Arc::new(move || {
        let value = provider.invoke();
        if !value.is_array() {
            return Err(DataShapeError::InvalidDefault {
                field: field.clone(),
                reason: format!("list default must be a sequence, got {}", value),
            });
        }
        decode_shape(&value, &shape, DecodeOptions::default())
    }))
}

/// A synthesized record type bound to its spec and registry
///
/// This is the unit callers cache: the default constructor and the decoder
/// both hang off it.
#[derive(Debug, Clone)]
pub struct SynthesizedType {
    record: Arc<RecordType>,
    group: Arc<GroupSpec>,
    registry: Arc<Registry>,
}

impl SynthesizedType {
    /// # Errors
    ///
    /// See [`synthesize`].
    pub fn new(group: GroupSpec) -> Result<Self> {
        let (record, registry) = synthesize(&group)?;
        Ok(Self {
            record,
            group: Arc::new(group),
            registry: Arc::new(registry),
        })
    }

    pub fn record(&self) -> &Arc<RecordType> {
        &self.record
    }

    pub fn group(&self) -> &GroupSpec {
        &self.group
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Fully populated default instance, optionally seeded by `input`
    ///
    /// # Errors
    ///
    /// See [`build_default`].
    pub fn build_default(&self, input: Option<&Value>) -> Result<Instance> {
        build_default(&self.group, &self.record, &self.registry, input)
    }

    /// Decode untyped data into this type
    ///
    /// # Errors
    ///
    /// See [`crate::decode::decode`].
    pub fn decode(&self, data: &Value, options: DecodeOptions) -> Result<Instance> {
        crate::decode::decode(data, &self.record, options)
    }
}
