//! Runtime type descriptors
//!
//! A [`RecordType`] is the product of type synthesis (or of a hand-written
//! [`RecordTypeBuilder`]). It knows its members, their shapes and how to
//! produce a default for each one, which is all the decoder and the default
//! builder need.

use crate::errors::{DataShapeError, Result};
use crate::value::{EnumMember, Instance, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Scalar kinds a field can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Integer,
    Float,
    String,
    Boolean,
}

impl PrimitiveKind {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Float => "float",
            PrimitiveKind::String => "string",
            PrimitiveKind::Boolean => "boolean",
        }
    }

    /// Whether an untyped value already has this runtime kind
    ///
    /// Floats only accept non-integral JSON numbers, so `1` is an integer and
    /// `1.0` is a float.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            PrimitiveKind::Integer => value.is_i64() || value.is_u64(),
            PrimitiveKind::Float => value.is_f64(),
            PrimitiveKind::String => value.is_string(),
            PrimitiveKind::Boolean => value.is_boolean(),
        }
    }

    /// Whether an instance already holds this kind
    pub fn admits(&self, value: &Instance) -> bool {
        matches!(
            (self, value),
            (PrimitiveKind::Integer, Instance::Int(_) | Instance::UInt(_))
                | (PrimitiveKind::Float, Instance::Float(_))
                | (PrimitiveKind::String, Instance::Str(_))
                | (PrimitiveKind::Boolean, Instance::Bool(_))
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared shape of a member
#[derive(Debug, Clone)]
pub enum TypeShape {
    Primitive(PrimitiveKind),
    Union(Vec<TypeShape>),
    Enum(Arc<EnumType>),
    Sequence(Box<TypeShape>),
    Map(Box<TypeShape>),
    Record(Arc<RecordType>),
}

impl TypeShape {
    pub fn sequence_of(item: TypeShape) -> Self {
        TypeShape::Sequence(Box::new(item))
    }

    pub fn map_of(value: TypeShape) -> Self {
        TypeShape::Map(Box::new(value))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeShape::Primitive(_))
    }

    /// Human readable rendering, e.g. `List[integer]`
    pub fn describe(&self) -> String {
        match self {
            TypeShape::Primitive(kind) => kind.name().to_string(),
            TypeShape::Union(arms) => format!(
                "Union[{}]",
                arms.iter()
                    .map(TypeShape::describe)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            TypeShape::Enum(e) => e.name().to_string(),
            TypeShape::Sequence(item) => format!("List[{}]", item.describe()),
            TypeShape::Map(value) => format!("Map[{}]", value.describe()),
            TypeShape::Record(r) => r.name().to_string(),
        }
    }

    /// Structural equality, ignoring member defaults
    pub fn same_structure(&self, other: &TypeShape) -> bool {
        match (self, other) {
            (TypeShape::Primitive(a), TypeShape::Primitive(b)) => a == b,
            (TypeShape::Union(a), TypeShape::Union(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_structure(y))
            }
            (TypeShape::Enum(a), TypeShape::Enum(b)) => a == b,
            (TypeShape::Sequence(a), TypeShape::Sequence(b))
            | (TypeShape::Map(a), TypeShape::Map(b)) => a.same_structure(b),
            (TypeShape::Record(a), TypeShape::Record(b)) => a.same_structure(b),
            _ => false,
        }
    }
}

/// One labelled value of an enumeration
#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub label: String,
    pub value: Value,
}

/// A closed set of labelled values
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    name: String,
    variants: Vec<EnumVariant>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, variants: Vec<EnumVariant>) -> Self {
        Self {
            name: name.into(),
            variants,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[EnumVariant] {
        &self.variants
    }

    fn member(&self, variant: &EnumVariant) -> EnumMember {
        EnumMember {
            enum_name: self.name.clone(),
            label: variant.label.clone(),
            value: variant.value.clone(),
        }
    }

    pub fn member_by_value(&self, value: &Value) -> Option<EnumMember> {
        self.variants
            .iter()
            .find(|v| &v.value == value)
            .map(|v| self.member(v))
    }

    pub fn member_by_label(&self, label: &str) -> Option<EnumMember> {
        self.variants
            .iter()
            .find(|v| v.label == label)
            .map(|v| self.member(v))
    }

    /// Resolve a raw value to the member carrying it
    ///
    /// # Errors
    ///
    /// `UnknownEnumValue` when no member carries `value`.
    pub fn resolve(&self, value: &Value) -> Result<EnumMember> {
        self.member_by_value(value)
            .ok_or_else(|| DataShapeError::UnknownEnumValue {
                enum_name: self.name.clone(),
                value: value.to_string(),
            })
    }
}

/// Zero-argument producer of a member's default instance
pub type InstanceFactory = Arc<dyn Fn() -> Result<Instance> + Send + Sync>;

/// How a member is filled when construction omits it
#[derive(Clone)]
pub enum MemberDefault {
    /// No default: construction fails without a value
    Required,
    /// Defaults to `Instance::Null`
    Null,
    /// A fixed instance, cloned on every use
    Value(Instance),
    /// A fresh instance per use
    Factory(InstanceFactory),
}

impl MemberDefault {
    pub fn is_required(&self) -> bool {
        matches!(self, MemberDefault::Required)
    }

    /// Produce the default, or `None` for required members
    ///
    /// # Errors
    ///
    /// Whatever the factory reports.
    pub fn produce(&self) -> Result<Option<Instance>> {
        match self {
            MemberDefault::Required => Ok(None),
            MemberDefault::Null => Ok(Some(Instance::Null)),
            MemberDefault::Value(instance) => Ok(Some(instance.clone())),
            MemberDefault::Factory(factory) => factory().map(Some),
        }
    }
}

impl fmt::Debug for MemberDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberDefault::Required => write!(f, "Required"),
            MemberDefault::Null => write!(f, "Null"),
            MemberDefault::Value(instance) => f.debug_tuple("Value").field(instance).finish(),
            MemberDefault::Factory(_) => write!(f, "Factory(<fn>)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub shape: TypeShape,
    pub default: MemberDefault,
}

/// A record type: name, documentation and ordered members
#[derive(Debug, Clone)]
pub struct RecordType {
    name: String,
    doc: String,
    members: Vec<Member>,
}

impl RecordType {
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.member(name).is_some()
    }

    pub fn required_members(&self) -> Vec<&str> {
        self.members
            .iter()
            .filter(|m| m.default.is_required())
            .map(|m| m.name.as_str())
            .collect()
    }

    /// Build an instance from explicit member values
    ///
    /// Omitted members fall back to their defaults.
    ///
    /// # Errors
    ///
    /// `MissingMembers` when a required member has no value, `UnknownMember`
    /// when `values` names something this type does not declare.
    pub fn construct(&self, mut values: BTreeMap<String, Instance>) -> Result<Instance> {
        let mut members = Vec::with_capacity(self.members.len());
        let mut missing = Vec::new();

        for member in &self.members {
            if let Some(value) = values.remove(&member.name) {
                members.push((member.name.clone(), value));
                continue;
            }
            match member.default.produce()? {
                Some(value) => members.push((member.name.clone(), value)),
                None => missing.push(member.name.clone()),
            }
        }

        if let Some(extra) = values.into_keys().next() {
            return Err(DataShapeError::UnknownMember {
                type_name: self.name.clone(),
                member: extra,
            });
        }
        if !missing.is_empty() {
            return Err(DataShapeError::MissingMembers {
                type_name: self.name.clone(),
                members: missing,
            });
        }

        Ok(Instance::Record(Record::new(self.name.clone(), members)))
    }

    /// Zero-argument construction
    ///
    /// # Errors
    ///
    /// `MissingMembers` if any member is required.
    pub fn construct_default(&self) -> Result<Instance> {
        self.construct(BTreeMap::new())
    }

    /// Verify every member of `instance` holds its declared shape
    ///
    /// `null` is accepted anywhere. Nested records, sequence elements and map
    /// values are checked recursively; the reported member is the dotted
    /// path from this record.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` for the first offending member, `MissingMembers` when
    /// `instance` lacks a declared member.
    pub fn check(&self, instance: &Instance) -> Result<()> {
        check_record(self, instance, "")
    }

    pub fn same_structure(&self, other: &RecordType) -> bool {
        self.name == other.name
            && self.members.len() == other.members.len()
            && self
                .members
                .iter()
                .zip(&other.members)
                .all(|(a, b)| a.name == b.name && a.shape.same_structure(&b.shape))
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}

fn mismatch(path: &str, expected: String, found: &Instance) -> DataShapeError {
    DataShapeError::TypeMismatch {
        member: if path.is_empty() { "<root>".to_string() } else { path.to_string() },
        expected,
        found: found.kind_name().to_string(),
    }
}

fn check_record(ty: &RecordType, instance: &Instance, path: &str) -> Result<()> {
    let record = match instance {
        Instance::Record(record) if record.type_name() == ty.name() => record,
        other => return Err(mismatch(path, ty.name().to_string(), other)),
    };
    let missing: Vec<String> = ty
        .members
        .iter()
        .filter(|m| !record.contains(&m.name))
        .map(|m| m.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(DataShapeError::MissingMembers {
            type_name: ty.name.clone(),
            members: missing,
        });
    }
    for member in &ty.members {
        if let Some(value) = record.get(&member.name) {
            check_shape(&member.shape, value, &join(path, &member.name))?;
        }
    }
    Ok(())
}

fn check_shape(shape: &TypeShape, value: &Instance, path: &str) -> Result<()> {
    if value.is_null() {
        return Ok(());
    }
    match (shape, value) {
        (TypeShape::Primitive(kind), _) if kind.admits(value) => Ok(()),
        (TypeShape::Union(arms), _) if arms.iter().any(|arm| check_shape(arm, value, path).is_ok()) => {
            Ok(())
        }
        (TypeShape::Enum(enumeration), Instance::Enum(member))
            if member.enum_name == enumeration.name() =>
        {
            Ok(())
        }
        (TypeShape::Sequence(item), Instance::Seq(items)) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, element)| check_shape(item, element, &join(path, &i.to_string()))),
        (TypeShape::Map(value_shape), Instance::Map(map)) => map
            .iter()
            .try_for_each(|(key, element)| check_shape(value_shape, element, &join(path, key))),
        (TypeShape::Record(record), _) => check_record(record, value, path),
        _ => Err(mismatch(path, shape.describe(), value)),
    }
}

/// Hand-assembly of record types
///
/// ```
/// use datashape_core::types::{PrimitiveKind, RecordType, TypeShape};
///
/// let point = RecordType::builder("Point")
///     .required("lat", TypeShape::Primitive(PrimitiveKind::Float))
///     .optional("lon", TypeShape::Primitive(PrimitiveKind::Float))
///     .build()
///     .unwrap();
/// assert_eq!(point.required_members(), vec!["lat"]);
/// ```
pub struct RecordTypeBuilder {
    name: String,
    doc: String,
    members: Vec<Member>,
}

impl RecordTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            members: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn required(self, name: impl Into<String>, shape: TypeShape) -> Self {
        self.with_default(name, shape, MemberDefault::Required)
    }

    /// Member defaulting to `Instance::Null`
    pub fn optional(self, name: impl Into<String>, shape: TypeShape) -> Self {
        self.with_default(name, shape, MemberDefault::Null)
    }

    pub fn with_value(self, name: impl Into<String>, shape: TypeShape, value: Instance) -> Self {
        self.with_default(name, shape, MemberDefault::Value(value))
    }

    pub fn with_factory<F>(self, name: impl Into<String>, shape: TypeShape, factory: F) -> Self
    where
        F: Fn() -> Result<Instance> + Send + Sync + 'static,
    {
        self.with_default(name, shape, MemberDefault::Factory(Arc::new(factory)))
    }

    pub fn with_default(
        self,
        name: impl Into<String>,
        shape: TypeShape,
        default: MemberDefault,
    ) -> Self {
        self.member(Member {
            name: name.into(),
            shape,
            default,
        })
    }

    /// # Errors
    ///
    /// `DuplicateMember` if two members share a name.
    pub fn build(self) -> Result<Arc<RecordType>> {
        let mut seen = HashSet::new();
        for member in &self.members {
            if !seen.insert(member.name.as_str()) {
                return Err(DataShapeError::DuplicateMember {
                    group: self.name.clone(),
                    variable: member.name.clone(),
                });
            }
        }
        Ok(Arc::new(RecordType {
            name: self.name,
            doc: self.doc,
            members: self.members,
        }))
    }
}
