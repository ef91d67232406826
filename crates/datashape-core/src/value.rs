//! Decoded instances: the tagged value tree every operation produces and consumes.
//!
//! An [`Instance`] is what a synthesized type looks like at runtime. Records
//! keep their members in declared order; maps are keyed and ordered by key.
//! `Instance::Null` is the "no value" sentinel.

use crate::errors::{DataShapeError, Result};
use serde_json::{Map as JsonMap, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A value shaped according to a target type
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Instance {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`; smaller ones are always `Int`
    UInt(u64),
    Float(f64),
    Str(String),
    Enum(EnumMember),
    Seq(Vec<Instance>),
    Map(BTreeMap<String, Instance>),
    Record(Record),
}

/// A resolved enumeration member
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub enum_name: String,
    pub label: String,
    pub value: Value,
}

/// A record instance: a type name plus members in declared order
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    members: Vec<(String, Instance)>,
}

impl Record {
    pub fn new(type_name: impl Into<String>, members: Vec<(String, Instance)>) -> Self {
        Self {
            type_name: type_name.into(),
            members,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Look up a member by name
    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Instance> {
        self.members
            .iter_mut()
            .find(|(member, _)| member == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate members in declared order
    pub fn members(&self) -> impl Iterator<Item = (&str, &Instance)> {
        self.members.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Return a copy of this record with one member replaced
    ///
    /// # Errors
    ///
    /// `UnknownMember` if the record does not declare `name`.
    pub fn with_member(&self, name: &str, value: Instance) -> Result<Record> {
        let mut next = self.clone();
        match next.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(next)
            }
            None => Err(DataShapeError::UnknownMember {
                type_name: self.type_name.clone(),
                member: name.to_string(),
            }),
        }
    }

    pub fn into_members(self) -> Vec<(String, Instance)> {
        self.members
    }
}

impl Instance {
    /// Short runtime kind name used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Instance::Null => "null",
            Instance::Bool(_) => "bool",
            Instance::Int(_) | Instance::UInt(_) => "int",
            Instance::Float(_) => "float",
            Instance::Str(_) => "str",
            Instance::Enum(_) => "enum",
            Instance::Seq(_) => "seq",
            Instance::Map(_) => "map",
            Instance::Record(_) => "record",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Instance::Null)
    }

    /// Bool, Int, Float or Str
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Instance::Bool(_)
                | Instance::Int(_)
                | Instance::UInt(_)
                | Instance::Float(_)
                | Instance::Str(_)
        )
    }

    /// Primitive or enumeration member
    pub fn is_scalar(&self) -> bool {
        self.is_primitive() || matches!(self, Instance::Enum(_))
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Instance::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Instance]> {
        match self {
            Instance::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Instance>> {
        match self {
            Instance::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Instance::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Instance::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of Int and Float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Instance::Int(n) => Some(*n as f64),
            Instance::UInt(n) => Some(*n as f64),
            Instance::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Convert an untyped tree verbatim, without consulting any type
    pub fn from_untyped(value: &Value) -> Instance {
        match value {
            Value::Null => Instance::Null,
            Value::Bool(b) => Instance::Bool(*b),
            Value::Number(n) => number_to_instance(n),
            Value::String(s) => Instance::Str(s.clone()),
            Value::Array(items) => Instance::Seq(items.iter().map(Instance::from_untyped).collect()),
            Value::Object(map) => Instance::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Instance::from_untyped(v)))
                    .collect(),
            ),
        }
    }

    /// Unpack an instance into its untyped form
    ///
    /// Records and maps become objects, enumeration members become their
    /// declared value, and non-finite floats become `null`.
    pub fn to_untyped(&self) -> Value {
        match self {
            Instance::Null => Value::Null,
            Instance::Bool(b) => Value::Bool(*b),
            Instance::Int(n) => Value::Number((*n).into()),
            Instance::UInt(n) => Value::Number((*n).into()),
            Instance::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            Instance::Str(s) => Value::String(s.clone()),
            Instance::Enum(member) => member.value.clone(),
            Instance::Seq(items) => Value::Array(items.iter().map(Instance::to_untyped).collect()),
            Instance::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_untyped()))
                    .collect::<JsonMap<String, Value>>(),
            ),
            Instance::Record(record) => Value::Object(
                record
                    .members()
                    .map(|(k, v)| (k.to_string(), v.to_untyped()))
                    .collect::<JsonMap<String, Value>>(),
            ),
        }
    }
}

fn number_to_instance(n: &Number) -> Instance {
    if let Some(i) = n.as_i64() {
        Instance::Int(i)
    } else if let Some(u) = n.as_u64() {
        Instance::UInt(u)
    } else {
        Instance::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Kind name of an untyped value, in the same vocabulary as `Instance::kind_name`
pub fn untyped_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "seq",
        Value::Object(_) => "map",
    }
}

impl From<&Value> for Instance {
    fn from(value: &Value) -> Self {
        Instance::from_untyped(value)
    }
}

impl From<Value> for Instance {
    fn from(value: Value) -> Self {
        Instance::from_untyped(&value)
    }
}

impl From<bool> for Instance {
    fn from(b: bool) -> Self {
        Instance::Bool(b)
    }
}

impl From<i64> for Instance {
    fn from(n: i64) -> Self {
        Instance::Int(n)
    }
}

impl From<f64> for Instance {
    fn from(f: f64) -> Self {
        Instance::Float(f)
    }
}

impl From<&str> for Instance {
    fn from(s: &str) -> Self {
        Instance::Str(s.to_string())
    }
}

impl From<String> for Instance {
    fn from(s: String) -> Self {
        Instance::Str(s)
    }
}

impl From<Vec<Instance>> for Instance {
    fn from(items: Vec<Instance>) -> Self {
        Instance::Seq(items)
    }
}

impl From<Record> for Instance {
    fn from(record: Record) -> Self {
        Instance::Record(record)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instance::Null => write!(f, "null"),
            Instance::Bool(b) => write!(f, "{}", b),
            Instance::Int(n) => write!(f, "{}", n),
            Instance::UInt(n) => write!(f, "{}", n),
            Instance::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Instance::Str(s) => write!(f, "{}", s),
            Instance::Enum(member) => write!(f, "{}.{}", member.enum_name, member.label),
            Instance::Seq(_) | Instance::Map(_) | Instance::Record(_) => {
                write!(f, "{}", self.to_untyped())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_untyped_keeps_number_kinds() {
        let inst = Instance::from_untyped(&json!({"a": 1, "b": 1.5, "c": [true, "x", null]}));
        let map = inst.as_map().unwrap();
        assert_eq!(map["a"], Instance::Int(1));
        assert_eq!(map["b"], Instance::Float(1.5));
        assert_eq!(
            map["c"],
            Instance::Seq(vec![Instance::Bool(true), "x".into(), Instance::Null])
        );
    }

    #[test]
    fn test_enum_unpacks_to_value() {
        let inst = Instance::Enum(EnumMember {
            enum_name: "SelEnum".into(),
            label: "A".into(),
            value: json!("a"),
        });
        assert_eq!(inst.to_untyped(), json!("a"));
        assert_eq!(inst.to_string(), "SelEnum.A");
    }

    #[test]
    fn test_record_with_member_is_copy_on_write() {
        let record = Record::new("Foo", vec![("a".into(), Instance::Int(1))]);
        let next = record.with_member("a", Instance::Int(2)).unwrap();
        assert_eq!(record.get("a"), Some(&Instance::Int(1)));
        assert_eq!(next.get("a"), Some(&Instance::Int(2)));
        assert!(record.with_member("zz", Instance::Null).is_err());
    }

    #[test]
    fn test_float_display_keeps_fraction() {
        assert_eq!(Instance::Float(2.0).to_string(), "2.0");
        assert_eq!(Instance::Float(3.3).to_string(), "3.3");
        assert_eq!(Instance::Float(10.0 / 3.0).to_string(), "3.3333333333333335");
    }

    #[test]
    fn test_large_unsigned_survives_unpack() {
        let raw = json!(u64::MAX);
        let inst = Instance::from_untyped(&raw);
        assert_eq!(inst, Instance::UInt(u64::MAX));
        assert_eq!(inst.to_untyped(), raw);
        assert_eq!(inst.kind_name(), "int");
        assert_eq!(Instance::from_untyped(&json!(7u64)), Instance::Int(7));
    }

    #[test]
    fn test_non_finite_float_unpacks_to_null() {
        assert_eq!(Instance::Float(f64::NAN).to_untyped(), Value::Null);
    }
}
