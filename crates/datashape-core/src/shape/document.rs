//! JSON rendering of schemas
//!
//! Every node carries a `type` discriminator (`field`, `number`, `choice`,
//! `group` or `list`). Literal `default` values are wrapped in constant
//! providers on the way in and produced by invoking the provider on the way
//! out.
//!
//! ```json
//! {
//!   "type": "group", "variable": "root", "label": "Generated Type",
//!   "fields": [
//!     {"type": "field", "variable": "foo", "label": "Foo", "valueType": "string", "required": true},
//!     {"type": "list", "defaultSize": 2,
//!      "item": {"type": "field", "variable": "xs", "label": "Xs", "valueType": "integer", "default": 0}}
//!   ]
//! }
//! ```

use super::spec::{
    constant, ChoiceOption, ChoiceSpec, FieldSpec, GroupSpec, ListItem, ListSpec, NumberFieldSpec,
    Spec, ValueType,
};
use crate::errors::{DataShapeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldDocument {
    variable: String,
    label: String,
    value_type: ValueType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NumberDocument {
    #[serde(flatten)]
    field: FieldDocument,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    step: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OptionDocument {
    uid: String,
    label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChoiceDocument {
    variable: String,
    label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(default)]
    options: Vec<OptionDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GroupDocument {
    variable: String,
    label: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    fields: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocument {
    item: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(default)]
    default_size: usize,
}

fn invalid(reason: impl Into<String>) -> DataShapeError {
    DataShapeError::InvalidSchemaDocument {
        reason: reason.into(),
    }
}

fn parse<T: for<'de> Deserialize<'de>>(doc: &Value, tag: &str) -> Result<T> {
    serde_json::from_value(doc.clone()).map_err(|e| invalid(format!("{} node: {}", tag, e)))
}

/// Parse a schema document whose root is a group
///
/// # Errors
///
/// `UnknownSpecType` for an unrecognised discriminator, and
/// `InvalidSchemaDocument` for malformed nodes or a non-group root.
pub fn schema_from_document(doc: &Value) -> Result<GroupSpec> {
    match spec_from_document(doc)? {
        Spec::Group(group) => Ok(group),
        other => Err(invalid(format!(
            "root must be a group, found {}",
            other.kind_name()
        ))),
    }
}

/// Parse any spec node
///
/// # Errors
///
/// See [`schema_from_document`].
pub fn spec_from_document(doc: &Value) -> Result<Spec> {
    let tag = doc
        .as_object()
        .ok_or_else(|| invalid("spec node must be an object"))?
        .get("type")
        .ok_or_else(|| invalid("spec node has no 'type'"))?
        .as_str()
        .ok_or_else(|| invalid("'type' must be a string"))?;

    match tag {
        "field" => Ok(Spec::Field(field_from(parse(doc, tag)?))),
        "number" => Ok(Spec::Number(number_from(parse(doc, tag)?))),
        "choice" => {
            let d: ChoiceDocument = parse(doc, tag)?;
            let mut choice = ChoiceSpec::new(d.variable, d.label)
                .with_required(d.required)
                .with_description(d.description)
                .with_options(d.options.into_iter().map(|o| {
                    ChoiceOption::new(o.uid, o.label)
                        .with_description(o.description)
                        .with_dependencies(o.dependencies)
                }));
            if let Some(default) = d.default {
                choice = choice.with_default(constant(default));
            }
            Ok(Spec::Choice(choice))
        }
        "group" => Ok(Spec::Group(group_from(parse(doc, tag)?)?)),
        "list" => {
            let d: ListDocument = parse(doc, tag)?;
            let item = match spec_from_document(&d.item)? {
                Spec::Field(f) => ListItem::Field(f),
                Spec::Number(n) => ListItem::Number(n),
                Spec::Group(g) => ListItem::Group(g),
                other => {
                    return Err(invalid(format!(
                        "list cannot wrap a {} node",
                        other.kind_name()
                    )))
                }
            };
            let mut list = ListSpec::new(item).with_default_size(d.default_size);
            if let Some(default) = d.default {
                list = list.with_default(constant(default));
            }
            Ok(Spec::List(list))
        }
        other => Err(DataShapeError::UnknownSpecType {
            type_tag: other.to_string(),
        }),
    }
}

fn field_from(d: FieldDocument) -> FieldSpec {
    let mut field = FieldSpec::new(d.variable, d.label, d.value_type)
        .with_description(d.description)
        .with_required(d.required)
        .with_dependencies(d.dependencies);
    if let Some(default) = d.default {
        field = field.with_default(constant(default));
    }
    field.unit = d.unit;
    field
}

fn number_from(d: NumberDocument) -> NumberFieldSpec {
    let mut number = NumberFieldSpec::from_field(field_from(d.field));
    number.min = d.min.unwrap_or(number.min);
    number.max = d.max.unwrap_or(number.max);
    number.step = d.step.unwrap_or(number.step);
    number
}

fn group_from(d: GroupDocument) -> Result<GroupSpec> {
    let fields = d
        .fields
        .iter()
        .map(spec_from_document)
        .collect::<Result<Vec<_>>>()?;
    let mut group = GroupSpec::new(d.variable, d.label)
        .with_required(d.required)
        .with_fields(fields);
    if let Some(default) = d.default {
        group = group.with_default(constant(default));
    }
    Ok(group)
}

/// Render a schema as a document
///
/// # Errors
///
/// `Serialization` if a node cannot be encoded.
pub fn schema_to_document(group: &GroupSpec) -> Result<Value> {
    spec_to_document(&Spec::Group(group.clone()))
}

/// Render one spec node
///
/// # Errors
///
/// `Serialization` if a node cannot be encoded.
pub fn spec_to_document(spec: &Spec) -> Result<Value> {
    let body = match spec {
        Spec::Field(f) => serde_json::to_value(field_document(f))?,
        Spec::Number(n) => serde_json::to_value(NumberDocument {
            field: field_document(&n.field),
            min: Some(n.min),
            max: Some(n.max),
            step: Some(n.step),
        })?,
        Spec::Choice(c) => serde_json::to_value(ChoiceDocument {
            variable: c.field.variable.clone(),
            label: c.field.label.clone(),
            description: c.field.description.clone(),
            required: c.field.required,
            default: c.field.default.as_ref().map(|p| p.invoke()),
            options: c
                .options
                .iter()
                .map(|o| OptionDocument {
                    uid: o.uid.clone(),
                    label: o.label.clone(),
                    description: o.description.clone(),
                    dependencies: o.dependencies.clone(),
                })
                .collect(),
        })?,
        Spec::Group(g) => serde_json::to_value(GroupDocument {
            variable: g.variable.clone(),
            label: g.label.clone(),
            required: g.required,
            fields: g
                .fields
                .iter()
                .map(spec_to_document)
                .collect::<Result<Vec<_>>>()?,
            default: g.default.as_ref().map(|p| p.invoke()),
        })?,
        Spec::List(l) => {
            let item = match &l.item {
                ListItem::Field(f) => Spec::Field(f.clone()),
                ListItem::Number(n) => Spec::Number(n.clone()),
                ListItem::Group(g) => Spec::Group(g.clone()),
            };
            serde_json::to_value(ListDocument {
                item: spec_to_document(&item)?,
                default: l.default.as_ref().map(|p| p.invoke()),
                default_size: l.default_size,
            })?
        }
    };

    let mut node = Map::new();
    node.insert("type".to_string(), Value::String(spec.kind_name().to_string()));
    if let Value::Object(fields) = body {
        node.extend(fields);
    }
    Ok(Value::Object(node))
}

fn field_document(f: &FieldSpec) -> FieldDocument {
    FieldDocument {
        variable: f.variable.clone(),
        label: f.label.clone(),
        value_type: f.value_type,
        description: f.description.clone(),
        required: f.required,
        default: f.default.as_ref().map(|p| p.invoke()),
        unit: f.unit.clone(),
        dependencies: f.dependencies.clone(),
    }
}
