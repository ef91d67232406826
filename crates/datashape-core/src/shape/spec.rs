//! Spec nodes and their builders

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub use crate::types::PrimitiveKind as ValueType;

/// Zero-argument closure producing an untyped default value
///
/// Owned by the declaring field; builders only invoke it.
#[derive(Clone)]
pub struct DefaultProvider(Arc<dyn Fn() -> Value + Send + Sync>);

impl DefaultProvider {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn invoke(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for DefaultProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultProvider(<fn>)")
    }
}

/// Wrap a closure as a provider
pub fn provider<F>(f: F) -> DefaultProvider
where
    F: Fn() -> Value + Send + Sync + 'static,
{
    DefaultProvider::new(f)
}

/// Provider returning a clone of `value` on every call
pub fn constant(value: Value) -> DefaultProvider {
    DefaultProvider::new(move || value.clone())
}

/// Leaf field descriptor
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub variable: String,
    pub label: String,
    pub value_type: ValueType,
    pub description: String,
    pub required: bool,
    pub default: Option<DefaultProvider>,
    /// Opaque to the core
    pub unit: Option<Value>,
    pub dependencies: Vec<String>,
}

impl FieldSpec {
    pub fn new(variable: impl Into<String>, label: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            variable: variable.into(),
            label: label.into(),
            value_type,
            description: String::new(),
            required: false,
            default: None,
            unit: None,
            dependencies: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, default: DefaultProvider) -> Self {
        self.default = Some(default);
        self
    }

    /// Shorthand for `with_default(constant(value))`
    pub fn with_default_value(self, value: Value) -> Self {
        self.with_default(constant(value))
    }

    pub fn with_unit(mut self, unit: Value) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }
}

/// Numeric field with presentation bounds
///
/// `min`, `max` and `step` are carried for renderers and never enforced.
#[derive(Debug, Clone)]
pub struct NumberFieldSpec {
    pub field: FieldSpec,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl NumberFieldSpec {
    pub fn new(variable: impl Into<String>, label: impl Into<String>, value_type: ValueType) -> Self {
        Self::from_field(FieldSpec::new(variable, label, value_type))
    }

    pub fn from_field(field: FieldSpec) -> Self {
        Self {
            field,
            min: 0.0,
            max: 100.0,
            step: 1.0,
        }
    }

    pub fn with_bounds(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub uid: String,
    pub label: String,
    pub description: String,
    /// Parameters the option requires
    pub dependencies: Vec<String>,
}

impl ChoiceOption {
    pub fn new(uid: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            label: label.into(),
            description: String::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }
}

/// A field restricted to one of an ordered set of options
///
/// The default provider of a choice returns an option uid.
#[derive(Debug, Clone)]
pub struct ChoiceSpec {
    pub field: FieldSpec,
    pub options: Vec<ChoiceOption>,
}

impl ChoiceSpec {
    pub fn new(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: FieldSpec::new(variable, label, ValueType::String),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: ChoiceOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = ChoiceOption>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.field.required = required;
        self
    }

    pub fn with_default(mut self, default: DefaultProvider) -> Self {
        self.field.default = Some(default);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.field.description = description.into();
        self
    }
}

/// Composite of child specs
#[derive(Debug, Clone)]
pub struct GroupSpec {
    pub variable: String,
    pub label: String,
    pub required: bool,
    pub fields: Vec<Spec>,
    pub default: Option<DefaultProvider>,
}

impl GroupSpec {
    pub fn new(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            label: label.into(),
            required: false,
            fields: Vec::new(),
            default: None,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_field(mut self, spec: impl Into<Spec>) -> Self {
        self.fields.push(spec.into());
        self
    }

    pub fn with_fields<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        self.fields.extend(specs.into_iter().map(Into::into));
        self
    }

    pub fn with_default(mut self, default: DefaultProvider) -> Self {
        self.default = Some(default);
        self
    }
}

/// The child a list wraps
#[derive(Debug, Clone)]
pub enum ListItem {
    Field(FieldSpec),
    Number(NumberFieldSpec),
    Group(GroupSpec),
}

impl ListItem {
    /// The leaf field, for field and number items
    pub fn field(&self) -> Option<&FieldSpec> {
        match self {
            ListItem::Field(field) => Some(field),
            ListItem::Number(number) => Some(&number.field),
            ListItem::Group(_) => None,
        }
    }

    pub fn variable(&self) -> &str {
        match self {
            ListItem::Group(group) => &group.variable,
            _ => self.field().map(|f| f.variable.as_str()).unwrap_or_default(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ListItem::Group(group) => &group.label,
            _ => self.field().map(|f| f.label.as_str()).unwrap_or_default(),
        }
    }

    pub fn required(&self) -> bool {
        match self {
            ListItem::Group(group) => group.required,
            _ => self.field().map(|f| f.required).unwrap_or_default(),
        }
    }
}

/// Ordered sequence of one wrapped child
///
/// Variable, label and requiredness come from the wrapped child.
#[derive(Debug, Clone)]
pub struct ListSpec {
    pub item: ListItem,
    pub default: Option<DefaultProvider>,
    /// Items produced when building defaults with no input
    pub default_size: usize,
}

impl ListSpec {
    pub fn new(item: ListItem) -> Self {
        Self {
            item,
            default: None,
            default_size: 0,
        }
    }

    pub fn of_field(field: FieldSpec) -> Self {
        Self::new(ListItem::Field(field))
    }

    pub fn of_number(number: NumberFieldSpec) -> Self {
        Self::new(ListItem::Number(number))
    }

    pub fn of_group(group: GroupSpec) -> Self {
        Self::new(ListItem::Group(group))
    }

    pub fn with_default(mut self, default: DefaultProvider) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_default_size(mut self, default_size: usize) -> Self {
        self.default_size = default_size;
        self
    }

    pub fn variable(&self) -> &str {
        self.item.variable()
    }
}

/// Any child of a group
#[derive(Debug, Clone)]
pub enum Spec {
    Field(FieldSpec),
    Number(NumberFieldSpec),
    Choice(ChoiceSpec),
    Group(GroupSpec),
    List(ListSpec),
}

impl Spec {
    /// Discriminator used by the document codec
    pub fn kind_name(&self) -> &'static str {
        match self {
            Spec::Field(_) => "field",
            Spec::Number(_) => "number",
            Spec::Choice(_) => "choice",
            Spec::Group(_) => "group",
            Spec::List(_) => "list",
        }
    }

    pub fn variable(&self) -> &str {
        match self {
            Spec::Field(f) => &f.variable,
            Spec::Number(n) => &n.field.variable,
            Spec::Choice(c) => &c.field.variable,
            Spec::Group(g) => &g.variable,
            Spec::List(l) => l.variable(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Spec::Field(f) => &f.label,
            Spec::Number(n) => &n.field.label,
            Spec::Choice(c) => &c.field.label,
            Spec::Group(g) => &g.label,
            Spec::List(l) => l.item.label(),
        }
    }

    pub fn required(&self) -> bool {
        match self {
            Spec::Field(f) => f.required,
            Spec::Number(n) => n.field.required,
            Spec::Choice(c) => c.field.required,
            Spec::Group(g) => g.required,
            Spec::List(l) => l.item.required(),
        }
    }

    pub fn default_provider(&self) -> Option<&DefaultProvider> {
        match self {
            Spec::Field(f) => f.default.as_ref(),
            Spec::Number(n) => n.field.default.as_ref(),
            Spec::Choice(c) => c.field.default.as_ref(),
            Spec::Group(g) => g.default.as_ref(),
            Spec::List(l) => l.default.as_ref(),
        }
    }
}

impl From<FieldSpec> for Spec {
    fn from(spec: FieldSpec) -> Self {
        Spec::Field(spec)
    }
}

impl From<NumberFieldSpec> for Spec {
    fn from(spec: NumberFieldSpec) -> Self {
        Spec::Number(spec)
    }
}

impl From<ChoiceSpec> for Spec {
    fn from(spec: ChoiceSpec) -> Self {
        Spec::Choice(spec)
    }
}

impl From<GroupSpec> for Spec {
    fn from(spec: GroupSpec) -> Self {
        Spec::Group(spec)
    }
}

impl From<ListSpec> for Spec {
    fn from(spec: ListSpec) -> Self {
        Spec::List(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_inherits_child_identity() {
        let list = ListSpec::of_field(
            FieldSpec::new("foos", "Foos", ValueType::Integer).with_required(true),
        );
        let spec = Spec::from(list);
        assert_eq!(spec.variable(), "foos");
        assert_eq!(spec.label(), "Foos");
        assert!(spec.required());
        assert_eq!(spec.kind_name(), "list");
    }

    #[test]
    fn test_constant_provider_returns_fresh_clone() {
        let p = constant(json!([1, 2]));
        assert_eq!(p.invoke(), json!([1, 2]));
        assert_eq!(p.invoke(), json!([1, 2]));
    }

    #[test]
    fn test_number_field_default_bounds() {
        let n = NumberFieldSpec::new("bar", "Bar", ValueType::Integer);
        assert_eq!((n.min, n.max, n.step), (0.0, 100.0, 1.0));
    }
}
