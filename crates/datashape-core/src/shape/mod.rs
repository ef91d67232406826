//! Shape model: the declarative vocabulary for describing a value's structure
//!
//! Specs are assembled once, at configuration time, and are read-only
//! afterwards. [`document`] converts them to and from a JSON rendering.

pub mod document;
pub mod spec;

pub use document::{schema_from_document, schema_to_document, spec_from_document, spec_to_document};
pub use spec::{
    constant, provider, ChoiceOption, ChoiceSpec, DefaultProvider, FieldSpec, GroupSpec, ListItem,
    ListSpec, NumberFieldSpec, Spec, ValueType,
};
