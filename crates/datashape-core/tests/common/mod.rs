use datashape_core::shape::{
    constant, ChoiceOption, ChoiceSpec, FieldSpec, GroupSpec, ListSpec, NumberFieldSpec, ValueType,
};
use datashape_core::value::Instance;
use serde_json::Value;

/// The "Generated Type" schema: required string, optional choice, defaulted
/// number and two nested groups
#[allow(dead_code)]
pub fn generated_type_schema() -> GroupSpec {
    GroupSpec::new("root", "Generated Type")
        .with_field(
            FieldSpec::new("foo", "Foo", ValueType::String)
                .with_description("Example field description a")
                .with_required(true),
        )
        .with_field(ChoiceSpec::new("sel", "Sel").with_options([
            ChoiceOption::new("a", "A"),
            ChoiceOption::new("b", "B"),
        ]))
        .with_field(
            NumberFieldSpec::from_field(
                FieldSpec::new("bar", "Bar", ValueType::Integer).with_default_value(9.into()),
            )
            .with_bounds(3.0, 33.0, 3.0),
        )
        .with_field(
            GroupSpec::new("main", "Main")
                .with_field(FieldSpec::new("inner", "Inner", ValueType::String)),
        )
        .with_field(
            GroupSpec::new("other", "Other")
                .with_field(FieldSpec::new("inner_b", "InnerB", ValueType::String)),
        )
}

/// A schema where every leaf has a default provider
#[allow(dead_code)]
pub fn fully_defaulted_schema() -> GroupSpec {
    GroupSpec::new("root", "Settings")
        .with_field(
            FieldSpec::new("name", "Name", ValueType::String)
                .with_required(true)
                .with_default(constant("untitled".into())),
        )
        .with_field(
            ChoiceSpec::new("mode", "Mode")
                .with_required(true)
                .with_options([ChoiceOption::new("fast", "Fast"), ChoiceOption::new("safe", "Safe")])
                .with_default(constant("safe".into())),
        )
        .with_field(
            GroupSpec::new("location", "Location")
                .with_required(true)
                .with_field(
                    FieldSpec::new("lat", "Lat", ValueType::Float)
                        .with_required(true)
                        .with_default_value(51.5.into()),
                )
                .with_field(
                    FieldSpec::new("lon", "Lon", ValueType::Float)
                        .with_required(true)
                        .with_default_value((-0.1).into()),
                ),
        )
        .with_field(
            ListSpec::of_field(
                FieldSpec::new("tags", "Tags", ValueType::String)
                    .with_required(true)
                    .with_default_value("tag".into()),
            )
            .with_default_size(2),
        )
        .with_field(
            ListSpec::of_group(
                GroupSpec::new("points", "Point")
                    .with_required(true)
                    .with_field(
                        FieldSpec::new("x", "X", ValueType::Integer)
                            .with_required(true)
                            .with_default_value(0.into()),
                    ),
            )
            .with_default_size(3),
        )
}

/// Shorthand for building instances from `json!` fixtures
#[allow(dead_code)]
pub fn inst(value: Value) -> Instance {
    Instance::from_untyped(&value)
}

/// A schema with an optional nested group that has no default of its own
#[allow(dead_code)]
pub fn optional_group_schema() -> GroupSpec {
    GroupSpec::new("root", "Profile")
        .with_field(FieldSpec::new("name", "Name", ValueType::String).with_default_value("n".into()))
        .with_field(
            GroupSpec::new("extras", "Extras").with_field(
                FieldSpec::new("x", "X", ValueType::Integer).with_default_value(1.into()),
            ),
        )
}
