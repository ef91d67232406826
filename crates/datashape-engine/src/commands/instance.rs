//! Schema-driven handlers: default construction, decoding, checking and
//! type metadata.

use super::finish;
use datashape_core::decode::DecodeOptions;
use datashape_core::errors::Result;
use datashape_core::log_op_start;
use datashape_core::meta::record_meta;
use datashape_core::shape::schema_from_document;
use datashape_core::synth::SynthesizedType;
use datashape_core::value::Instance;
use serde_json::Value;

/// Parse a schema document and synthesize its record type
///
/// # Errors
///
/// Shape errors from the document codec or the synthesizer.
pub fn load_schema(schema_doc: &Value) -> Result<SynthesizedType> {
    let group = schema_from_document(schema_doc)?;
    let ty = SynthesizedType::new(group)?;
    tracing::debug!(
        type_name = ty.record().name(),
        registry_len = ty.registry().len(),
        "schema loaded"
    );
    Ok(ty)
}

/// Build the fully populated default instance for a schema document
///
/// `input` seeds leaf values; see
/// [`datashape_core::defaults::build_default`].
///
/// # Errors
///
/// Shape errors while loading the schema, plus every error the default
/// builder reports.
pub fn default_instance(schema_doc: &Value, input: Option<&Value>) -> Result<Instance> {
    log_op_start!("default_instance", seeded = input.is_some());
    finish("default_instance", || {
        load_schema(schema_doc)?.build_default(input)
    })
}

/// Decode untyped data against a schema document
///
/// # Errors
///
/// Shape errors while loading the schema, plus every decoder error.
pub fn decode_instance(schema_doc: &Value, data: &Value, strict: bool) -> Result<Instance> {
    log_op_start!("decode_instance", strict = strict);
    finish("decode_instance", || {
        let options = DecodeOptions { strict };
        load_schema(schema_doc)?.decode(data, options)
    })
}

/// Decode leniently, then verify every member holds its declared shape
///
/// Returns the name of the checked record type.
///
/// # Errors
///
/// Decoder errors, then `TypeMismatch` for the first member whose value does
/// not fit its declared shape.
pub fn check_instance(schema_doc: &Value, data: &Value) -> Result<String> {
    log_op_start!("check_instance");
    finish("check_instance", || {
        let ty = load_schema(schema_doc)?;
        let instance = ty.decode(data, DecodeOptions::default())?;
        ty.record().check(&instance)?;
        Ok(ty.record().name().to_string())
    })
}

/// Render the synthesized root type of a schema document as JSON metadata
///
/// # Errors
///
/// Shape errors while loading the schema, or a failing member default.
pub fn describe_schema(schema_doc: &Value) -> Result<Value> {
    log_op_start!("describe_schema");
    finish("describe_schema", || record_meta(load_schema(schema_doc)?.record()))
}
