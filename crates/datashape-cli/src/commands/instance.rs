//! Schema commands
//!
//! Usage:
//!   datashape default <SCHEMA> [--input <FILE>] [--output <FILE>]
//!   datashape decode <SCHEMA> <DATA> [--strict] [--output <FILE>]
//!   datashape check <SCHEMA> <DATA>
//!   datashape describe <SCHEMA> [--output <FILE>]

use super::{read_json, write_json, CommandResult};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DefaultArgs {
    /// Schema document (JSON)
    pub schema: PathBuf,

    /// Partial input seeding leaf values (JSON map)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Schema document (JSON)
    pub schema: PathBuf,

    /// Data document to decode (JSON map)
    pub data: PathBuf,

    /// Reject undeclared keys and type-check primitive values
    #[arg(long)]
    pub strict: bool,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Schema document (JSON)
    pub schema: PathBuf,

    /// Data document to check (JSON map)
    pub data: PathBuf,
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// Schema document (JSON)
    pub schema: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute default command
pub fn execute_default(args: DefaultArgs) -> CommandResult {
    let schema = read_json(&args.schema)?;
    let input = args.input.as_deref().map(read_json).transpose()?;

    let instance = datashape_engine::default_instance(&schema, input.as_ref())?;

    write_json(&instance.to_untyped(), args.output.as_ref())
}

/// Execute decode command
///
/// The decoded instance is printed unpacked, so enumeration members appear
/// as their declared values.
pub fn execute_decode(args: DecodeArgs) -> CommandResult {
    let schema = read_json(&args.schema)?;
    let data = read_json(&args.data)?;

    let instance = datashape_engine::decode_instance(&schema, &data, args.strict)?;

    write_json(&instance.to_untyped(), args.output.as_ref())
}

/// Execute check command
pub fn execute_check(args: CheckArgs) -> CommandResult {
    let schema = read_json(&args.schema)?;
    let data = read_json(&args.data)?;

    let type_name = datashape_engine::check_instance(&schema, &data)?;

    println!("✓ {} matches {}", args.data.display(), type_name);
    Ok(())
}

/// Execute describe command
pub fn execute_describe(args: DescribeArgs) -> CommandResult {
    let schema = read_json(&args.schema)?;

    let meta = datashape_engine::describe_schema(&schema)?;

    write_json(&meta, args.output.as_ref())
}
