//! Datashape CLI
//!
//! Command-line interface over the datashape engine. Every input is a JSON
//! file; results go to stdout or `--output`.

use clap::{Parser, Subcommand, ValueEnum};
use datashape_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "datashape")]
#[command(about = "Datashape - Schema-driven typed data", long_about = None)]
struct Cli {
    /// Log output format (filtered by RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the default instance of a schema
    Default(commands::instance::DefaultArgs),
    /// Decode a data document against a schema
    Decode(commands::instance::DecodeArgs),
    /// Check that a data document fits its schema's declared types
    Check(commands::instance::CheckArgs),
    /// Print the synthesized type of a schema as JSON metadata
    Describe(commands::instance::DescribeArgs),
    /// Read the value at a dotted path
    Get(commands::path::GetArgs),
    /// Write a value at a dotted path
    Set(commands::path::SetArgs),
    /// Remove the value at a dotted path
    Delete(commands::path::DeleteArgs),
    /// List the paths at which a key occurs
    Find(commands::path::FindArgs),
    /// Deep-merge two documents
    Merge(commands::compare::MergeArgs),
    /// Report the differences between two documents
    Diff(commands::compare::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Default(args) => commands::instance::execute_default(args),
        Commands::Decode(args) => commands::instance::execute_decode(args),
        Commands::Check(args) => commands::instance::execute_check(args),
        Commands::Describe(args) => commands::instance::execute_describe(args),
        Commands::Get(args) => commands::path::execute_get(args),
        Commands::Set(args) => commands::path::execute_set(args),
        Commands::Delete(args) => commands::path::execute_delete(args),
        Commands::Find(args) => commands::path::execute_find(args),
        Commands::Merge(args) => commands::compare::execute_merge(args),
        Commands::Diff(args) => commands::compare::execute_diff(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
