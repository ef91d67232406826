//! Subcommand implementations and shared file I/O.

pub mod compare;
pub mod instance;
pub mod path;

use serde_json::Value;
use std::path::{Path, PathBuf};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Read and parse a JSON document
fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let value = serde_json::from_str(&text)
        .map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))?;
    Ok(value)
}

/// Pretty-print `value` to `output`, or stdout when absent
fn write_json(value: &Value, output: Option<&PathBuf>) -> CommandResult {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(output_path) => {
            std::fs::write(output_path, format!("{}\n", text))?;
            eprintln!("✓ Wrote {}", output_path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
