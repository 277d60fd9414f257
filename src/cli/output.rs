use skyline_keys::{ImportOutcome, ImportResult, InstalledKey, KeyType};
use serde::Serialize;
use std::path::Path;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// One import result as shown to the user
#[derive(Debug, Serialize)]
pub struct ImportOutput {
    pub file: String,
    pub key_type: String,
    pub result: ImportResult,
    pub message: String,
}

impl ImportOutput {
    pub fn new(file: &Path, key_type: KeyType, result: ImportResult) -> Self {
        Self {
            file: file.display().to_string(),
            key_type: key_type.key_name().to_string(),
            result,
            message: result.message().to_string(),
        }
    }
}

impl From<&ImportOutcome> for ImportOutput {
    fn from(outcome: &ImportOutcome) -> Self {
        Self::new(&outcome.path, outcome.key_type, outcome.result)
    }
}

pub fn print_import_outputs(outputs: &[ImportOutput], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outputs)?);
        }
        OutputFormat::Text => {
            if outputs.is_empty() {
                println!("No key files found");
            }
            for output in outputs {
                let mark = match output.result {
                    ImportResult::Success => "✓",
                    ImportResult::DeletePreviousFailed => "!",
                    _ => "✗",
                };
                println!("{} {} ({}): {}", mark, output.key_type, output.file, output.message);
            }
        }
    }
    Ok(())
}

pub fn print_installed(installed: &[InstalledKey], keys_dir: &Path, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(installed)?);
        }
        OutputFormat::Text => {
            println!("Key store: {}", keys_dir.display());
            for key_type in KeyType::ALL {
                match installed.iter().find(|k| k.key_type == key_type) {
                    Some(key) => println!("  {}: {} entries", key_type.file_name(), key.entries),
                    None => println!("  {}: not installed", key_type.file_name()),
                }
            }
        }
    }
    Ok(())
}
