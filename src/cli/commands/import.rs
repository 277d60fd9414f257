use crate::cli::output::{print_import_outputs, ImportOutput, OutputFormat};
use anyhow::{bail, Context, Result};
use clap::Args;
use skyline_keys::{ImportResult, KeyImporter, KeyStore, KeyType, Settings};
use std::path::PathBuf;

#[derive(Args)]
pub struct ImportArgs {
    /// Directory to scan for title.keys / prod.keys
    pub source_dir: PathBuf,
}

#[derive(Args)]
pub struct ImportFileArgs {
    /// Key file to import
    pub file: PathBuf,

    /// Key type (title, prod); inferred from the file name when omitted
    #[arg(long = "type", value_parser = parse_key_type)]
    pub key_type: Option<KeyType>,
}

#[derive(Args)]
pub struct InstallBundledArgs {
    /// Key type (title, prod)
    #[arg(long = "type", value_parser = parse_key_type, default_value = "prod_keys")]
    pub key_type: KeyType,

    /// Directory of bundled key files (overrides store.bundled_dir)
    #[arg(long)]
    pub bundled_dir: Option<PathBuf>,
}

fn parse_key_type(s: &str) -> Result<KeyType, String> {
    KeyType::from_key_name(s).map_err(|e| e.to_string())
}

pub fn handle_import(args: ImportArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    if !args.source_dir.is_dir() {
        bail!("Not a directory: {}", args.source_dir.display());
    }

    let importer = KeyImporter::new(KeyStore::new(&settings.store.keys_dir));
    let outputs: Vec<ImportOutput> = importer
        .import_from_location(&args.source_dir)
        .iter()
        .map(ImportOutput::from)
        .collect();

    print_import_outputs(&outputs, format)?;
    check_results(outputs.iter().map(|o| o.result))
}

pub fn handle_import_file(args: ImportFileArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let key_type = match args.key_type {
        Some(key_type) => key_type,
        None => KeyType::classify_strict(&args.file)
            .context("Pass --type to import a file with a non-standard name")?,
    };

    let importer = KeyImporter::new(KeyStore::new(&settings.store.keys_dir));
    let result = importer.import(&args.file, key_type);

    print_import_outputs(&[ImportOutput::new(&args.file, key_type, result)], format)?;
    check_results([result])
}

pub fn handle_install_bundled(args: InstallBundledArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let bundled_dir = match args.bundled_dir.or_else(|| settings.store.bundled_dir.clone()) {
        Some(dir) => dir,
        None => bail!("No bundled key directory configured; pass --bundled-dir"),
    };

    let importer = KeyImporter::new(KeyStore::new(&settings.store.keys_dir));
    let result = importer.install_bundled(&bundled_dir, args.key_type);

    let source = bundled_dir.join(args.key_type.file_name());
    print_import_outputs(&[ImportOutput::new(&source, args.key_type, result)], format)?;
    check_results([result])
}

/// Fail unless every attempted import ended with its keys installed
fn check_results(results: impl IntoIterator<Item = ImportResult>) -> Result<()> {
    let mut failed = 0;
    for result in results {
        if result == ImportResult::DeletePreviousFailed {
            eprintln!("⚠️  {}", result.message());
        }
        if !result.is_installed() {
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} key file(s) could not be imported", failed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_results() {
        assert!(check_results([ImportResult::Success]).is_ok());
        assert!(check_results([ImportResult::DeletePreviousFailed]).is_ok());
        assert!(check_results(Vec::<ImportResult>::new()).is_ok());
        assert!(check_results([ImportResult::Success, ImportResult::InvalidKeys]).is_err());
        assert!(check_results([ImportResult::MoveFailed]).is_err());
    }

    #[test]
    fn test_parse_key_type() {
        assert_eq!(parse_key_type("title").unwrap(), KeyType::Title);
        assert_eq!(parse_key_type("prod_keys").unwrap(), KeyType::Prod);
        assert!(parse_key_type("dev").is_err());
    }
}
