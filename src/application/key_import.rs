//! Validating, crash-safe import of key files into the key store
//!
//! A file is validated into a staging file next to its destination and only
//! installed once every line has passed. A rejected file never touches the
//! previously installed key file.

use crate::domain::{ImportResult, KeyType};
use crate::storage::key_writer::{self, KeyWriter};
use crate::storage::{KeyReader, KeyStore, StageError, StageOutcome};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Outcome of importing one file found during a directory scan
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub path: PathBuf,
    pub key_type: KeyType,
    pub result: ImportResult,
}

/// Imports key files into a [`KeyStore`]
///
/// Imports of the same key type share a staging file and must not run
/// concurrently.
pub struct KeyImporter {
    store: KeyStore,
}

impl KeyImporter {
    pub fn new(store: KeyStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &KeyStore {
        &self.store
    }

    /// Import every recognized key file directly inside `source_dir`.
    ///
    /// Subdirectories and files whose name is not a key file name are
    /// skipped. A missing or unreadable directory yields no outcomes.
    pub fn import_from_location(&self, source_dir: &Path) -> Vec<ImportOutcome> {
        let entries = match fs::read_dir(source_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot list {}: {}", source_dir.display(), e);
                return Vec::new();
            }
        };

        let mut candidates: Vec<(PathBuf, KeyType)> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| !path.is_dir())
            .filter_map(|path| {
                let key_type = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .and_then(KeyType::classify);
                if key_type.is_none() {
                    debug!("Skipping {}", path.display());
                }
                key_type.map(|kt| (path, kt))
            })
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(&b.0));

        candidates
            .into_iter()
            .map(|(path, key_type)| {
                let result = self.import(&path, key_type);
                ImportOutcome {
                    path,
                    key_type,
                    result,
                }
            })
            .collect()
    }

    /// Install the bundled fallback copy of `key_type` from `bundled_dir`
    pub fn install_bundled(&self, bundled_dir: &Path, key_type: KeyType) -> ImportResult {
        let source = bundled_dir.join(key_type.file_name());
        self.import(&source, key_type)
    }

    /// Validate `file` as a `key_type` key file and install it.
    pub fn import(&self, file: &Path, key_type: KeyType) -> ImportResult {
        info!("Parsing {} {}", key_type, file.display());

        if !file.is_file() {
            warn!("Key file not found: {}", file.display());
            return ImportResult::InvalidInputPath;
        }

        let source = match File::open(file) {
            Ok(f) => BufReader::new(f),
            Err(e) => {
                warn!("Cannot open {}: {}", file.display(), e);
                return ImportResult::InvalidInputPath;
            }
        };

        if let Err(e) = self.store.ensure_exists() {
            error!("{}", e);
            return ImportResult::MoveFailed;
        }

        let staging = self.store.staging(key_type);
        let destination = self.store.destination(key_type);

        // Creating the staging file truncates it, so it cannot also be the source
        if same_file(file, &staging) {
            warn!("Refusing to import from staging file {}", file.display());
            return ImportResult::InvalidInputPath;
        }

        let mut writer = match KeyWriter::create(&staging) {
            Ok(writer) => writer,
            Err(e) => {
                error!("Cannot create staging file {}: {}", staging.display(), e);
                return ImportResult::MoveFailed;
            }
        };

        let staged = KeyReader::stage(source, key_type, &mut writer);
        let entries = match staged {
            Ok(StageOutcome::Valid { entries }) => entries,
            Ok(StageOutcome::Invalid { line, reason }) => {
                drop(writer);
                warn!("Rejecting {}: line {}: {}", file.display(), line, reason);
                discard_staging(&staging);
                return ImportResult::InvalidKeys;
            }
            Err(StageError::Read(e)) => {
                drop(writer);
                warn!("Cannot read {}: {}", file.display(), e);
                discard_staging(&staging);
                return ImportResult::InvalidInputPath;
            }
            Err(e @ StageError::Write(_)) => {
                drop(writer);
                error!("{}", e);
                discard_staging(&staging);
                return ImportResult::MoveFailed;
            }
        };

        if let Err(e) = writer.finish() {
            error!("Cannot flush staging file {}: {}", staging.display(), e);
            discard_staging(&staging);
            return ImportResult::MoveFailed;
        }

        if let Err(e) = key_writer::install(&staging, &destination) {
            error!("Cannot install {}: {}", destination.display(), e);
            discard_staging(&staging);
            return ImportResult::MoveFailed;
        }

        info!(
            "Installed {} entries of {} into {}",
            entries,
            key_type,
            destination.display()
        );

        remove_staging(&staging)
    }
}

/// True if both paths resolve to the same existing file, links included
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Remove the staging file after a successful install
fn remove_staging(staging: &Path) -> ImportResult {
    match fs::remove_file(staging) {
        Ok(()) => ImportResult::Success,
        Err(e) => {
            warn!("Cannot remove staging file {}: {}", staging.display(), e);
            ImportResult::DeletePreviousFailed
        }
    }
}

/// Best-effort removal of a staging file that was never installed
fn discard_staging(staging: &Path) {
    if let Err(e) = fs::remove_file(staging) {
        warn!("Cannot remove staging file {}: {}", staging.display(), e);
    }
}
