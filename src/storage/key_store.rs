//! The private directory holding installed key files

use crate::domain::{DomainError, DomainResult, InstalledKey, KeyType};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to the destination file name for the staging file
pub const STAGING_SUFFIX: &str = ".tmp";

/// Application-owned key store: at most one installed file per [`KeyType`]
#[derive(Debug, Clone)]
pub struct KeyStore {
    root: PathBuf,
}

impl KeyStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the installed key file for `key_type`
    pub fn destination(&self, key_type: KeyType) -> PathBuf {
        self.root.join(key_type.file_name())
    }

    /// Path of the staging file used while importing `key_type`
    pub fn staging(&self, key_type: KeyType) -> PathBuf {
        self.root
            .join(format!("{}{}", key_type.file_name(), STAGING_SUFFIX))
    }

    /// Create the store directory if needed, restricted to the owner on Unix
    pub fn ensure_exists(&self) -> DomainResult<()> {
        let unavailable = |source| DomainError::KeyStoreUnavailable {
            path: self.root.clone(),
            source,
        };

        if !self.root.is_dir() {
            fs::create_dir_all(&self.root).map_err(unavailable)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&self.root, fs::Permissions::from_mode(0o700))
                    .map_err(unavailable)?;
            }
        }

        Ok(())
    }

    pub fn is_installed(&self, key_type: KeyType) -> bool {
        self.destination(key_type).is_file()
    }

    /// List installed key files with the number of entries in each
    pub fn installed(&self) -> DomainResult<Vec<InstalledKey>> {
        let mut installed = Vec::new();

        for key_type in KeyType::ALL {
            let path = self.destination(key_type);
            if !path.is_file() {
                continue;
            }

            let contents = fs::read_to_string(&path)?;
            let entries = contents
                .lines()
                .filter(|line| line.contains('='))
                .count();

            installed.push(InstalledKey {
                key_type,
                path,
                entries,
            });
        }

        Ok(installed)
    }
}
