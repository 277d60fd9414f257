use super::key_type::KeyType;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single validated `key=value` line of a key file
///
/// Only exists while a file is being staged. The value is key material and
/// stays wrapped so it never ends up in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct KeyEntry {
    /// Key slot name, trimmed
    pub name: String,
    /// Key material, trimmed
    pub value: SecretString,
}

impl KeyEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: SecretString::new(value.into()),
        }
    }

    /// Normalized `key=value` form written to the installed file, without
    /// the line terminator
    pub fn render(&self) -> String {
        format!("{}={}", self.name, self.value.expose_secret())
    }
}

/// Information about an installed key file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledKey {
    pub key_type: KeyType,
    pub path: PathBuf,
    /// Number of `key=value` lines in the installed file
    pub entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_normalized_line() {
        let entry = KeyEntry::new("master_key_00", "0123abcd");
        assert_eq!(entry.render(), "master_key_00=0123abcd");
    }

    #[test]
    fn test_debug_redacts_value() {
        let entry = KeyEntry::new("header_key", "deadbeefdeadbeef");
        let debug = format!("{:?}", entry);
        assert!(debug.contains("header_key"));
        assert!(!debug.contains("deadbeefdeadbeef"));
    }
}
