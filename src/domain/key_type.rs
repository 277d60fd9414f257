use super::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Kinds of key file the emulator core consumes
///
/// Serialized under the same short name as [`KeyType::key_name`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Per-title keys, `title.keys`
    #[serde(rename = "title_keys")]
    Title,
    /// Production/master keys, `prod.keys`
    #[serde(rename = "prod_keys")]
    Prod,
}

impl KeyType {
    pub const ALL: [KeyType; 2] = [KeyType::Title, KeyType::Prod];

    /// Canonical short name, e.g. `title_keys`
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::Title => "title_keys",
            Self::Prod => "prod_keys",
        }
    }

    /// File name used both to recognize an input file and to name the
    /// installed copy
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Title => "title.keys",
            Self::Prod => "prod.keys",
        }
    }

    /// Look up a key type by its short name. `title` and `prod` are accepted
    /// as aliases of `title_keys` and `prod_keys`.
    pub fn from_key_name(s: &str) -> DomainResult<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kt| kt.key_name() == wanted || kt.alias() == wanted)
            .ok_or_else(|| DomainError::InvalidKeyType(s.to_string()))
    }

    /// Classify a file by exact file name match, `None` for anything else
    pub fn classify(file_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kt| kt.file_name() == file_name)
    }

    /// Like [`KeyType::classify`], for callers that already expect a key file
    pub fn classify_strict(path: &Path) -> DomainResult<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::classify)
            .ok_or_else(|| DomainError::UnrecognizedKeyFile {
                path: path.to_path_buf(),
            })
    }

    fn alias(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key_name())
    }
}
