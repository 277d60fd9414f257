use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single key file import
///
/// Every import ends in exactly one of these; the pipeline never returns an
/// error to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportResult {
    Success,
    /// Source file is missing or cannot be opened
    InvalidInputPath,
    /// At least one line failed validation
    InvalidKeys,
    /// Key file installed, but the staging file could not be removed
    DeletePreviousFailed,
    /// Writing the staging file or installed key file failed
    MoveFailed,
}

impl ImportResult {
    /// Whether the destination key file now holds the imported keys
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Success | Self::DeletePreviousFailed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::InvalidInputPath => "invalid_input_path",
            Self::InvalidKeys => "invalid_keys",
            Self::DeletePreviousFailed => "delete_previous_failed",
            Self::MoveFailed => "move_failed",
        }
    }

    /// Message shown to the user for this outcome
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Keys imported successfully",
            Self::InvalidInputPath => "Key file not found or not readable",
            Self::InvalidKeys => "Key file is corrupt or contains invalid keys",
            Self::DeletePreviousFailed => {
                "Keys imported, but the temporary staging file could not be removed"
            }
            Self::MoveFailed => "Could not write the key file to the key store",
        }
    }
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
