//! Line-by-line validation of key files
//!
//! Each non-comment line must be a single `key=value` pair whose fields pass
//! the lexical rules of the file's [`KeyType`]. Validation is all-or-nothing:
//! the first bad line invalidates the whole file.

use crate::domain::{KeyEntry, KeyType};
use crate::storage::key_writer::KeyWriter;
use std::fmt;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Length of both the key and the value of a title key line
pub const TITLE_KEY_LEN: usize = 32;

/// Why a line was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidLine {
    /// Not exactly one `=` separator
    BadSeparator,
    /// Key or value is empty after trimming
    EmptyField,
    BadKey,
    BadValue,
    NotUtf8,
}

impl fmt::Display for InvalidLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::BadSeparator => "expected a single key=value pair",
            Self::EmptyField => "empty key or value",
            Self::BadKey => "malformed key",
            Self::BadValue => "malformed value",
            Self::NotUtf8 => "not valid UTF-8",
        };
        f.write_str(reason)
    }
}

/// Classification of a single line
#[derive(Debug)]
pub enum LineOutcome {
    /// Blank line or `;` comment
    Skip,
    Entry(KeyEntry),
    Invalid(InvalidLine),
}

/// Result of validating and staging a whole file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Valid { entries: usize },
    /// `line` is 1-based
    Invalid { line: usize, reason: InvalidLine },
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error("failed to read key file: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write staging file: {0}")]
    Write(#[source] io::Error),
}

/// Read and validate key files
pub struct KeyReader;

impl KeyReader {
    /// Classify one line of a key file of the given type
    pub fn parse_line(line: &str, key_type: KeyType) -> LineOutcome {
        let line = line.trim_end();
        if line.trim_start().is_empty() || line.starts_with(';') {
            return LineOutcome::Skip;
        }

        let mut fields = line.split('=');
        let (key, value) = match (fields.next(), fields.next(), fields.next()) {
            (Some(key), Some(value), None) => (key.trim(), value.trim()),
            _ => return LineOutcome::Invalid(InvalidLine::BadSeparator),
        };

        if key.is_empty() || value.is_empty() {
            return LineOutcome::Invalid(InvalidLine::EmptyField);
        }

        let (key_ok, value_ok) = match key_type {
            KeyType::Title => (
                Self::is_hex_of_len(key, TITLE_KEY_LEN),
                Self::is_hex_of_len(value, TITLE_KEY_LEN),
            ),
            // Production key slots have variable-length names like
            // `master_key_00`, only the underscore is checked
            KeyType::Prod => (key.contains('_'), Self::is_hex(value)),
        };

        if !key_ok {
            return LineOutcome::Invalid(InvalidLine::BadKey);
        }
        if !value_ok {
            return LineOutcome::Invalid(InvalidLine::BadValue);
        }

        LineOutcome::Entry(KeyEntry::new(key, value))
    }

    /// True if every character is `0-9`, `a-f` or `A-F`
    pub fn is_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_hexdigit())
    }

    fn is_hex_of_len(s: &str, len: usize) -> bool {
        s.len() == len && Self::is_hex(s)
    }

    /// Validate `source` line by line, writing each valid entry to `writer`
    /// in normalized form. Stops at the first invalid line.
    pub fn stage<R: BufRead, W: Write>(
        source: R,
        key_type: KeyType,
        writer: &mut KeyWriter<W>,
    ) -> Result<StageOutcome, StageError> {
        for (index, line) in source.lines().enumerate() {
            let line_no = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    return Ok(StageOutcome::Invalid {
                        line: line_no,
                        reason: InvalidLine::NotUtf8,
                    });
                }
                Err(e) => return Err(StageError::Read(e)),
            };

            match Self::parse_line(&line, key_type) {
                LineOutcome::Skip => {}
                LineOutcome::Entry(entry) => {
                    writer.write_entry(&entry).map_err(StageError::Write)?;
                }
                LineOutcome::Invalid(reason) => {
                    return Ok(StageOutcome::Invalid {
                        line: line_no,
                        reason,
                    });
                }
            }
        }

        Ok(StageOutcome::Valid {
            entries: writer.written(),
        })
    }
}
