//! Validating, crash-safe importer for Skyline emulator key files
//!
//! Key files (`title.keys`, `prod.keys`) are checked line by line and only
//! installed into the private key store when every line is valid. Each
//! import reports exactly one [`ImportResult`].

pub mod application;
pub mod config;
pub mod domain;
pub mod storage;

// Re-export commonly used items
pub use application::{ImportOutcome, KeyImporter};
pub use config::Settings;
pub use domain::{DomainError, DomainResult, ImportResult, InstalledKey, KeyEntry, KeyType};
pub use storage::{KeyReader, KeyStore, KeyWriter};
