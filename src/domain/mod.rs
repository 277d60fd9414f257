pub mod error;
pub mod import_result;
pub mod key_entry;
pub mod key_type;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use import_result::ImportResult;
pub use key_entry::{InstalledKey, KeyEntry};
pub use key_type::KeyType;
