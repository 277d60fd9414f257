pub mod key_import;

// Re-export commonly used items
pub use key_import::{ImportOutcome, KeyImporter};
