pub mod key_reader;
pub mod key_store;
pub mod key_writer;

// Re-export commonly used items
pub use key_reader::{InvalidLine, KeyReader, LineOutcome, StageError, StageOutcome};
pub use key_store::KeyStore;
pub use key_writer::KeyWriter;
