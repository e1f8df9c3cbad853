//! Error types for deck operations

use std::io;
use std::path::PathBuf;

/// Errors that can occur while loading, converting or writing a deck.
///
/// Parsing itself never fails: every input line classifies into some block.
/// The variants below cover format lookup and the I/O boundary.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    /// Format does not support the requested direction
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Source document could not be read
    #[error("Error reading file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output document could not be written
    #[error("Error writing file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
