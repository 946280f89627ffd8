//! Error types for msa2gfa

use thiserror::Error;

/// Result type alias for msa2gfa operations
pub type Result<T> = std::result::Result<T, Msa2GfaError>;

/// Main error type for msa2gfa
#[derive(Error, Debug)]
pub enum Msa2GfaError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found errors
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// FASTA header line without a usable sequence name
    #[error("Malformed FASTA header at line {line}: {message}")]
    MalformedHeader { line: usize, message: String },

    /// Sequence data that cannot be attributed or used
    ///
    /// `line` is 0 when the sequence was not read from a file.
    #[error("Malformed sequence at line {line}: {message}")]
    MalformedSequence { line: usize, message: String },

    /// The same sequence name appears twice in one alignment
    #[error("Duplicate sequence name: {name}")]
    DuplicateSequence { name: String },

    /// Aligned sequences must all have the same length
    #[error("Sequence '{name}' has length {found}, expected {expected}")]
    UnequalLengths {
        name: String,
        expected: usize,
        found: usize,
    },

    /// No sequences, or sequences without any aligned column
    #[error("Empty alignment: {0}")]
    EmptyAlignment(String),

    /// A batch list entry that cannot be read
    #[error("List entry at line {line} ({path}): {message}")]
    ListEntry {
        line: usize,
        path: String,
        message: String,
    },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for Msa2GfaError {
    fn from(err: serde_json::Error) -> Self {
        Msa2GfaError::Serialization(err.to_string())
    }
}
