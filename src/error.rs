//! Error types for Wordex.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WordexError>;

/// Errors raised while validating, indexing, querying or exporting.
#[derive(Debug, Error)]
pub enum WordexError {
    /// Growing the index failed; entries inserted before the failure stay valid.
    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    /// A source file could not be opened.
    #[error("could not open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file has no content.
    #[error("{} is empty", .0.display())]
    EmptyFile(PathBuf),

    /// A source file was already loaded.
    #[error("{} is already loaded", .0.display())]
    DuplicateFile(PathBuf),

    /// A source file does not carry the accepted extension.
    #[error("{} does not have the .{extension} extension", path.display())]
    WrongExtension {
        path: PathBuf,
        extension: String,
    },

    /// No indexed word matched the query.
    #[error("word not found: {0}")]
    WordNotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An export file could not be read back.
    #[error("invalid export record: {0}")]
    InvalidExport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export error: {0}")]
    Csv(#[from] csv::Error),
}

impl WordexError {
    pub fn allocation(msg: impl Into<String>) -> Self {
        WordexError::AllocationFailure(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        WordexError::InvalidConfig(msg.into())
    }

    pub fn invalid_export(msg: impl Into<String>) -> Self {
        WordexError::InvalidExport(msg.into())
    }

    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WordexError::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is the "no match" query outcome rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WordexError::WordNotFound(_))
    }
}

impl From<std::collections::TryReserveError> for WordexError {
    fn from(err: std::collections::TryReserveError) -> Self {
        WordexError::allocation(err.to_string())
    }
}
