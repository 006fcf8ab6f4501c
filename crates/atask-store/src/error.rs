//! Error types for loading task files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scanning or loading records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The notes directory does not exist or is not a directory.
    #[error("notes directory '{path}' does not exist")]
    DirectoryNotFound {
        /// The configured directory.
        path: PathBuf,
    },

    /// The notes directory could not be listed.
    #[error("failed to read directory '{path}': {source}")]
    ReadDir {
        /// The directory that failed to list.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A file could not be read.
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A file's frontmatter block is missing or malformed.
    #[error("invalid frontmatter in '{path}': {reason}")]
    Frontmatter {
        /// The offending file.
        path: PathBuf,
        /// What is wrong with the block.
        reason: &'static str,
    },

    /// A file's frontmatter is not valid YAML for the record type.
    #[error("failed to parse frontmatter in '{path}': {source}")]
    Yaml {
        /// The offending file.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

impl StoreError {
    /// Returns the file or directory the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            StoreError::DirectoryNotFound { path }
            | StoreError::ReadDir { path, .. }
            | StoreError::ReadFile { path, .. }
            | StoreError::Frontmatter { path, .. }
            | StoreError::Yaml { path, .. } => path,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
