//! Command implementations for the atask CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod fields;
pub mod list;
pub mod projects;
pub mod query;

use std::path::PathBuf;

use atask_query::QueryError;
use atask_store::StoreError;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Query parsing error, with the query text it refers to.
    #[error("query error: {source}")]
    Query { source: QueryError, query: String },

    /// Notes directory error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Creates a query error for `query`.
    pub fn query(source: QueryError, query: &str) -> Self {
        CommandError::Query {
            source,
            query: query.to_string(),
        }
    }

    /// Returns the message shown to a terminal user. Query errors echo the
    /// query with a caret under the offending position.
    pub fn render(&self) -> String {
        match self {
            CommandError::Query { source, query } => source.render(query),
            other => format!("Error: {other}"),
        }
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Notes directory given on the command line or via `ATASK_DIR`.
    pub dir: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color,
            quiet: cli.quiet,
            verbose: cli.verbose,
            dir: cli.dir.clone(),
        }
    }
}
