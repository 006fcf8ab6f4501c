//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the atask CLI.

use std::path::PathBuf;

use atask_store::SortKey;
use clap::{Parser, Subcommand, ValueEnum};

/// atask - Query markdown task files
#[derive(Parser, Debug)]
#[command(name = "atask")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Notes directory (default: notes_directory from config)
    #[arg(long, global = true, env = "ATASK_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find tasks matching a query
    #[command(alias = "q")]
    Query {
        /// Query expression (e.g., "status:open AND due:soon")
        expr: String,

        /// Sort by field
        #[arg(long, value_enum)]
        sort: Option<SortField>,

        /// Reverse sort order
        #[arg(short, long)]
        reverse: bool,

        /// Show at most this many tasks
        #[arg(long)]
        limit: Option<usize>,

        /// Print the parsed query instead of running it
        #[arg(long)]
        explain: bool,
    },

    /// List tasks (open tasks outside dormant projects by default)
    #[command(alias = "ls")]
    List {
        /// Show every status, including tasks of paused, cancelled or
        /// not yet started projects
        #[arg(short, long)]
        all: bool,

        /// Filter by area
        #[arg(long)]
        area: Option<String>,

        /// Filter by status (replaces the open-only default)
        #[arg(long)]
        status: Option<String>,

        /// Filter by priority (p1, p2, p3)
        #[arg(short, long)]
        priority: Option<String>,

        /// Filter by project (project_id as written in the task)
        #[arg(long)]
        project: Option<String>,

        /// Only overdue tasks
        #[arg(long)]
        overdue: bool,

        /// Only tasks due soon
        #[arg(long)]
        soon: bool,

        /// Search in task content
        #[arg(long)]
        search: Option<String>,

        /// Sort by field
        #[arg(short, long, value_enum)]
        sort: Option<SortField>,

        /// Reverse sort order
        #[arg(short, long)]
        reverse: bool,

        /// Show at most this many tasks
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List projects (active projects by default)
    Projects {
        /// Show projects of every status
        #[arg(short, long)]
        all: bool,

        /// Filter by area
        #[arg(long)]
        area: Option<String>,

        /// Filter by status (replaces the active-only default)
        #[arg(long)]
        status: Option<String>,

        /// Filter by priority (p1, p2, p3)
        #[arg(short, long)]
        priority: Option<String>,

        /// Search in project content
        #[arg(long)]
        search: Option<String>,

        /// Sort by field
        #[arg(short, long, value_enum)]
        sort: Option<SortField>,

        /// Reverse sort order
        #[arg(short, long)]
        reverse: bool,
    },

    /// List the fields a query can use
    Fields,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Sort fields for the query, list and projects commands
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Priority,
    Due,
    Status,
    Id,
    Created,
    Modified,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Priority => SortKey::Priority,
            SortField::Due => SortKey::Due,
            SortField::Status => SortKey::Status,
            SortField::Id => SortKey::Id,
            SortField::Created => SortKey::Created,
            SortField::Modified => SortKey::Modified,
        }
    }
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
