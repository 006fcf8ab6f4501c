//! Output formatting utilities for the atask CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`tasks`] - Query and list results, `--explain` output
//! - [`projects`] - Project listing with task counts
//! - [`fields`] - The field registry listing
//! - [`helpers`] - Common formatting utilities (truncation, priority, due dates)

mod fields;
pub mod helpers;
mod projects;
mod tasks;

pub use fields::{format_fields_json, format_fields_table};
pub use projects::{format_projects_json, format_projects_table};
pub use tasks::{format_explain_json, format_tasks_json, format_tasks_table};
