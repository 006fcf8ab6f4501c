//! Projects command implementation.
//!
//! Lists projects with the number of tasks that reference each one.
//! Without `--all` only active projects are shown.

use atask_store::{sort_records, Project, SortKey, PROJECT_STATUS_ACTIVE};
use chrono::Local;

use super::config::load_config;
use super::query::load_notes;
use super::{CommandContext, Result};
use crate::cli::SortField;
use crate::output::{format_projects_json, format_projects_table};

/// Options for the projects command.
#[derive(Debug, Default)]
pub struct ProjectsOptions {
    /// Show projects of every status.
    pub all: bool,
    /// Area filter.
    pub area: Option<String>,
    /// Status filter; replaces the default active-only filter.
    pub status: Option<String>,
    /// Priority filter.
    pub priority: Option<String>,
    /// Case-insensitive search in the project body.
    pub search: Option<String>,
    /// Sort field.
    pub sort: Option<SortField>,
    /// Reverse sort order.
    pub reverse: bool,
}

/// Executes the projects command.
///
/// # Errors
///
/// Returns an error if no notes directory is configured or if the
/// directory cannot be read.
pub fn execute(ctx: &CommandContext, opts: &ProjectsOptions) -> Result<()> {
    let config = load_config()?;
    let notes = load_notes(ctx, &config)?;

    let hits = select_projects(&notes.projects.records, opts);

    if ctx.verbose {
        eprintln!(
            "{} of {} projects matched",
            hits.len(),
            notes.projects.records.len()
        );
    }

    let tasks = &notes.tasks.records;
    if ctx.json_output {
        println!("{}", format_projects_json(&hits, tasks)?);
    } else if !ctx.quiet {
        let use_colors = ctx.use_colors && config.output.color.unwrap_or(true);
        let today = Local::now().date_naive();
        print!("{}", format_projects_table(&hits, tasks, today, use_colors));
    }

    Ok(())
}

/// Filters and sorts projects.
fn select_projects<'a>(projects: &'a [Project], opts: &ProjectsOptions) -> Vec<&'a Project> {
    let search = opts.search.as_deref().map(str::to_lowercase);

    let mut hits: Vec<&Project> = projects
        .iter()
        .filter(|p| match &opts.status {
            Some(status) => p.status == *status,
            None => opts.all || p.status == PROJECT_STATUS_ACTIVE,
        })
        .filter(|p| wanted(opts.area.as_deref(), &p.area))
        .filter(|p| wanted(opts.priority.as_deref(), &p.priority))
        .filter(|p| match &search {
            Some(needle) => p.content.to_lowercase().contains(needle),
            None => true,
        })
        .collect();

    let sort = opts.sort.map(SortKey::from).unwrap_or_default();
    sort_records(&mut hits, sort, opts.reverse);
    hits
}

/// An unset filter accepts every value.
fn wanted(filter: Option<&str>, actual: &str) -> bool {
    filter.map_or(true, |value| value == actual)
}
