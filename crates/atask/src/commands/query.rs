//! Query command implementation.
//!
//! Parses a query, loads tasks from the notes directory and lists the ones
//! that match.

use std::path::{Path, PathBuf};

use atask_query::{parse, EvalConfig, Expr, QueryEvaluator};
use atask_store::{sort_records, Project, Scan, SortKey, Task, TaskStore};
use chrono::NaiveDate;

use super::config::{load_config, Config};
use super::{CommandContext, CommandError, Result};
use crate::cli::SortField;
use crate::output::{format_explain_json, format_tasks_json, format_tasks_table};

/// Options for the query command.
#[derive(Debug)]
pub struct QueryOptions {
    /// Query expression.
    pub expr: String,
    /// Sort field.
    pub sort: Option<SortField>,
    /// Reverse sort order.
    pub reverse: bool,
    /// Maximum number of tasks to show.
    pub limit: Option<usize>,
    /// Print the parsed query instead of running it.
    pub explain: bool,
}

/// Executes the query command.
///
/// # Errors
///
/// Returns an error if the query does not parse, if no notes directory is
/// configured, or if the directory cannot be read.
pub fn execute(ctx: &CommandContext, opts: &QueryOptions) -> Result<()> {
    let expr = parse(&opts.expr).map_err(|e| CommandError::query(e, &opts.expr))?;

    if ctx.verbose {
        eprintln!("Parsed query: {expr}");
    }

    if opts.explain {
        return explain(ctx, &opts.expr, &expr);
    }

    let config = load_config()?;
    let notes = load_notes(ctx, &config)?;

    let eval_config = EvalConfig::new(config.soon_horizon());
    let sort = opts.sort.map(SortKey::from).unwrap_or_default();
    let hits = select_tasks(
        &expr,
        &eval_config,
        &notes.tasks.records,
        sort,
        opts.reverse,
        opts.limit,
    );

    if ctx.verbose {
        report_matches(&hits, &notes.tasks.records, sort);
    }

    print_tasks(ctx, &config, eval_config.today, &hits, &notes.projects.records)
}

/// Prints the canonical form of a parsed query.
fn explain(ctx: &CommandContext, query: &str, expr: &Expr) -> Result<()> {
    if ctx.json_output {
        println!("{}", format_explain_json(query, expr)?);
    } else if !ctx.quiet {
        println!("{expr}");
    }
    Ok(())
}

/// Tasks and projects read from the notes directory.
pub(super) struct Notes {
    pub tasks: Scan<Task>,
    pub projects: Scan<Project>,
}

/// Scans the notes directory. In verbose mode reports what was read and
/// every file that was skipped.
pub(super) fn load_notes(ctx: &CommandContext, config: &Config) -> Result<Notes> {
    let dir = resolve_notes_dir(ctx.dir.as_deref(), config)?;
    let store = TaskStore::new(&dir);

    let tasks = store.find_tasks()?;
    let projects = store.find_projects()?;

    if ctx.verbose {
        eprintln!(
            "Scanned {} files in {}: {} tasks, {} projects",
            tasks.scanned,
            dir.display(),
            tasks.records.len(),
            projects.records.len()
        );
        // A broken file fails both scans; report it once.
        let project_only = projects
            .warnings
            .iter()
            .filter(|w| !tasks.warnings.iter().any(|t| t.path() == w.path()));
        for warning in tasks.warnings.iter().chain(project_only) {
            eprintln!("warning: {warning}");
        }
    }

    Ok(Notes { tasks, projects })
}

/// Picks the notes directory: `--dir` or `ATASK_DIR` first, then the config
/// file.
fn resolve_notes_dir(flag: Option<&Path>, config: &Config) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }

    config.notes_directory().ok_or_else(|| {
        CommandError::Config(
            "No notes directory configured. Pass --dir, set ATASK_DIR, or run \
             'atask config set notes_directory <path>'"
                .to_string(),
        )
    })
}

/// Filters, sorts and limits tasks.
fn select_tasks<'a>(
    expr: &Expr,
    config: &EvalConfig,
    tasks: &'a [Task],
    sort: SortKey,
    reverse: bool,
    limit: Option<usize>,
) -> Vec<&'a Task> {
    let hits = QueryEvaluator::new(expr, config).par_filter_records(tasks);
    arrange(hits, sort, reverse, limit)
}

/// Sorts matched tasks and keeps at most `limit` of them.
pub(super) fn arrange(
    mut hits: Vec<&Task>,
    sort: SortKey,
    reverse: bool,
    limit: Option<usize>,
) -> Vec<&Task> {
    sort_records(&mut hits, sort, reverse);

    if let Some(limit) = limit {
        hits.truncate(limit);
    }

    hits
}

pub(super) fn report_matches(hits: &[&Task], tasks: &[Task], sort: SortKey) {
    eprintln!(
        "{} of {} tasks matched, sorted by {sort}",
        hits.len(),
        tasks.len()
    );
}

/// Prints tasks as JSON, or as a table unless quiet.
pub(super) fn print_tasks(
    ctx: &CommandContext,
    config: &Config,
    today: NaiveDate,
    hits: &[&Task],
    projects: &[Project],
) -> Result<()> {
    if ctx.json_output {
        let output = format_tasks_json(hits, projects)?;
        println!("{output}");
    } else if !ctx.quiet {
        let use_colors = ctx.use_colors && config.output.color.unwrap_or(true);
        let output = format_tasks_table(hits, projects, today, use_colors);
        print!("{output}");
    }

    Ok(())
}
