//! List command implementation.
//!
//! Lists tasks through preset filters. Each flag becomes a comparison, the
//! comparisons are joined with AND, and the result is evaluated like any
//! other query. Without `--all` only open tasks outside dormant projects
//! are shown.

use atask_query::{
    lookup, suggest, EvalConfig, Expr, Operator, QueryError, QueryEvaluator, SpecialValue, Value,
};
use atask_store::{Project, SortKey, Task, TASK_STATUS_OPEN};
use chrono::NaiveDate;

use super::config::load_config;
use super::query::{arrange, load_notes, print_tasks, report_matches};
use super::{CommandContext, CommandError, Result};
use crate::cli::SortField;

/// Options for the list command.
#[derive(Debug, Default)]
pub struct ListOptions {
    /// Show every status and tasks of dormant projects.
    pub all: bool,
    /// Area filter.
    pub area: Option<String>,
    /// Status filter; replaces the default open-only filter.
    pub status: Option<String>,
    /// Priority filter.
    pub priority: Option<String>,
    /// Project filter, matched against the task's `project_id`.
    pub project: Option<String>,
    /// Only overdue tasks.
    pub overdue: bool,
    /// Only tasks due within the soon horizon.
    pub soon: bool,
    /// Case-insensitive search in the task body.
    pub search: Option<String>,
    /// Sort field.
    pub sort: Option<SortField>,
    /// Reverse sort order.
    pub reverse: bool,
    /// Maximum number of tasks to show.
    pub limit: Option<usize>,
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if no notes directory is configured or if the
/// directory cannot be read.
pub fn execute(ctx: &CommandContext, opts: &ListOptions) -> Result<()> {
    let config = load_config()?;
    let notes = load_notes(ctx, &config)?;

    let eval_config = EvalConfig::new(config.soon_horizon());
    let filter = build_filter(opts, &notes.projects.records, eval_config.today)?;

    if ctx.verbose {
        match &filter {
            Some(expr) => eprintln!("List query: {expr}"),
            None => eprintln!("List query: all tasks"),
        }
    }

    let tasks = &notes.tasks.records;
    let hits: Vec<&Task> = match &filter {
        Some(expr) => QueryEvaluator::new(expr, &eval_config).par_filter_records(tasks),
        None => tasks.iter().collect(),
    };
    let sort = opts.sort.map(SortKey::from).unwrap_or_default();
    let hits = arrange(hits, sort, opts.reverse, opts.limit);

    if ctx.verbose {
        report_matches(&hits, tasks, sort);
    }

    print_tasks(ctx, &config, eval_config.today, &hits, &notes.projects.records)
}

/// Turns the list flags into a query. Returns `None` when nothing is
/// filtered.
fn build_filter(
    opts: &ListOptions,
    projects: &[Project],
    today: NaiveDate,
) -> Result<Option<Expr>> {
    let mut clauses = Vec::new();

    match &opts.status {
        Some(status) => clauses.push(equals("status", text(status))?),
        None if !opts.all => clauses.push(equals("status", text(TASK_STATUS_OPEN))?),
        None => {}
    }

    if !opts.all {
        for project in projects.iter().filter(|p| p.is_dormant(today)) {
            if let Some(refs) = references(project)? {
                clauses.push(Expr::negate(refs));
            }
        }
    }

    if let Some(area) = &opts.area {
        clauses.push(equals("area", text(area))?);
    }
    if let Some(priority) = &opts.priority {
        clauses.push(equals("priority", text(priority))?);
    }
    if let Some(project) = &opts.project {
        clauses.push(equals("project-id", text(project))?);
    }
    if opts.overdue {
        clauses.push(equals("due-date", Value::Special(SpecialValue::Overdue))?);
    }
    if opts.soon {
        clauses.push(equals("due-date", Value::Special(SpecialValue::Soon))?);
    }
    if let Some(search) = &opts.search {
        clauses.push(equals("content", text(search))?);
    }

    Ok(clauses.into_iter().reduce(Expr::and))
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

/// Builds `field:value` for a registry field.
fn equals(name: &str, value: Value) -> Result<Expr> {
    let field = lookup(name).ok_or_else(|| {
        let err = QueryError::UnknownField {
            field: name.to_string(),
            position: 0,
            suggestion: suggest(name),
        };
        CommandError::query(err, name)
    })?;
    Ok(Expr::comparison(field, Operator::Eq, value))
}

/// Matches tasks whose `project_id` names `project` by entity id or index id.
fn references(project: &Project) -> Result<Option<Expr>> {
    let mut refs = Vec::new();
    if !project.id.trim().is_empty() {
        refs.push(equals("project-id", text(&project.id))?);
    }
    if let Some(index_id) = project.index_id {
        refs.push(equals("project-id", text(&index_id.to_string()))?);
    }
    Ok(refs.into_iter().reduce(Expr::or))
}
