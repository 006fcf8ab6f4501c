//! Task output formatting.

use std::path::Path;

use atask_query::Expr;
use atask_store::{Project, Task};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{
    format_due, format_priority, format_status, format_tags, is_closed, truncate_str,
};

/// JSON output structure for the query command.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub tasks: Vec<TaskOutput<'a>>,
    pub count: usize,
}

/// JSON output structure for a single task.
#[derive(Serialize)]
pub struct TaskOutput<'a> {
    pub id: &'a str,
    pub index_id: Option<i64>,
    pub title: &'a str,
    pub status: &'a str,
    pub priority: &'a str,
    pub due_date: &'a str,
    pub start_date: &'a str,
    pub estimate: Option<i64>,
    pub project_id: &'a str,
    pub project_name: Option<&'a str>,
    pub area: &'a str,
    pub assignee: &'a str,
    pub tags: &'a [String],
    pub path: &'a Path,
}

/// JSON output structure for `query --explain`.
#[derive(Serialize)]
pub struct ExplainOutput<'a> {
    pub query: &'a str,
    pub parsed: String,
    pub fields: Vec<&'static str>,
}

/// Finds the title of the project a task belongs to.
fn project_name<'a>(task: &Task, projects: &'a [Project]) -> Option<&'a str> {
    projects
        .iter()
        .find(|p| p.is_referenced_by(&task.project_id))
        .map(|p| p.title.as_str())
}

/// Formats matched tasks as JSON.
pub fn format_tasks_json(
    tasks: &[&Task],
    projects: &[Project],
) -> Result<String, serde_json::Error> {
    let tasks: Vec<TaskOutput> = tasks
        .iter()
        .map(|task| TaskOutput {
            id: &task.id,
            index_id: task.index_id,
            title: &task.title,
            status: &task.status,
            priority: &task.priority,
            due_date: &task.due_date,
            start_date: &task.start_date,
            estimate: task.estimate,
            project_id: &task.project_id,
            project_name: project_name(task, projects),
            area: &task.area,
            assignee: &task.assignee,
            tags: &task.tags,
            path: &task.path,
        })
        .collect();

    let output = ListOutput {
        count: tasks.len(),
        tasks,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats matched tasks as a table.
pub fn format_tasks_table(
    tasks: &[&Task],
    projects: &[Project],
    today: NaiveDate,
    use_colors: bool,
) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }

    let mut output = String::new();

    // Header
    let header = format!(
        "{:<5} {:<4} {:<12} {:<9} {:<15} {:<15} {}",
        "ID", "Pri", "Due", "Status", "Project", "Tags", "Title"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for task in tasks {
        let id = task.index_id.map(|i| i.to_string()).unwrap_or_default();
        let priority = format_priority(&task.priority, 4, use_colors);
        let closed = is_closed(&task.status);
        let due = format_due(&task.due_date, closed, today, 12, use_colors);
        let status = format_status(&task.status, 9, use_colors);
        let project = project_name(task, projects)
            .map(|name| truncate_str(name, 15))
            .unwrap_or_default();
        let tags = format_tags(&task.tags, 15);

        let line = format!(
            "{:<5} {} {} {} {:<15} {:<15} {}",
            id, priority, due, status, project, tags, task.title
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Formats the parsed form of a query as JSON.
pub fn format_explain_json(query: &str, parsed: &Expr) -> Result<String, serde_json::Error> {
    let mut fields: Vec<&'static str> = parsed
        .comparisons()
        .iter()
        .map(|c| c.field.name)
        .collect();
    fields.sort_unstable();
    fields.dedup();

    let output = ExplainOutput {
        query,
        parsed: parsed.to_string(),
        fields,
    };
    serde_json::to_string_pretty(&output)
}
