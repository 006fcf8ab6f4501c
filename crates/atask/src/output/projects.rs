//! Project output formatting.

use std::path::Path;

use atask_store::{Project, Task};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_due, format_priority, format_status, is_closed, truncate_str};

/// JSON output structure for the projects command.
#[derive(Serialize)]
pub struct ProjectsOutput<'a> {
    pub projects: Vec<ProjectOutput<'a>>,
    pub count: usize,
}

/// JSON output structure for a single project.
#[derive(Serialize)]
pub struct ProjectOutput<'a> {
    pub id: &'a str,
    pub index_id: Option<i64>,
    pub title: &'a str,
    pub status: &'a str,
    pub priority: &'a str,
    pub due_date: &'a str,
    pub start_date: &'a str,
    pub area: &'a str,
    pub tags: &'a [String],
    pub task_count: usize,
    pub path: &'a Path,
}

/// Counts the tasks that reference a project.
fn task_count(project: &Project, tasks: &[Task]) -> usize {
    tasks
        .iter()
        .filter(|t| project.is_referenced_by(&t.project_id))
        .count()
}

/// Formats projects as JSON.
pub fn format_projects_json(
    projects: &[&Project],
    tasks: &[Task],
) -> Result<String, serde_json::Error> {
    let projects: Vec<ProjectOutput> = projects
        .iter()
        .map(|p| ProjectOutput {
            id: &p.id,
            index_id: p.index_id,
            title: &p.title,
            status: &p.status,
            priority: &p.priority,
            due_date: &p.due_date,
            start_date: &p.start_date,
            area: &p.area,
            tags: &p.tags,
            task_count: task_count(p, tasks),
            path: &p.path,
        })
        .collect();

    let output = ProjectsOutput {
        count: projects.len(),
        projects,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats projects as a table.
pub fn format_projects_table(
    projects: &[&Project],
    tasks: &[Task],
    today: NaiveDate,
    use_colors: bool,
) -> String {
    if projects.is_empty() {
        return "No projects found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<5} {:<4} {:<12} {:<10} {:<12} {:<5} {}",
        "ID", "Pri", "Due", "Status", "Area", "Tasks", "Title"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for project in projects {
        let id = project.index_id.map(|i| i.to_string()).unwrap_or_default();
        let priority = format_priority(&project.priority, 4, use_colors);
        let closed = is_closed(&project.status);
        let due = format_due(&project.due_date, closed, today, 12, use_colors);
        let status = format_status(&project.status, 10, use_colors);
        let area = truncate_str(&project.area, 12);

        let line = format!(
            "{:<5} {} {} {} {:<12} {:<5} {}",
            id,
            priority,
            due,
            status,
            area,
            task_count(project, tasks),
            project.title
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn sample() -> (Vec<Project>, Vec<Task>) {
        let projects = vec![
            Project {
                id: "20261001T080000".to_string(),
                index_id: Some(1),
                title: "House".to_string(),
                status: "active".to_string(),
                priority: "p1".to_string(),
                area: "home".to_string(),
                path: PathBuf::from("/notes/house.md"),
                ..Project::default()
            },
            Project {
                id: "20261002T080000".to_string(),
                index_id: Some(2),
                title: "Taxes".to_string(),
                status: "completed".to_string(),
                due_date: "2026-04-15".to_string(),
                ..Project::default()
            },
        ];
        let task = |project_id: &str| Task {
            project_id: project_id.to_string(),
            ..Task::default()
        };
        let tasks = vec![task("1"), task("20261001T080000"), task("3"), task("")];
        (projects, tasks)
    }

    #[test]
    fn test_projects_json() {
        let (projects, tasks) = sample();
        let refs: Vec<&Project> = projects.iter().collect();
        let json = format_projects_json(&refs, &tasks).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["projects"][0]["title"], "House");
        assert_eq!(value["projects"][0]["task_count"], 2);
        assert_eq!(value["projects"][0]["path"], "/notes/house.md");
        assert_eq!(value["projects"][1]["task_count"], 0);
        assert_eq!(value["projects"][1]["status"], "completed");
    }

    #[test]
    fn test_projects_table() {
        let (projects, tasks) = sample();
        let refs: Vec<&Project> = projects.iter().collect();
        let table = format_projects_table(&refs, &tasks, today(), false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID    Pri  Due"));
        assert!(lines[1].starts_with("1     p1"));
        assert!(lines[1].contains("active"));
        assert!(lines[1].contains("home"));
        assert!(lines[1].ends_with("2     House"));
        assert!(lines[2].contains("187 days ago"));
        assert!(lines[2].ends_with("0     Taxes"));
    }

    #[test]
    fn test_projects_table_empty() {
        assert_eq!(
            format_projects_table(&[], &[], today(), false),
            "No projects found.\n"
        );
    }
}
