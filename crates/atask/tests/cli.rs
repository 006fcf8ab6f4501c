//! End-to-end tests for the `atask` binary.
//!
//! Each test builds a notes directory in a temp dir and points the binary at
//! it with `--dir`, with `ATASK_CONFIG` aimed at a file inside the same temp
//! dir so the user's real config is never read.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

struct Notes {
    dir: TempDir,
}

impl Notes {
    fn new() -> Self {
        let notes = Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        };
        fs::create_dir(notes.notes_dir()).expect("failed to create notes dir");
        notes
    }

    fn notes_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("notes")
    }

    fn config_path(&self) -> std::path::PathBuf {
        self.dir.path().join("config.toml")
    }

    fn write(&self, name: &str, content: &str) -> &Self {
        fs::write(self.notes_dir().join(name), content).expect("failed to write note");
        self
    }

    fn atask(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_atask"))
            .args(args)
            .env("ATASK_CONFIG", self.config_path())
            .env_remove("ATASK_DIR")
            .output()
            .expect("failed to run atask")
    }

    fn query(&self, args: &[&str]) -> Output {
        let dir = self.notes_dir();
        let mut full = vec!["--dir", path_str(&dir), "--no-color"];
        full.extend_from_slice(args);
        self.atask(&full)
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn titles(output: &Output) -> Vec<String> {
    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    json["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .map(|t| t["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn fixture() -> Notes {
    let notes = Notes::new();
    notes
        .write(
            "20260901T080000--garden__project.md",
            "---\nid: 20260901T080000\ntitle: Garden\nindex_id: 1\ntype: project\n---\n",
        )
        .write(
            "20260910T090000--mow-lawn__task.md",
            "---\nid: 20260910T090000\ntitle: Mow the lawn\nindex_id: 2\ntype: task\n\
             priority: p2\ndue_date: 2000-01-01\nproject_id: 20260901T080000\ntags: [yard]\n---\n",
        )
        .write(
            "20260911T090000--seeds__task.md",
            "---\nid: 20260911T090000\ntitle: Order seeds\nindex_id: 3\ntype: task\n\
             priority: p1\nestimate: 2\nproject_id: \"1\"\n---\n\nHeirloom tomatoes.\n",
        )
        .write(
            "20260912T090000--taxes__task.md",
            "---\nid: 20260912T090000\ntitle: File taxes\nindex_id: 4\ntype: task\n\
             status: done\ndue_date: 2000-04-15\n---\n",
        )
        .write("20260913T090000--broken__task.md", "---\ntitle: [\n---\n");
    notes
}

/// Adds a paused project and a project that has not started yet, each with
/// one open task.
fn with_dormant_projects(notes: Notes) -> Notes {
    notes
        .write(
            "20260902T080000--boat__project.md",
            "---\nid: 20260902T080000\ntitle: Boat\nindex_id: 5\ntype: project\n\
             status: paused\n---\n",
        )
        .write(
            "20260903T080000--orchard__project.md",
            "---\nid: 20260903T080000\ntitle: Orchard\nindex_id: 6\ntype: project\n\
             start_date: 2999-01-01\n---\n",
        )
        .write(
            "20260914T090000--hull__task.md",
            "---\nid: 20260914T090000\ntitle: Paint hull\nindex_id: 7\ntype: task\n\
             project_id: \"5\"\n---\n",
        )
        .write(
            "20260915T090000--trees__task.md",
            "---\nid: 20260915T090000\ntitle: Plant trees\nindex_id: 8\ntype: task\n\
             project_id: 20260903T080000\n---\n",
        );
    notes
}

fn project_titles(output: &Output) -> Vec<String> {
    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    json["projects"]
        .as_array()
        .expect("projects array")
        .iter()
        .map(|p| p["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_query_json_output() {
    let notes = fixture();
    let output = notes.query(&["--json", "query", "status:open", "--sort", "id"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["tasks"][0]["title"], "Mow the lawn");
    assert_eq!(json["tasks"][0]["project_name"], "Garden");
    assert_eq!(json["tasks"][1]["title"], "Order seeds");
    assert_eq!(json["tasks"][1]["project_name"], "Garden");
}

#[test]
fn test_query_table_output() {
    let notes = fixture();
    let output = notes.query(&["query", "tag:yard"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("ID"));
    assert!(lines[1].contains("Garden"));
    assert!(lines[1].ends_with("Mow the lawn"));
}

#[test]
fn test_query_no_matches() {
    let notes = fixture();
    let output = notes.query(&["query", "assignee:nobody"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "No tasks found.\n");
}

#[test]
fn test_overdue_ignores_status() {
    let notes = fixture();

    let output = notes.query(&["--json", "query", "due:overdue", "--sort", "due"]);
    assert_eq!(titles(&output), vec!["Mow the lawn", "File taxes"]);

    let output = notes.query(&["--json", "query", "due:overdue AND NOT status:done"]);
    assert_eq!(titles(&output), vec!["Mow the lawn"]);
}

#[test]
fn test_sort_reverse_and_limit() {
    let notes = fixture();
    let output = notes.query(&[
        "--json",
        "query",
        "index-id>1",
        "--sort",
        "priority",
        "--reverse",
        "--limit",
        "2",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(titles(&output), vec!["File taxes", "Mow the lawn"]);
}

#[test]
fn test_content_search() {
    let notes = fixture();
    let output = notes.query(&["--json", "query", "body:TOMATOES OR estimate>5"]);
    assert_eq!(titles(&output), vec!["Order seeds"]);
}

#[test]
fn test_verbose_reports_skipped_files() {
    let notes = fixture();
    let output = notes.query(&["--verbose", "query", "status:open"]);

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Parsed query: status:open"));
    assert!(err.contains("Scanned 5 files"));
    assert!(err.contains("warning: skipped:"));
    assert_eq!(err.matches("20260913T090000--broken__task.md").count(), 1);
    assert!(err.contains("2 of 3 tasks matched"));
}

#[test]
fn test_quiet_suppresses_table() {
    let notes = fixture();
    let output = notes.query(&["--quiet", "query", "status:open"]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_query_short_reverse() {
    let notes = fixture();
    let output = notes.query(&["--json", "query", "index-id>1", "--sort", "id", "-r"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(titles(&output), vec!["File taxes", "Order seeds", "Mow the lawn"]);
}

#[test]
fn test_query_nesting_too_deep() {
    let notes = fixture();
    let deep = format!("{}status:open{}", "(".repeat(5_000), ")".repeat(5_000));
    let output = notes.query(&["--json", "query", &deep]);

    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], "QUERY_ERROR");
    assert_eq!(json["error"]["position"], 256);
}

#[test]
fn test_list_defaults_to_open_tasks() {
    let notes = fixture();
    let output = notes.query(&["--json", "list", "--sort", "id"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(titles(&output), vec!["Mow the lawn", "Order seeds"]);
}

#[test]
fn test_list_hides_dormant_projects() {
    let notes = with_dormant_projects(fixture());

    let output = notes.query(&["--json", "list", "--sort", "id"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(titles(&output), vec!["Mow the lawn", "Order seeds"]);

    let output = notes.query(&["--json", "list", "--all", "--sort", "id"]);
    assert_eq!(
        titles(&output),
        vec![
            "Mow the lawn",
            "Order seeds",
            "File taxes",
            "Paint hull",
            "Plant trees"
        ]
    );

    let output = notes.query(&["--json", "list", "--status", "done"]);
    assert_eq!(titles(&output), vec!["File taxes"]);
}

#[test]
fn test_list_filters() {
    let notes = fixture();

    let output = notes.query(&["--json", "list", "-p", "p1"]);
    assert_eq!(titles(&output), vec!["Order seeds"]);

    let output = notes.query(&["--json", "list", "--overdue"]);
    assert_eq!(titles(&output), vec!["Mow the lawn"]);

    let output = notes.query(&["--json", "list", "--search", "TOMATOES"]);
    assert_eq!(titles(&output), vec!["Order seeds"]);

    let output = notes.query(&["--json", "list", "--project", "1"]);
    assert_eq!(titles(&output), vec!["Order seeds"]);

    let output = notes.query(&["--json", "list", "--area", "work"]);
    assert!(titles(&output).is_empty());
}

#[test]
fn test_list_verbose_prints_query() {
    let notes = fixture();
    let output = notes.query(&["--verbose", "list", "--overdue"]);

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("List query: (status:open AND due-date:overdue)"));
    assert!(err.contains("1 of 3 tasks matched"));
}

#[test]
fn test_projects_json_counts_tasks() {
    let notes = fixture();
    let output = notes.query(&["--json", "projects"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["projects"][0]["title"], "Garden");
    assert_eq!(json["projects"][0]["task_count"], 2);
}

#[test]
fn test_projects_active_by_default() {
    let notes = with_dormant_projects(fixture());

    let output = notes.query(&["--json", "projects", "--sort", "id"]);
    assert_eq!(project_titles(&output), vec!["Garden", "Orchard"]);

    let output = notes.query(&["--json", "projects", "--all", "--sort", "id"]);
    assert_eq!(project_titles(&output), vec!["Garden", "Boat", "Orchard"]);

    let output = notes.query(&["--json", "projects", "--status", "paused"]);
    assert_eq!(project_titles(&output), vec!["Boat"]);
}

#[test]
fn test_projects_table() {
    let notes = fixture();
    let output = notes.query(&["projects"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("ID"));
    assert!(lines[1].ends_with("Garden"));
}

#[test]
fn test_explain_prints_canonical_query() {
    let notes = Notes::new();
    let output = notes.atask(&["query", "--explain", "status:open AND NOT tag:x OR due:soon"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let first = stdout(&output);
    let canonical = first.trim();
    assert!(!canonical.is_empty());

    // The canonical form parses back to itself.
    let again = notes.atask(&["query", "--explain", canonical]);
    assert_eq!(stdout(&again).trim(), canonical);
}

#[test]
fn test_query_error_shows_caret() {
    let notes = fixture();
    let output = notes.query(&["query", "stauts:open"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("unknown field 'stauts'"));
    assert!(err.contains("did you mean 'status'?"));
    assert!(err.contains("  stauts:open\n  ^"));
}

#[test]
fn test_query_error_json() {
    let notes = fixture();
    let output = notes.query(&["--json", "query", "(status:open"]);

    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], "QUERY_ERROR");
    assert_eq!(json["error"]["position"], 0);
}

#[test]
fn test_missing_notes_directory() {
    let notes = Notes::new();
    let missing = notes.dir.path().join("gone");
    let output = notes.atask(&["--json", "--dir", path_str(&missing), "query", "status:open"]);

    assert_eq!(output.status.code(), Some(3));
    let json: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], "STORE_ERROR");
}

#[test]
fn test_no_notes_directory_configured() {
    let notes = Notes::new();
    let output = notes.atask(&["query", "status:open"]);

    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("No notes directory configured"));
}

#[test]
fn test_config_set_then_query() {
    let notes = fixture();

    let dir = notes.notes_dir();
    let set = notes.atask(&["config", "set", "notes_directory", path_str(&dir)]);
    assert!(set.status.success(), "stderr: {}", stderr(&set));

    let path = notes.atask(&["config", "path"]);
    assert_eq!(stdout(&path).trim(), path_str(&notes.config_path()));

    let output = notes.atask(&["--json", "query", "priority:p1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(titles(&output), vec!["Order seeds"]);
}

#[test]
fn test_blank_notes_directory_counts_as_unset() {
    let notes = fixture();
    fs::write(notes.config_path(), "notes_directory = \"\"\n").unwrap();

    let output = notes.atask(&["query", "status:open"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("No notes directory configured"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let notes = Notes::new();
    let output = notes.atask(&["config", "set", "token", "abc"]);

    assert_eq!(output.status.code(), Some(5));
    assert!(!notes.config_path().exists());
}

#[test]
fn test_fields_json() {
    let notes = Notes::new();
    let output = notes.atask(&["--json", "fields"]);

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    assert!(names.contains(&"status"));
    assert!(names.contains(&"due-date"));
    assert!(names.contains(&"tags"));
}

#[test]
fn test_completions() {
    let notes = Notes::new();
    let output = notes.atask(&["completions", "bash"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("atask"));
}
