//! Task and project records as stored in markdown frontmatter.

use std::path::PathBuf;

use atask_query::{parse_record_date, DateField, NumberField, RecordView, StringField};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Default status for tasks without one.
pub const TASK_STATUS_OPEN: &str = "open";

/// Default status for projects without one.
pub const PROJECT_STATUS_ACTIVE: &str = "active";

/// Project statuses that put a project on hold.
const PROJECT_STATUSES_DORMANT: [&str; 2] = ["paused", "cancelled"];

/// The kind of record a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Task,
    Project,
}

impl RecordKind {
    /// Returns the `type` value that marks this kind in frontmatter.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Task => "task",
            RecordKind::Project => "project",
        }
    }
}

/// A task file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Task {
    /// Entity identifier (a Denote-style timestamp such as `20261019T093000`).
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// Short numeric identifier used on the command line.
    #[serde(default)]
    pub index_id: Option<i64>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub priority: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub due_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_date: String,
    /// Day the task was pulled into the today list.
    #[serde(default, deserialize_with = "lenient_string")]
    pub today_date: String,
    #[serde(default)]
    pub estimate: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub area: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub assignee: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recur: String,

    /// Markdown body after the frontmatter.
    #[serde(skip)]
    pub content: String,
    /// File the task was loaded from.
    #[serde(skip)]
    pub path: PathBuf,
    /// File modification time.
    #[serde(skip)]
    pub modified: Option<DateTime<Utc>>,
}

/// A project file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default)]
    pub index_id: Option<i64>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub priority: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub due_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub area: String,

    #[serde(skip)]
    pub content: String,
    #[serde(skip)]
    pub path: PathBuf,
    #[serde(skip)]
    pub modified: Option<DateTime<Utc>>,
}

/// Frontmatter keys needed to decide what a file is.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Header {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
}

impl Header {
    /// Decides the record kind from the `type` key, then the filename's
    /// `__keyword_keyword` segment, then the tags.
    pub(crate) fn classify(&self, file_name: &str) -> Option<RecordKind> {
        let kinds = [RecordKind::Task, RecordKind::Project];

        if !self.kind.trim().is_empty() {
            let kind = self.kind.trim();
            return kinds.into_iter().find(|k| k.as_str() == kind);
        }

        let keywords = filename_keywords(file_name);
        if let Some(kind) = kinds
            .into_iter()
            .find(|k| keywords.iter().any(|kw| *kw == k.as_str()))
        {
            return Some(kind);
        }

        kinds
            .into_iter()
            .find(|k| self.tags.iter().any(|t| t == k.as_str()))
    }
}

/// Returns the keywords in a Denote-style filename
/// (`20261019T093000--title__task_home.md` gives `task` and `home`).
pub(crate) fn filename_keywords(file_name: &str) -> Vec<&str> {
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    match stem.split_once("__") {
        Some((_, keywords)) => keywords.split('_').filter(|k| !k.is_empty()).collect(),
        None => Vec::new(),
    }
}

/// A record type that can be loaded from a markdown file.
pub trait Record: for<'de> Deserialize<'de> {
    /// The kind of file this record is loaded from.
    const KIND: RecordKind;

    /// Fills in the parts that do not come from frontmatter and applies
    /// defaults.
    fn finish(&mut self, path: PathBuf, content: String, modified: Option<DateTime<Utc>>);
}

impl Record for Task {
    const KIND: RecordKind = RecordKind::Task;

    fn finish(&mut self, path: PathBuf, content: String, modified: Option<DateTime<Utc>>) {
        if self.status.trim().is_empty() {
            self.status = TASK_STATUS_OPEN.to_string();
        }
        if self.kind.trim().is_empty() {
            self.kind = RecordKind::Task.as_str().to_string();
        }
        self.path = path;
        self.content = content;
        self.modified = modified;
    }
}

impl Record for Project {
    const KIND: RecordKind = RecordKind::Project;

    fn finish(&mut self, path: PathBuf, content: String, modified: Option<DateTime<Utc>>) {
        if self.status.trim().is_empty() {
            self.status = PROJECT_STATUS_ACTIVE.to_string();
        }
        if self.kind.trim().is_empty() {
            self.kind = RecordKind::Project.as_str().to_string();
        }
        self.path = path;
        self.content = content;
        self.modified = modified;
    }
}

impl Project {
    /// Returns true if the project is paused, cancelled or not yet begun
    /// as of `today`. A malformed start date counts as begun.
    pub fn is_dormant(&self, today: NaiveDate) -> bool {
        PROJECT_STATUSES_DORMANT.contains(&self.status.as_str())
            || parse_record_date(&self.start_date).is_some_and(|start| start > today)
    }

    /// Returns true if a task's `project_id` refers to this project, by
    /// entity id or by index id.
    pub fn is_referenced_by(&self, project_id: &str) -> bool {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return false;
        }
        self.id == project_id
            || self
                .index_id
                .is_some_and(|index| index.to_string() == project_id)
    }
}

impl RecordView for Task {
    fn string(&self, field: StringField) -> &str {
        match field {
            StringField::Status => &self.status,
            StringField::Priority => &self.priority,
            StringField::Area => &self.area,
            StringField::Assignee => &self.assignee,
            StringField::Recur => &self.recur,
            StringField::ProjectId => &self.project_id,
            StringField::Title => &self.title,
            StringField::Content => &self.content,
        }
    }

    fn date(&self, field: DateField) -> &str {
        match field {
            DateField::Due => &self.due_date,
            DateField::Start => &self.start_date,
        }
    }

    fn number(&self, field: NumberField) -> Option<i64> {
        match field {
            NumberField::Estimate => self.estimate,
            NumberField::IndexId => self.index_id,
        }
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Accepts any YAML scalar as a string, `null` as empty.
///
/// Hand-edited frontmatter often carries `project_id: 12` or an unquoted
/// timestamp id.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_yaml::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar value, found {}",
            describe(&other)
        ))),
    }
}

/// Accepts tags as a YAML list or as a single space or comma separated string.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_yaml::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()),
        Some(Value::Sequence(items)) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| match item {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                other => Err(D::Error::custom(format!(
                    "expected a tag, found {}",
                    describe(&other)
                ))),
            })
            .collect(),
        Some(other) => Err(D::Error::custom(format!(
            "expected a list of tags, found {}",
            describe(&other)
        ))),
    }
}

fn describe(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
