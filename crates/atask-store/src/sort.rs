//! Deterministic ordering for tasks and projects.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::task::{Project, Task};

/// Order in which query results are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// p1, p2, p3, then anything else; ties by due date.
    Priority,
    /// Earliest due date first, undated last.
    Due,
    /// Lifecycle order of the record's status, then anything else; ties by
    /// priority. Tasks go open, paused, delegated, done, dropped; projects
    /// go active, paused, completed, cancelled.
    Status,
    /// Ascending index id.
    Id,
    /// Ascending entity id, which is the creation timestamp.
    Created,
    /// Most recently modified file first.
    #[default]
    Modified,
}

impl SortKey {
    /// Returns the key's name as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Priority => "priority",
            SortKey::Due => "due",
            SortKey::Status => "status",
            SortKey::Id => "id",
            SortKey::Created => "created",
            SortKey::Modified => "modified",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn priority_rank(priority: &str) -> u8 {
    match priority {
        "p1" => 1,
        "p2" => 2,
        "p3" => 3,
        _ => 4,
    }
}

/// The fields a record is ordered by.
pub trait Sortable {
    fn priority(&self) -> &str;
    fn due_date(&self) -> &str;
    /// Position of the status in the record kind's lifecycle.
    fn status_rank(&self) -> u8;
    fn index_id(&self) -> Option<i64>;
    /// Entity id, which starts with the creation timestamp.
    fn id(&self) -> &str;
    fn modified(&self) -> Option<DateTime<Utc>>;
}

impl Sortable for Task {
    fn priority(&self) -> &str {
        &self.priority
    }

    fn due_date(&self) -> &str {
        &self.due_date
    }

    fn status_rank(&self) -> u8 {
        match self.status.as_str() {
            "open" => 1,
            "paused" => 2,
            "delegated" => 3,
            "done" => 4,
            "dropped" => 5,
            _ => 6,
        }
    }

    fn index_id(&self) -> Option<i64> {
        self.index_id
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }
}

impl Sortable for Project {
    fn priority(&self) -> &str {
        &self.priority
    }

    fn due_date(&self) -> &str {
        &self.due_date
    }

    fn status_rank(&self) -> u8 {
        match self.status.as_str() {
            "active" => 1,
            "paused" => 2,
            "completed" => 3,
            "cancelled" => 4,
            _ => 5,
        }
    }

    fn index_id(&self) -> Option<i64> {
        self.index_id
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }
}

/// Undated tasks sort after dated ones.
fn compare_due(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.cmp(b),
    }
}

/// Sorts records in place. The sort is stable, so records that compare
/// equal keep their scan order. `reverse` flips the final order.
pub fn sort_records<T: Sortable>(records: &mut [&T], key: SortKey, reverse: bool) {
    match key {
        SortKey::Priority => records.sort_by(|a, b| {
            priority_rank(a.priority())
                .cmp(&priority_rank(b.priority()))
                .then_with(|| compare_due(a.due_date(), b.due_date()))
        }),
        SortKey::Due => records.sort_by(|a, b| compare_due(a.due_date(), b.due_date())),
        SortKey::Status => records.sort_by(|a, b| {
            a.status_rank()
                .cmp(&b.status_rank())
                .then_with(|| priority_rank(a.priority()).cmp(&priority_rank(b.priority())))
        }),
        SortKey::Id => records.sort_by_key(|r| r.index_id()),
        SortKey::Created => records.sort_by(|a, b| a.id().cmp(b.id())),
        SortKey::Modified => records.sort_by(|a, b| b.modified().cmp(&a.modified())),
    }

    if reverse {
        records.reverse();
    }
}
