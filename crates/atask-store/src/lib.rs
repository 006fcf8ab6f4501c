//! Read-only access to atask task and project files.
//!
//! Records are markdown files with YAML frontmatter kept in one notes
//! directory. [`TaskStore`] scans the directory and parses [`Task`] and
//! [`Project`] records; [`Task`] implements [`atask_query::RecordView`] so
//! it can be filtered with a parsed query, and [`sort_records`] orders the
//! results.
//!
//! # Example
//!
//! ```no_run
//! use atask_query::{parse, EvalConfig, QueryEvaluator};
//! use atask_store::{sort_records, SortKey, TaskStore};
//!
//! let expr = parse("status:open AND due:soon")?;
//! let config = EvalConfig::default();
//! let scan = TaskStore::new("/home/me/notes").find_tasks()?;
//!
//! let mut hits = QueryEvaluator::new(&expr, &config).filter_records(&scan.records);
//! sort_records(&mut hits, SortKey::Due, false);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod frontmatter;
mod sort;
mod store;
mod task;

pub use error::{Result, StoreError};
pub use sort::{sort_records, SortKey, Sortable};
pub use store::{Scan, TaskStore, Warning};
pub use task::{Project, Record, RecordKind, Task, PROJECT_STATUS_ACTIVE, TASK_STATUS_OPEN};
