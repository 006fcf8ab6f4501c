//! Notes directory scanning.
//!
//! Tasks and projects live as markdown files with YAML frontmatter in a
//! single flat directory. The store lists that directory, keeps the files
//! whose frontmatter (or filename, or tags) marks them as the requested
//! kind, and parses them. Files that fail to parse do not abort the scan:
//! they are reported back as [`Warning`]s alongside the records that loaded.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{Result, StoreError};
use crate::frontmatter::{self, FrontmatterError};
use crate::task::{filename_keywords, Header, Project, Record, Task};

/// File extension of note files.
const NOTE_EXTENSION: &str = "md";

/// A file that was skipped during a scan.
#[derive(Debug)]
pub struct Warning {
    /// Why the file was skipped.
    pub error: StoreError,
}

impl Warning {
    /// Returns the skipped file.
    pub fn path(&self) -> &Path {
        self.error.path()
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped: {}", self.error)
    }
}

/// The result of scanning for one kind of record.
#[derive(Debug)]
pub struct Scan<T> {
    /// Records that loaded, in filename order.
    pub records: Vec<T>,
    /// Files of the requested kind that could not be loaded.
    pub warnings: Vec<Warning>,
    /// Number of markdown files examined.
    pub scanned: usize,
}

impl<T> Default for Scan<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            warnings: Vec::new(),
            scanned: 0,
        }
    }
}

/// Read-only access to the task and project files in a notes directory.
///
/// # Example
///
/// ```no_run
/// use atask_store::TaskStore;
///
/// let store = TaskStore::new("/home/me/notes");
/// let scan = store.find_tasks()?;
/// for warning in &scan.warnings {
///     eprintln!("{warning}");
/// }
/// println!("{} tasks", scan.records.len());
/// # Ok::<(), atask_store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TaskStore {
    dir: PathBuf,
}

impl TaskStore {
    /// Creates a store over `dir`. Nothing is read until a scan.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Loads every task file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DirectoryNotFound` if the directory is missing
    /// and `StoreError::ReadDir` if it cannot be listed. Problems with
    /// individual files are returned as warnings instead.
    pub fn find_tasks(&self) -> Result<Scan<Task>> {
        self.load()
    }

    /// Loads every project file.
    ///
    /// # Errors
    ///
    /// Same as [`find_tasks`](Self::find_tasks).
    pub fn find_projects(&self) -> Result<Scan<Project>> {
        self.load()
    }

    fn load<T: Record>(&self) -> Result<Scan<T>> {
        let paths = self.note_files()?;
        let mut scan = Scan {
            scanned: paths.len(),
            ..Scan::default()
        };

        for path in paths {
            match load_file::<T>(&path) {
                Ok(Some(record)) => scan.records.push(record),
                Ok(None) => {}
                Err(error) => scan.warnings.push(Warning { error }),
            }
        }

        Ok(scan)
    }

    /// Lists markdown files directly inside the directory, sorted by name.
    fn note_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(StoreError::DirectoryNotFound {
                path: self.dir.clone(),
            });
        }

        let read_dir_error = |source| StoreError::ReadDir {
            path: self.dir.clone(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(read_dir_error)? {
            let entry = entry.map_err(read_dir_error)?;
            let path = entry.path();
            let is_note = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(NOTE_EXTENSION));
            if is_note && path.is_file() {
                paths.push(path);
            }
        }

        paths.sort();
        Ok(paths)
    }
}

/// Loads one file as a `T`.
///
/// Returns `Ok(None)` for files of another kind. A file that claims to be a
/// `T` but cannot be parsed is an error.
fn load_file<T: Record>(path: &Path) -> Result<Option<T>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let text = fs::read_to_string(path).map_err(|source| StoreError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let split = match frontmatter::split(&text) {
        Ok(split) => split,
        Err(FrontmatterError::Missing)
            if !filename_keywords(&file_name).contains(&T::KIND.as_str()) =>
        {
            return Ok(None);
        }
        Err(e) => {
            return Err(StoreError::Frontmatter {
                path: path.to_path_buf(),
                reason: e.reason(),
            })
        }
    };

    let yaml_error = |source| StoreError::Yaml {
        path: path.to_path_buf(),
        source,
    };

    // An empty block is an empty mapping
    let yaml = if split.yaml.trim().is_empty() {
        "{}"
    } else {
        split.yaml
    };

    let header: Header = serde_yaml::from_str(yaml).map_err(yaml_error)?;
    if header.classify(&file_name) != Some(T::KIND) {
        return Ok(None);
    }

    let mut record: T = serde_yaml::from_str(yaml).map_err(yaml_error)?;

    record.finish(path.to_path_buf(), split.body.to_string(), modified_time(path));
    Ok(Some(record))
}

fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}
