//! YAML frontmatter splitting for markdown files.
//!
//! Frontmatter is metadata at the very start of a file, delimited by `---`
//! lines:
//!
//! ```markdown
//! ---
//! title: Call the plumber
//! type: task
//! status: open
//! ---
//!
//! Ask about the water heater too.
//! ```

/// Why a file has no usable frontmatter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterError {
    /// The file does not start with `---`.
    Missing,
    /// The opening `---` is never closed.
    Unterminated,
}

impl FrontmatterError {
    /// Returns a short description of the problem.
    pub fn reason(self) -> &'static str {
        match self {
            FrontmatterError::Missing => "file does not start with a frontmatter block",
            FrontmatterError::Unterminated => "unterminated frontmatter block",
        }
    }
}

/// A file split into its YAML block and markdown body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// The YAML between the delimiters.
    pub yaml: &'a str,
    /// Everything after the closing delimiter, leading blank lines removed.
    pub body: &'a str,
}

/// Splits `content` into frontmatter and body.
///
/// The opening delimiter must be the first line (a byte order mark is
/// ignored) and the closing delimiter must be a line of its own.
pub fn split(content: &str) -> Result<Split<'_>, FrontmatterError> {
    let content = content.trim_start_matches('\u{feff}');

    let mut lines = content.split_inclusive('\n');
    let opening = lines.next().ok_or(FrontmatterError::Missing)?;
    if !is_delimiter(opening) {
        return Err(FrontmatterError::Missing);
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_delimiter(line) {
            let yaml = &content[yaml_start..offset];
            let body = content[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Ok(Split { yaml, body });
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']).trim_end() == "---"
}
