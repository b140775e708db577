//! Positions of blocks within a markdown document, for diagnostics.

use std::fmt;
use std::path::{Path, PathBuf};

/// A position within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextLocation {
    /// The document path, once known.
    pub filename: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl TextLocation {
    /// Creates a location without a file name.
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            filename: None,
            line,
            column,
        }
    }

    /// Returns this location attributed to `path`.
    pub fn in_file(mut self, path: &Path) -> Self {
        self.filename = Some(path.to_path_buf());
        self
    }
}

impl Default for TextLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(path) => write!(f, "{}:{}:{}", path.display(), self.line, self.column),
            None => write!(f, "line {}:{}", self.line, self.column),
        }
    }
}
