//! Configuration data structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::language::Language;
use crate::errors::{Result, WritError};

/// Main configuration structure for writ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for compiled files. Outputs land beside their sources when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Language configurations (consulted before the built-ins).
    #[serde(default)]
    pub languages: Vec<Language>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a language by identifier, checking custom languages first.
    pub fn find_language(&self, identifier: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|l| l.matches(identifier))
            .or_else(|| super::templates::find_language(identifier))
    }

    /// Resolves the comment symbol for a language identifier, defaulting to `//`.
    pub fn comment_symbol(&self, identifier: Option<&str>) -> &str {
        identifier
            .and_then(|id| self.find_language(id))
            .map(|lang| lang.comment.as_str())
            .unwrap_or(super::language::DEFAULT_COMMENT)
    }

    /// Checks that every custom language has a usable comment symbol.
    pub fn validate(&self) -> Result<()> {
        for lang in &self.languages {
            if lang.comment.trim().is_empty() {
                return Err(WritError::Config(format!(
                    "language '{}' has an empty comment symbol",
                    lang.name
                )));
            }
        }
        Ok(())
    }

    /// Returns the output directory, if configured.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }
}
