//! Error types for the writ compiler.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for writ operations.
#[derive(Error, Debug)]
pub enum WritError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("No input globs given")]
    NoInputs,

    #[error("Globs didn't match any source files")]
    NoMatches,

    #[error("Directory does not exist: {0:?}")]
    MissingOutputDir(PathBuf),

    #[error("Recursion limit exceeded")]
    RecursionLimit,

    #[error("Output path {0} would overwrite its own source document")]
    OutputOverwritesInput(PathBuf),
}

impl WritError {
    /// Returns true for errors that abort a batch before any document is compiled.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::TomlParse(_)
                | Self::GlobPattern(_)
                | Self::NoInputs
                | Self::NoMatches
                | Self::MissingOutputDir(_)
        )
    }
}

/// Result type alias for writ operations.
pub type Result<T> = std::result::Result<T, WritError>;
