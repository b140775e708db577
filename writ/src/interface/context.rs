//! Execution context for a compilation batch.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::errors::{Result, WritError};

/// Context for a compilation batch.
///
/// Contains configuration and the directories outputs are resolved against.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// Base directory for globs and relative paths.
    pub base_dir: PathBuf,
    /// Directory for compiled files; outputs land beside their sources when unset.
    pub output_dir: Option<PathBuf>,
}

impl Context {
    /// Creates a new context.
    ///
    /// `output_dir` takes precedence over the configured one. Either must name
    /// an existing directory.
    pub fn new(config: Config, base_dir: PathBuf, output_dir: Option<PathBuf>) -> Result<Self> {
        let requested = output_dir.or_else(|| config.output_dir.clone());

        let output_dir = match requested {
            Some(dir) => {
                let resolved = if dir.is_absolute() {
                    dir.clone()
                } else {
                    base_dir.join(&dir)
                };
                if !resolved.is_dir() {
                    return Err(WritError::MissingOutputDir(dir));
                }
                Some(resolved)
            }
            None => None,
        };

        Ok(Self {
            config,
            base_dir,
            output_dir,
        })
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Result<Self> {
        Self::new(Config::default(), base_dir, None)
    }

    /// Creates a context from the current directory, reading any configuration file.
    pub fn from_current_dir() -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        let config = crate::config::read_config(&base_dir)?;
        Self::new(config, base_dir, None)
    }

    /// Returns the output directory, if any.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Expands input globs into the files to compile.
    ///
    /// Patterns are relative to `base_dir`. Only regular files are kept; the
    /// result is sorted and deduplicated.
    pub fn resolve_inputs(&self, globs: &[String]) -> Result<Vec<PathBuf>> {
        if globs.is_empty() {
            return Err(WritError::NoInputs);
        }

        let mut files = Vec::new();
        for pattern in globs {
            let full_pattern = self.glob_pattern(pattern);
            let matched: Vec<PathBuf> = glob::glob(&full_pattern)?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file())
                .map(|p| {
                    p.strip_prefix(&self.base_dir)
                        .map(|p| p.to_path_buf())
                        .unwrap_or(p)
                })
                .collect();

            tracing::debug!("Glob {} matched {} files", pattern, matched.len());
            files.extend(matched);
        }

        files.sort();
        files.dedup();

        if files.is_empty() {
            return Err(WritError::NoMatches);
        }
        Ok(files)
    }

    /// Anchors a glob pattern at the base directory, escaping the directory
    /// so its own metacharacters match literally.
    fn glob_pattern(&self, pattern: &str) -> String {
        if Path::new(pattern).is_absolute() {
            return pattern.to_string();
        }
        let base = glob::Pattern::escape(&self.base_dir.to_string_lossy());
        Path::new(&base).join(pattern).to_string_lossy().into_owned()
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
