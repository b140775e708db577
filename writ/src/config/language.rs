//! Language configuration: which comment symbol delimits markers.

use serde::{Deserialize, Serialize};

/// Comment symbol used when a language is unknown.
pub const DEFAULT_COMMENT: &str = "//";

/// Language configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language identifier, usually the file extension (e.g. "js").
    pub name: String,

    /// Additional identifiers that select this language.
    #[serde(default)]
    pub identifiers: Vec<String>,

    /// Line comment symbol, e.g. "//" or "#".
    pub comment: String,
}

impl Language {
    /// Creates a new Language configuration.
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifiers: Vec::new(),
            comment: comment.into(),
        }
    }

    /// Adds alternative identifiers.
    pub fn with_identifiers(mut self, identifiers: &[&str]) -> Self {
        self.identifiers = identifiers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Checks if this language matches a given identifier.
    pub fn matches(&self, identifier: &str) -> bool {
        self.name == identifier || self.identifiers.iter().any(|id| id == identifier)
    }
}
