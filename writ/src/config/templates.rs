//! Built-in comment-symbol table.

use once_cell::sync::Lazy;

use super::language::{Language, DEFAULT_COMMENT};

/// Built-in language configurations, lazily initialized.
static BUILTIN_LANGUAGES: Lazy<Vec<Language>> = Lazy::new(|| {
    vec![
        // C-style languages
        Language::new("js", "//"),
        Language::new("c", "//").with_identifiers(&["h"]),
        Language::new("cpp", "//"),
        Language::new("cs", "//"),
        Language::new("php", "//"),
        Language::new("m", "//"),
        Language::new("java", "//"),
        Language::new("scala", "//"),
        // Script languages
        Language::new("coffee", "#").with_identifiers(&["litcoffee"]),
        Language::new("ls", "#"),
        Language::new("rb", "#"),
        Language::new("py", "#"),
        // Haskell and Lua
        Language::new("hs", "--"),
        Language::new("lua", "--"),
        // Erlang
        Language::new("erl", "%").with_identifiers(&["hrl"]),
    ]
});

/// Returns the list of built-in language configurations.
pub fn builtin_languages() -> &'static [Language] {
    &BUILTIN_LANGUAGES
}

/// Find a built-in language by name or identifier.
pub fn find_language(identifier: &str) -> Option<&'static Language> {
    builtin_languages()
        .iter()
        .find(|lang| lang.matches(identifier))
}

/// Resolves the comment symbol for a language identifier.
///
/// Unknown or missing identifiers fall back to [`DEFAULT_COMMENT`].
pub fn comment_symbol(identifier: Option<&str>) -> &'static str {
    identifier
        .and_then(find_language)
        .map(|lang| lang.comment.as_str())
        .unwrap_or(DEFAULT_COMMENT)
}
