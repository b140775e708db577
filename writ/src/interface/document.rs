//! Document compilation from markdown to source files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::errors::{Result, WritError};
use crate::io::Transaction;
use crate::model::Source;
use crate::readers::tokenize;

use super::context::Context;

/// Markdown suffixes stripped from file names to form output names.
const MARKDOWN_SUFFIXES: &[&str] = &[".md", ".markdown"];

/// A literate document read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path to the markdown file.
    pub path: PathBuf,
    /// Target language identifier taken from the file name.
    pub language: Option<String>,
    /// Markdown text with line endings normalized to `\n`.
    pub text: String,
}

impl Document {
    /// Creates a document from already read text.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let path = path.into();
        Self {
            language: language_of(&path),
            text: text.replace("\r\n", "\n"),
            path,
        }
    }

    /// Loads a document from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(path, &text))
    }

    /// Returns the comment symbol for this document's language.
    pub fn comment_symbol<'c>(&self, config: &'c Config) -> &'c str {
        config.comment_symbol(self.language.as_deref())
    }

    /// Tokenizes and classifies the document.
    pub fn source(&self, config: &Config) -> Result<Source> {
        let mut source = Source::new(self.comment_symbol(config))?;
        for block in tokenize(&self.text) {
            let location = block.location().clone().in_file(&self.path);
            source.push(&block.at(location));
        }
        Ok(source)
    }

    /// Compiles the document into source text.
    ///
    /// References to sections that were never defined are kept and logged.
    pub fn compile(&self, config: &Config) -> Result<String> {
        let source = self.source(config)?;
        let output = source.assemble()?;

        for name in source.unresolved_references(&output) {
            tracing::warn!(
                "{}: reference to undefined section {:?}",
                self.path.display(),
                name
            );
        }
        Ok(output)
    }
}

/// Returns the language identifier of a document: the second-to-last
/// dot-separated component of its file name (`foo.js.md` gives `js`).
pub fn language_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() < 2 {
        return None;
    }
    Some(parts[parts.len() - 2].to_string())
}

/// Returns the output path of a document.
///
/// A trailing `.md` or `.markdown` is stripped from the file name, and the
/// result is placed in `output_dir` or beside the document.
pub fn output_path(path: &Path, output_dir: Option<&Path>) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = MARKDOWN_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .unwrap_or(name.as_str());

    let dir = output_dir.or_else(|| path.parent()).unwrap_or(Path::new(""));
    dir.join(stem)
}

/// Compiles markdown text for a language using the built-in comment table.
pub fn compile(markdown: &str, language: Option<&str>) -> Result<String> {
    let mut source = Source::new(config::comment_symbol(language))?;
    for block in tokenize(&markdown.replace("\r\n", "\n")) {
        source.push(&block);
    }
    source.assemble()
}

/// Outcome of compiling a batch of documents.
#[derive(Debug, Default)]
pub struct Compilation {
    /// Writes for every document that compiled.
    pub transaction: Transaction,
    /// Documents that failed, with their errors.
    pub failures: Vec<(PathBuf, WritError)>,
}

impl Compilation {
    /// Returns true if every document compiled.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compiles each file independently.
///
/// A failing document does not stop the others; its error is recorded
/// instead of a write.
pub fn compile_files(ctx: &Context, files: &[PathBuf]) -> Compilation {
    let mut compilation = Compilation::default();

    for path in files {
        match compile_file(ctx, path) {
            Ok((target, content)) => compilation.transaction.write(target, content),
            Err(e) => {
                tracing::debug!("Failed to compile {}: {}", path.display(), e);
                compilation.failures.push((path.clone(), e));
            }
        }
    }

    compilation
}

fn compile_file(ctx: &Context, path: &Path) -> Result<(PathBuf, String)> {
    let full_path = ctx.resolve_path(path);
    let target = output_path(&full_path, ctx.output_dir());
    if target == full_path {
        return Err(WritError::OutputOverwritesInput(target));
    }

    let document = Document::load(&full_path)?;
    let content = document.compile(&ctx.config)?;
    tracing::info!("Compiled {} -> {}", path.display(), target.display());
    Ok((target, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_language_of() {
        assert_eq!(language_of(Path::new("foo.js.md")), Some("js".to_string()));
        assert_eq!(language_of(Path::new("dir/x.py.markdown")), Some("py".to_string()));
        assert_eq!(language_of(Path::new("README.md")), Some("README".to_string()));
        assert_eq!(language_of(Path::new("Makefile")), None);
    }

    #[test]
    fn test_output_path() {
        assert_eq!(output_path(Path::new("src/foo.js.md"), None), PathBuf::from("src/foo.js"));
        assert_eq!(
            output_path(Path::new("src/foo.c.markdown"), Some(Path::new("out"))),
            PathBuf::from("out/foo.c")
        );
        assert_eq!(output_path(Path::new("foo.js.md"), None), PathBuf::from("foo.js"));
        assert_eq!(output_path(Path::new("foo.txt"), None), PathBuf::from("foo.txt"));
    }

    #[test]
    fn test_compile_example() {
        let markdown = "\
# Example

```
a();
//:: helper
b();
```

## == helper

```
h();
```
";
        assert_eq!(compile(markdown, Some("js")).unwrap(), "a();\nh();\nb();\n");
    }

    #[test]
    fn test_compile_python_comments() {
        let markdown = "\
```
def main():
    #:: body
```

```
#== body

print('hi')
return 0
```
";
        assert_eq!(
            compile(markdown, Some("py")).unwrap(),
            "def main():\n    print('hi')\n    return 0\n"
        );
    }

    #[test]
    fn test_compile_unknown_language_uses_slashes() {
        let markdown = "```\n//:: x\n```\n\n```\n//== x\n\nx();\n```\n";
        assert_eq!(compile(markdown, Some("zig")).unwrap(), "x();\n");
        assert_eq!(compile(markdown, None).unwrap(), "x();\n");
    }

    #[test]
    fn test_compile_ignore_scope() {
        let markdown = "\
## !! Scratch

```
scratch();
```

```
//== helper

never();
```

## Code

```
main();
```
";
        assert_eq!(compile(markdown, Some("js")).unwrap(), "main();\n");
    }

    #[test]
    fn test_compile_heading_with_emphasis() {
        let markdown = "\
```
//:: *init*
s();
```

## == *init*

```
i();
```
";
        assert_eq!(compile(markdown, Some("js")).unwrap(), "i();\ns();\n");
    }

    #[test]
    fn test_compile_recursion_limit() {
        let markdown = "```\n//:: a\n```\n\n## == a\n\n```\n//:: a\n//:: a\n```\n";
        let err = compile(markdown, Some("js")).unwrap_err();
        assert_eq!(err.to_string(), "Recursion limit exceeded");
    }

    #[test]
    fn test_compile_self_reproducing_section() {
        let markdown = "```\n//:: a\n```\n\n## == a\n\n```\n//:: a\n```\n";
        assert_eq!(compile(markdown, Some("js")).unwrap(), "//:: a\n");
    }

    #[test]
    fn test_document_parse_normalizes_crlf() {
        let doc = Document::parse("a.js.md", "```\r\na();\r\n```\r\n");
        assert_eq!(doc.text, "```\na();\n```\n");
        assert_eq!(doc.language.as_deref(), Some("js"));
        assert_eq!(doc.compile(&Config::default()).unwrap(), "a();\n");
    }

    #[test]
    fn test_document_custom_language() {
        let config = Config {
            languages: vec![Language::new("sql", "--").with_identifiers(&["sql"])],
            ..Config::default()
        };
        let doc = Document::parse(
            "q.sql.md",
            "```\n--:: cols\n```\n\n```\n--== cols\n\nselect 1;\n```\n",
        );

        assert_eq!(doc.comment_symbol(&config), "--");
        assert_eq!(doc.compile(&config).unwrap(), "select 1;\n");
    }

    #[test]
    fn test_source_locations_carry_file() {
        let doc = Document::parse("a.js.md", "## == helper\n\n```\nh();\n```\n");
        let source = doc.source(&Config::default()).unwrap();
        assert!(source.sections().contains("helper"));
    }

    #[test]
    fn test_compile_files_isolates_failures() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.js.md"), "```\ngood();\n```\n").unwrap();
        fs::write(
            dir.path().join("bad.js.md"),
            "```\n//:: loop\n```\n\n```\n//== loop\n\n//:: loop\n//:: loop\n```\n",
        )
        .unwrap();

        let ctx = Context::default_for_dir(dir.path().to_path_buf()).unwrap();
        let files = vec![PathBuf::from("bad.js.md"), PathBuf::from("good.js.md")];
        let compilation = compile_files(&ctx, &files);

        assert!(!compilation.is_success());
        assert_eq!(compilation.failures.len(), 1);
        assert_eq!(compilation.failures[0].0, PathBuf::from("bad.js.md"));
        assert!(matches!(compilation.failures[0].1, WritError::RecursionLimit));

        assert_eq!(compilation.transaction.len(), 1);
        compilation.transaction.execute().unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("good.js")).unwrap(),
            "good();\n"
        );
        assert!(!dir.path().join("bad.js").exists());
    }

    #[test]
    fn test_compile_files_into_output_dir() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("build")).unwrap();
        fs::write(dir.path().join("a.py.md"), "```\npass\n```\n").unwrap();

        let ctx = Context::new(
            Config::default(),
            dir.path().to_path_buf(),
            Some(PathBuf::from("build")),
        )
        .unwrap();
        let compilation = compile_files(&ctx, &[PathBuf::from("a.py.md")]);

        assert!(compilation.is_success());
        assert_eq!(
            compilation.transaction.describe(),
            vec![format!("write {}", dir.path().join("build/a.py").display())]
        );
    }

    #[test]
    fn test_compile_files_refuses_to_overwrite_input() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "```\nx\n```\n").unwrap();

        let ctx = Context::default_for_dir(dir.path().to_path_buf()).unwrap();
        let compilation = compile_files(&ctx, &[PathBuf::from("notes.txt")]);

        assert!(matches!(
            compilation.failures[0].1,
            WritError::OutputOverwritesInput(_)
        ));
        assert!(compilation.transaction.is_empty());
    }
}
