//! Compile command implementation.

use writ::errors::Result;
use writ::interface::{compile_files, Context};

/// Options for the compile command.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Glob patterns selecting the documents to compile.
    pub globs: Vec<String>,
    /// Dry run - show what would be written without writing it.
    pub dry_run: bool,
}

/// Summary of a compile run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Files written (or that would be written in a dry run).
    pub written: usize,
    /// Documents that failed to compile.
    pub failed: usize,
}

impl CompileReport {
    /// Returns true if every document compiled.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Executes the compile command.
///
/// Configuration problems are returned as errors before anything is
/// compiled. Per-document failures are printed and counted; the remaining
/// documents are still written.
pub fn compile(ctx: &Context, options: CompileOptions) -> Result<CompileReport> {
    let files = ctx.resolve_inputs(&options.globs)?;
    tracing::debug!("Compiling {} documents", files.len());

    let compilation = compile_files(ctx, &files);
    if !compilation.is_success() {
        for (path, error) in &compilation.failures {
            eprintln!("{}: {}", path.display(), error);
        }
    }

    let transaction = compilation.transaction;
    let report = CompileReport {
        written: transaction.len(),
        failed: compilation.failures.len(),
    };

    if options.dry_run {
        println!("Would perform {} actions:", transaction.len());
        for desc in transaction.describe() {
            println!("  {}", desc);
        }
        return Ok(report);
    }

    transaction.execute()?;
    Ok(report)
}
