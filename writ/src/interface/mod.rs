//! High-level interface for compiling documents.

mod context;
mod document;

pub use context::Context;
pub use document::{compile, compile_files, language_of, output_path, Compilation, Document};
