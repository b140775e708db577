//! Writ - Literate Source Compiler
//!
//! This library compiles literate markdown documents into source files.
//! Code blocks are routed into named sections by heading and inline markers,
//! and section references written as comments are expanded in place.
//!
//! # Markers
//!
//! With `//` as the comment symbol:
//!
//! - `## == name` heading: following code blocks go to section `name`
//! - `## !! label` heading: following code blocks are dropped
//! - `//== name` as the first line of a block: the rest goes to `name`
//! - `//!! label` as the first line of a block: the block is dropped
//! - `//:: name` on its own line: replaced by the text of section `name`
//!
//! # Example
//!
//! ```no_run
//! use writ::interface::{compile_files, Context};
//!
//! let ctx = Context::from_current_dir().unwrap();
//! let files = ctx.resolve_inputs(&["*.md".to_string()]).unwrap();
//! let compilation = compile_files(&ctx, &files);
//! compilation.transaction.execute().unwrap();
//! ```

pub mod config;
pub mod errors;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod text_location;

// Re-export commonly used types
pub use config::Config;
pub use errors::{Result, WritError};
pub use interface::{compile, Context, Document};
pub use model::{SectionMap, SectionName, Source};
pub use readers::{tokenize, Block};
