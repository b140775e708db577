//! CLI command implementations.

pub mod compile;

pub use compile::{compile, CompileOptions};
