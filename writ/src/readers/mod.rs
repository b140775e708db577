//! Readers turning markdown into blocks.

mod markdown;
mod types;

pub use markdown::tokenize;
pub use types::Block;
