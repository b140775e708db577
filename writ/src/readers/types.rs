//! Type definitions for readers.

use crate::text_location::TextLocation;

/// A block produced by the markdown tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A heading with its nesting depth (1 for `#`, 2 for `##`, ...).
    Heading {
        /// Nesting depth.
        depth: u8,
        /// Heading text.
        text: String,
        /// Location in source.
        location: TextLocation,
    },

    /// A fenced or indented code block.
    Code {
        /// Raw text, without the newline before the closing fence.
        text: String,
        /// Location in source.
        location: TextLocation,
    },
}

impl Block {
    /// Creates a heading block.
    pub fn heading(depth: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            depth,
            text: text.into(),
            location: TextLocation::default(),
        }
    }

    /// Creates a code block.
    pub fn code(text: impl Into<String>) -> Self {
        Self::Code {
            text: text.into(),
            location: TextLocation::default(),
        }
    }

    /// Returns the location of this block.
    pub fn location(&self) -> &TextLocation {
        match self {
            Self::Heading { location, .. } => location,
            Self::Code { location, .. } => location,
        }
    }

    /// Returns this block with a different location.
    pub fn at(mut self, new_location: TextLocation) -> Self {
        match &mut self {
            Self::Heading { location, .. } | Self::Code { location, .. } => {
                *location = new_location
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block() {
        let block = Block::code("print('hello')").at(TextLocation::new(10, 1));

        assert!(matches!(&block, Block::Code { text, .. } if text == "print('hello')"));
        assert_eq!(block.location().line, 10);
    }

    #[test]
    fn test_heading_block() {
        let block = Block::heading(2, "== helper");

        assert!(matches!(&block, Block::Heading { depth: 2, .. }));
        assert_eq!(block.location(), &TextLocation::default());
    }
}
