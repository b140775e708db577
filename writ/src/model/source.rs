//! Classification of a document's blocks into sections.

use crate::errors::Result;
use crate::readers::Block;
use crate::text_location::TextLocation;

use super::patterns::{HeadingMarker, Patterns, SectionDefinition};
use super::resolve;
use super::section_name::SectionName;
use super::sections::SectionMap;

/// Heading depth whose markers open and ignore sections.
pub const SECTION_HEADING_DEPTH: u8 = 2;

/// The section receiving code blocks that carry no definition of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OpenSection {
    /// The unnamed section assembled into the output.
    #[default]
    Default,
    /// A named section opened by a `== name` heading.
    Named(SectionName),
}

/// Compilation context for one document.
///
/// Blocks are pushed in document order; the default section is then
/// assembled into the final source text.
#[derive(Debug, Clone)]
pub struct Source {
    patterns: Patterns,
    ignore: bool,
    open: OpenSection,
    default: Vec<String>,
    sections: SectionMap,
}

impl Source {
    /// Creates a context for a language using `comment` as its comment symbol.
    pub fn new(comment: &str) -> Result<Self> {
        Ok(Self::with_patterns(Patterns::new(comment)?))
    }

    /// Creates a context from already compiled patterns.
    pub fn with_patterns(patterns: Patterns) -> Self {
        Self {
            patterns,
            ignore: false,
            open: OpenSection::Default,
            default: Vec::new(),
            sections: SectionMap::new(),
        }
    }

    /// Processes one block.
    pub fn push(&mut self, block: &Block) {
        match block {
            Block::Heading {
                depth,
                text,
                location,
            } => self.heading(*depth, text, location),
            Block::Code { text, location } => self.code_block(text, location),
        }
    }

    /// Processes blocks in order.
    pub fn extend<'b>(&mut self, blocks: impl IntoIterator<Item = &'b Block>) {
        for block in blocks {
            self.push(block);
        }
    }

    fn heading(&mut self, depth: u8, text: &str, location: &TextLocation) {
        self.ignore = false;

        if depth != SECTION_HEADING_DEPTH {
            self.close_section();
            return;
        }

        match self.patterns.heading_marker(text) {
            None => self.close_section(),
            Some(HeadingMarker::Ignore) => {
                tracing::trace!("{}: ignoring code under {:?}", location, text);
                self.ignore = true;
            }
            Some(HeadingMarker::Open(name)) => {
                tracing::trace!("{}: opening section {}", location, name);
                self.sections.open(&name);
                self.open = OpenSection::Named(name);
            }
        }
    }

    fn close_section(&mut self) {
        self.open = OpenSection::Default;
    }

    fn code_block(&mut self, text: &str, location: &TextLocation) {
        if self.ignore {
            tracing::debug!("{}: dropping code block in ignored scope", location);
            return;
        }

        match self.patterns.section_definition(text) {
            None => match &self.open {
                OpenSection::Default => self.default.push(text.to_string()),
                OpenSection::Named(name) => self.sections.append(name, text),
            },
            Some(SectionDefinition::Ignored) => {
                tracing::debug!("{}: dropping ignored code block", location);
            }
            Some(SectionDefinition::Named { name, body }) => {
                tracing::trace!("{}: extending section {}", location, name);
                self.sections.append(&name, body);
            }
        }
    }

    /// Returns the patterns used by this context.
    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    /// Returns the fragments of the default section.
    pub fn default_section(&self) -> &[String] {
        &self.default
    }

    /// Returns the named sections.
    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    /// Returns the section currently receiving unmarked code blocks.
    pub fn open_section(&self) -> &OpenSection {
        &self.open
    }

    /// Returns true while code blocks are being dropped.
    pub fn is_ignoring(&self) -> bool {
        self.ignore
    }

    /// Expands the default section into the final source text.
    pub fn assemble(&self) -> Result<String> {
        resolve::assemble(&self.default, &self.patterns, &self.sections)
    }

    /// Lists names referenced in `text` that no section defines.
    pub fn unresolved_references(&self, text: &str) -> Vec<String> {
        resolve::unresolved_references(text, &self.patterns, &self.sections)
    }
}
