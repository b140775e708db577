//! Marker patterns derived from a language's comment symbol.
//!
//! Three kinds of marker are recognised, written here for `//`:
//!
//! - section definitions opening a code block: `//== name ==//` followed by a
//!   blank line and the section body, or `//!!` to drop the block;
//! - heading markers in a level-2 heading: `== name` opens a section,
//!   `!! label` ignores the code blocks that follow;
//! - references on a line of their own: `//:: name :://`.
//!
//! Whitespace between the comment symbol and the marker is optional, and the
//! closing repeat may be written either way round (`==//` or `// ==`).

use regex::{Captures, Regex};

use super::section_name::SectionName;
use crate::errors::Result;

/// The two-character markers used in headings and section definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `==`: open or define a named section.
    Open,
    /// `!!`: ignore code.
    Ignore,
}

impl Marker {
    /// Returns the literal token for this marker.
    pub fn token(self) -> &'static str {
        match self {
            Marker::Open => "==",
            Marker::Ignore => "!!",
        }
    }
}

/// Outcome of matching a code block against the section-definition pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionDefinition<'t> {
    /// The block defines (or extends) a named section with `body`.
    Named { name: SectionName, body: &'t str },
    /// The block is commentary and must be dropped.
    Ignored,
}

/// Outcome of matching a level-2 heading against the heading-marker pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingMarker {
    /// Following code blocks go to the named section.
    Open(SectionName),
    /// Following code blocks are dropped.
    Ignore,
}

/// A reference found in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'t> {
    /// Leading whitespace of the reference line.
    pub indent: &'t str,
    /// The referenced name, trimmed. May be empty.
    pub name: &'t str,
}

impl<'t> Reference<'t> {
    fn from_captures(caps: &Captures<'t>) -> Self {
        Self {
            indent: caps.name("indent").map_or("", |m| m.as_str()),
            name: caps.name("name").map_or("", |m| m.as_str().trim()),
        }
    }
}

/// Compiled marker patterns for one comment symbol.
#[derive(Debug, Clone)]
pub struct Patterns {
    comment: String,
    section_open: Regex,
    section_ignore: Regex,
    heading_open: Regex,
    heading_ignore: Regex,
    reference: Regex,
}

fn section_pattern(comment: &str, marker: Marker) -> String {
    let m = regex::escape(marker.token());
    format!(
        r"^{c} *{m} *(?P<name>.*?)(?: *(?:{m} *{c}|{c} *{m}) *)?\n\n?(?P<body>(?s:.*))$",
        c = comment,
        m = m
    )
}

fn heading_pattern(marker: Marker) -> String {
    let m = regex::escape(marker.token());
    format!(r"^{m} *(?P<name>.*?)(?: *{m})?$", m = m)
}

fn reference_pattern(comment: &str) -> String {
    format!(
        r"(?m)^(?P<indent>[ \t]*){c} *:: *(?P<name>.*?)(?: *(?::: *{c}|{c} *::))? *$",
        c = comment
    )
}

impl Patterns {
    /// Compiles the patterns for a comment symbol such as `//` or `#`.
    pub fn new(comment: &str) -> Result<Self> {
        let escaped = regex::escape(comment);
        Ok(Self {
            comment: comment.to_string(),
            section_open: Regex::new(&section_pattern(&escaped, Marker::Open))?,
            section_ignore: Regex::new(&section_pattern(&escaped, Marker::Ignore))?,
            heading_open: Regex::new(&heading_pattern(Marker::Open))?,
            heading_ignore: Regex::new(&heading_pattern(Marker::Ignore))?,
            reference: Regex::new(&reference_pattern(&escaped))?,
        })
    }

    /// Returns the comment symbol these patterns were built from.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Matches the start of a code block against the section-definition pattern.
    ///
    /// A `==` definition with a blank name is not a definition.
    pub fn section_definition<'t>(&self, text: &'t str) -> Option<SectionDefinition<'t>> {
        if self.section_ignore.is_match(text) {
            return Some(SectionDefinition::Ignored);
        }
        let caps = self.section_open.captures(text)?;
        let name = SectionName::parse(caps.name("name")?.as_str())?;
        let body = caps.name("body").map_or("", |m| m.as_str());
        Some(SectionDefinition::Named { name, body })
    }

    /// Matches heading text against the heading-marker pattern.
    ///
    /// `!!` ignores whatever its label; a `==` heading with a blank name is
    /// not a marker.
    pub fn heading_marker(&self, text: &str) -> Option<HeadingMarker> {
        if self.heading_ignore.is_match(text) {
            return Some(HeadingMarker::Ignore);
        }
        let caps = self.heading_open.captures(text)?;
        SectionName::parse(caps.name("name")?.as_str()).map(HeadingMarker::Open)
    }

    /// Iterates over every reference in `text`.
    pub fn references<'p, 't>(&'p self, text: &'t str) -> impl Iterator<Item = Reference<'t>> + 'p
    where
        't: 'p,
    {
        self.reference
            .captures_iter(text)
            .map(|caps| Reference::from_captures(&caps))
    }

    /// Replaces every reference for which `replace` returns a value.
    ///
    /// References for which it returns `None` are left untouched.
    pub fn replace_references<F>(&self, text: &str, mut replace: F) -> String
    where
        F: FnMut(&Reference<'_>) -> Option<String>,
    {
        self.reference
            .replace_all(text, |caps: &Captures<'_>| {
                replace(&Reference::from_captures(caps)).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slash() -> Patterns {
        Patterns::new("//").unwrap()
    }

    fn named<'t>(name: &str, body: &'t str) -> SectionDefinition<'t> {
        SectionDefinition::Named {
            name: SectionName::parse(name).unwrap(),
            body,
        }
    }

    #[test]
    fn test_section_definition() {
        let p = slash();
        assert_eq!(
            p.section_definition("//== helper\n\nh();\nmore();"),
            Some(named("helper", "h();\nmore();"))
        );
    }

    #[test]
    fn test_section_definition_closed() {
        let p = slash();
        assert_eq!(
            p.section_definition("//== helper ==//\n\nh();"),
            Some(named("helper", "h();"))
        );
        assert_eq!(
            p.section_definition("// == helper // ==\nh();"),
            Some(named("helper", "h();"))
        );
    }

    #[test]
    fn test_section_definition_single_newline() {
        let p = slash();
        assert_eq!(
            p.section_definition("//== helper\nh();"),
            Some(named("helper", "h();"))
        );
    }

    #[test]
    fn test_section_definition_keeps_extra_blank_lines() {
        let p = slash();
        assert_eq!(
            p.section_definition("//== helper\n\n\nh();"),
            Some(named("helper", "\nh();"))
        );
    }

    #[test]
    fn test_section_definition_ignored() {
        let p = slash();
        assert_eq!(
            p.section_definition("//!! just an example\n\nexample();"),
            Some(SectionDefinition::Ignored)
        );
    }

    #[test]
    fn test_section_definition_requires_line_break() {
        let p = slash();
        assert_eq!(p.section_definition("//== helper"), None);
        assert_eq!(p.section_definition("//==\n\nbody"), None);
    }

    #[test]
    fn test_section_definition_not_at_start() {
        let p = slash();
        assert_eq!(p.section_definition("a();\n//== helper\n\nh();"), None);
        assert_eq!(p.section_definition("plain();"), None);
    }

    #[test]
    fn test_heading_marker() {
        let p = slash();
        assert_eq!(
            p.heading_marker("== helper"),
            Some(HeadingMarker::Open(SectionName::parse("helper").unwrap()))
        );
        assert_eq!(
            p.heading_marker("== helper functions =="),
            Some(HeadingMarker::Open(
                SectionName::parse("helper functions").unwrap()
            ))
        );
        assert_eq!(p.heading_marker("!! scratch !!"), Some(HeadingMarker::Ignore));
        assert_eq!(p.heading_marker("!!"), Some(HeadingMarker::Ignore));
    }

    #[test]
    fn test_heading_without_marker() {
        let p = slash();
        assert_eq!(p.heading_marker("Introduction"), None);
        assert_eq!(p.heading_marker("=="), None);
        assert_eq!(p.heading_marker("== =="), None);
        assert_eq!(p.heading_marker("Intro == helper"), None);
    }

    #[test]
    fn test_references() {
        let p = slash();
        let text = "a();\n    //:: helper\nb();\n//:: other :://";
        let refs: Vec<_> = p.references(text).collect();

        assert_eq!(
            refs,
            vec![
                Reference {
                    indent: "    ",
                    name: "helper"
                },
                Reference {
                    indent: "",
                    name: "other"
                },
            ]
        );
    }

    #[test]
    fn test_reference_must_own_its_line() {
        let p = slash();
        assert_eq!(p.references("call(); //:: helper").count(), 0);
    }

    #[test]
    fn test_replace_references() {
        let p = slash();
        let out = p.replace_references("a\n  //:: x\n//:: y", |r| {
            (r.name == "x").then(|| format!("{}X", r.indent))
        });
        assert_eq!(out, "a\n  X\n//:: y");
    }

    #[test]
    fn test_symbols_are_escaped() {
        let p = Patterns::new("#").unwrap();
        assert_eq!(p.comment(), "#");
        assert_eq!(p.references("#:: setup").count(), 1);
        assert_eq!(p.references("//:: setup").count(), 0);
        assert_eq!(
            p.section_definition("#== setup\n\nimport os"),
            Some(named("setup", "import os"))
        );

        let p = Patterns::new("--").unwrap();
        assert_eq!(p.references("  --:: body ::--").count(), 1);

        let p = Patterns::new("%").unwrap();
        assert_eq!(p.references("%:: exports").count(), 1);
    }
}
