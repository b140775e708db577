//! Expansion of section references into the final source text.

use std::collections::HashSet;

use crate::errors::{Result, WritError};

use super::patterns::Patterns;
use super::section_name::SectionName;
use super::sections::SectionMap;

/// Maximum number of expansion rounds before giving up.
pub const MAX_EXPANSION_DEPTH: usize = 50;

/// Cycle detector over the section reference graph.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    /// Sections currently being walked, outermost first.
    stack: Vec<SectionName>,
    /// Set for O(1) membership checks.
    seen: HashSet<SectionName>,
    /// Sections whose references have been fully walked.
    finished: HashSet<SectionName>,
}

impl CycleDetector {
    /// Creates a new cycle detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a section.
    ///
    /// Returns the cycle, ending with `name`, if `name` is already being walked.
    pub fn enter(&mut self, name: &SectionName) -> std::result::Result<(), Vec<SectionName>> {
        if self.seen.contains(name) {
            let mut cycle = self.stack.clone();
            cycle.push(name.clone());
            return Err(cycle);
        }
        self.seen.insert(name.clone());
        self.stack.push(name.clone());
        Ok(())
    }

    /// Exits the innermost section, marking it finished.
    pub fn exit(&mut self) {
        if let Some(name) = self.stack.pop() {
            self.seen.remove(&name);
            self.finished.insert(name);
        }
    }

    /// Returns true if a section has already been fully walked.
    pub fn is_finished(&self, name: &SectionName) -> bool {
        self.finished.contains(name)
    }
}

/// Prefixes every non-blank line of `text` with `leading`.
pub fn indent(text: &str, leading: &str) -> String {
    if leading.is_empty() {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", leading, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs one expansion round over `text`.
///
/// References to known sections are replaced by the section's text,
/// indented like the reference; all other references are kept verbatim.
pub fn resolve_references(text: &str, patterns: &Patterns, sections: &SectionMap) -> String {
    patterns.replace_references(text, |reference| {
        sections
            .concatenate(reference.name)
            .map(|body| indent(&body, reference.indent))
    })
}

/// Returns true if a section's text is exactly one unindented reference to
/// itself. Expanding such a reference reproduces the line, so the section is
/// a fixed point rather than a growing cycle.
pub fn is_self_reproducing(
    name: &SectionName,
    patterns: &Patterns,
    sections: &SectionMap,
) -> bool {
    let body = match sections.concatenate(name.as_str()) {
        Some(body) if !body.contains('\n') => body,
        _ => return false,
    };
    let reproduces = patterns
        .references(&body)
        .next()
        .map_or(false, |r| r.indent.is_empty() && r.name == name.as_str());
    reproduces
}

/// Finds a reference cycle reachable from `text` that can never converge.
///
/// Self-reproducing sections are treated as leaves; every other cycle keeps
/// changing the text on each round.
pub fn find_cycle(
    text: &str,
    patterns: &Patterns,
    sections: &SectionMap,
) -> Option<Vec<SectionName>> {
    let mut detector = CycleDetector::new();
    patterns
        .references(text)
        .filter_map(|reference| sections.name(reference.name))
        .find_map(|name| walk(name, patterns, sections, &mut detector))
}

fn walk(
    name: &SectionName,
    patterns: &Patterns,
    sections: &SectionMap,
    detector: &mut CycleDetector,
) -> Option<Vec<SectionName>> {
    if detector.is_finished(name) || is_self_reproducing(name, patterns, sections) {
        return None;
    }
    if let Err(cycle) = detector.enter(name) {
        return Some(cycle);
    }

    let body = sections.concatenate(name.as_str()).unwrap_or_default();
    for reference in patterns.references(&body) {
        if let Some(child) = sections.name(reference.name) {
            if let Some(cycle) = walk(child, patterns, sections, detector) {
                return Some(cycle);
            }
        }
    }

    detector.exit();
    None
}

/// Assembles the default section into the final source text.
///
/// Fragments are joined with newlines and expanded round by round until a
/// round changes nothing. Fails with [`WritError::RecursionLimit`] when
/// that does not happen within [`MAX_EXPANSION_DEPTH`] rounds. The result
/// ends with exactly one newline added if it was missing.
pub fn assemble(
    default: &[String],
    patterns: &Patterns,
    sections: &SectionMap,
) -> Result<String> {
    let mut code = default.join("\n");

    // Such a cycle would only grow or oscillate until the round limit.
    if let Some(cycle) = find_cycle(&code, patterns, sections) {
        let path: Vec<&str> = cycle.iter().map(SectionName::as_str).collect();
        tracing::error!("Section reference cycle: {}", path.join(" -> "));
        return Err(WritError::RecursionLimit);
    }

    let mut converged = false;
    for round in 0..MAX_EXPANSION_DEPTH {
        let expanded = resolve_references(&code, patterns, sections);
        if expanded == code {
            tracing::trace!("References converged after {} rounds", round);
            converged = true;
            break;
        }
        code = expanded;
    }

    if !converged {
        return Err(WritError::RecursionLimit);
    }

    if !code.ends_with('\n') {
        code.push('\n');
    }
    Ok(code)
}

/// Lists the distinct names referenced in `text` that no section defines.
pub fn unresolved_references(
    text: &str,
    patterns: &Patterns,
    sections: &SectionMap,
) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for reference in patterns.references(text) {
        if !reference.name.is_empty()
            && !sections.contains(reference.name)
            && !names.iter().any(|n| n == reference.name)
        {
            names.push(reference.name.to_string());
        }
    }
    names
}
