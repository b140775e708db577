//! Markdown tokenization into headings and code blocks.

use comrak::nodes::{AstNode, NodeHeading, NodeValue, Sourcepos};
use comrak::{parse_document, Arena, Options};

use crate::text_location::TextLocation;

use super::types::Block;

/// Tokenizes markdown into the headings and code blocks it contains.
///
/// Blocks come out in document order, including those nested in lists and
/// block quotes. Everything else is dropped.
pub fn tokenize(input: &str) -> Vec<Block> {
    let arena = Arena::new();
    let options = Options::default();
    let root = parse_document(&arena, input, &options);
    let lines: Vec<&str> = input.lines().collect();

    let mut blocks = Vec::new();
    for node in root.descendants() {
        let data = node.data.borrow();
        let start = data.sourcepos.start;
        let location = TextLocation::new(start.line, start.column);

        match &data.value {
            NodeValue::Heading(heading) => {
                let text = heading_source(&lines, &data.sourcepos, heading)
                    .unwrap_or_else(|| inline_text(node));
                blocks.push(Block::heading(heading.level, text).at(location));
            }
            NodeValue::CodeBlock(code) => {
                let text = code.literal.strip_suffix('\n').unwrap_or(&code.literal);
                blocks.push(Block::code(text).at(location));
            }
            _ => {}
        }
    }

    blocks
}

/// Returns the raw text of a heading as written, without the `#` prefix,
/// the closing sequence or a setext underline.
fn heading_source(lines: &[&str], pos: &Sourcepos, heading: &NodeHeading) -> Option<String> {
    let first = lines.get(pos.start.line.checked_sub(1)?)?;
    let first = first.get(pos.start.column.saturating_sub(1)..)?;

    if !heading.setext {
        let text = first.trim().trim_start_matches('#').trim();
        return Some(strip_closing_sequence(text).to_string());
    }

    let mut text: Vec<&str> = vec![first.trim()];
    for line in lines.get(pos.start.line..pos.end.line)? {
        let line = line.trim();
        if !line.is_empty() && line.chars().all(|c| c == '=' || c == '-') {
            break;
        }
        text.push(line);
    }
    Some(text.join("\n"))
}

/// Strips an ATX closing sequence: trailing `#`s preceded by whitespace.
fn strip_closing_sequence(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.is_empty() {
        without
    } else if without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        text
    }
}

/// Concatenates the plain text of a node's inline descendants.
fn inline_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.descendants().skip(1) {
        match &child.data.borrow().value {
            NodeValue::Text(t) => text.push_str(t),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text
}
