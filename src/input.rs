//! Turning document text into a section snapshot with tree-sitter.
//!
//! Only top-level blocks become sections: paragraphs nested in list items or
//! quotes belong to the enclosing list or quote. Tree-sitter node ranges run to
//! the start of the following line and may take trailing blank lines with
//! them, so each range is trimmed back to its last non-blank line.

use crate::error::{Error, Result};
use crate::formats::{BlockClass, Format};
use crate::section::{heading_text, strip_closing_sequence, Section, SectionIndex, SectionKind};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// A trailing ` ^id` block reference on a paragraph's last line.
static BLOCK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)\^([A-Za-z0-9-]+)\s*$").expect("valid block id pattern"));

/// Parse `text` and list its top-level blocks as sections.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded or the text cannot be parsed.
pub fn extract_sections(text: &str, format: &impl Format) -> Result<SectionIndex> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| Error::Language(e.to_string()))?;
    let tree = parser.parse(text, None).ok_or(Error::Parse)?;

    let query = Query::new(&language, format.title_query()).map_err(|e| Error::Language(e.to_string()))?;
    let mut titles = HashMap::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), text.as_bytes());
    while let Some(m) = matches.next() {
        for capture in m.captures {
            if let Ok(title) = capture.node.utf8_text(text.as_bytes()) {
                titles.insert(capture.node.start_position().row, strip_closing_sequence(title).to_string());
            }
        }
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let mut sections = Vec::new();
    collect_blocks(tree.root_node(), &lines, &titles, format, &mut sections);
    sections.sort_by_key(|section| section.start_line);
    tracing::debug!(count = sections.len(), "extracted sections");
    SectionIndex::new(sections)
}

/// Trimmed inclusive line span of a node, with the end column of its last line.
fn line_span(node: Node<'_>, lines: &[&str]) -> Option<(usize, usize, usize)> {
    let start = node.start_position().row;
    if start >= lines.len() {
        return None;
    }
    let end_position = node.end_position();
    let mut end = end_position.row;
    if end_position.column == 0 && end > start {
        end -= 1;
    }
    end = end.min(lines.len() - 1);
    while end > start && lines[end].trim().is_empty() {
        end -= 1;
    }
    Some((start, end, lines[end].trim_end().len()))
}

fn collect_blocks(
    node: Node<'_>,
    lines: &[&str],
    titles: &HashMap<usize, String>,
    format: &impl Format,
    out: &mut Vec<Section>,
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let class = format.classify(child.kind());
        if let BlockClass::Container = class {
            collect_blocks(child, lines, titles, format, out);
            continue;
        }
        let Some((start_line, end_line, end_column)) = line_span(child, lines) else {
            continue;
        };
        let kind = match class {
            BlockClass::Heading => SectionKind::Heading {
                level: format.heading_level(child),
                text: titles
                    .get(&start_line)
                    .cloned()
                    .unwrap_or_else(|| heading_text(lines[start_line]).to_string()),
            },
            BlockClass::Paragraph => SectionKind::Paragraph {
                id: BLOCK_ID
                    .captures(lines[end_line])
                    .map(|caps| caps[1].to_string()),
            },
            BlockClass::Other => SectionKind::Other {
                kind: child.kind().to_string(),
            },
            BlockClass::Container | BlockClass::Skip => continue,
        };
        out.push(Section {
            kind,
            start_line,
            end_line,
            end_column,
        });
    }
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
