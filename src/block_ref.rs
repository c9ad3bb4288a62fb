//! Block references: stable short IDs anchoring links to paragraphs.
//!
//! A paragraph gets a reference by appending ` ^id` to its last line. Headings
//! need no ID; they are linked by their text. Once a paragraph has an ID it is
//! reused, never regenerated, so copying a reference twice yields one token in
//! the document and the same embed both times.

use crate::block_id::BlockIdGenerator;
use crate::buffer::{LineBuffer, Selection};
use crate::error::{Error, Result};
use crate::locate::find_enclosing;
use crate::section::{heading_text, SectionIndex, SectionKind};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// Link target within a document, rendered as the part after the document name.
pub enum RefToken {
    /// A paragraph's block reference; renders as `#^id`.
    Block {
        /// The paragraph's ID.
        id: String,
    },
    /// A heading; renders as one `#` per level followed by the heading text.
    Heading {
        /// Heading level, 1 to 6.
        level: usize,
        /// Heading text without markup symbols.
        text: String,
    },
}

impl fmt::Display for RefToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block { id } => write!(f, "#^{id}"),
            Self::Heading { level, text } => write!(f, "{}{text}", "#".repeat(*level)),
        }
    }
}

#[must_use]
/// Embed string for a token in the document called `name`: `![[name#^id]]`.
pub fn embed(name: &str, token: &RefToken) -> String {
    format!("![[{name}{token}]]")
}

/// Embed string for the section under `line`, giving a paragraph an ID if needed.
///
/// A heading is addressed by its text. A paragraph reuses its ID, or gets a
/// fresh one that is written into the buffer as ` ^id` at the section's end and
/// recorded in `index`, so a second call returns the same embed.
///
/// # Errors
///
/// Returns [`Error::NoEnclosingSection`] if no section covers `line`, and
/// [`Error::NotReferenceable`] if the section is neither heading nor paragraph.
pub fn copy_reference(
    buffer: &mut impl LineBuffer,
    name: &str,
    index: &mut SectionIndex,
    ids: &mut BlockIdGenerator,
    line: usize,
) -> Result<String> {
    let (position, section) = find_enclosing(index.sections(), line)
        .map(|(position, section)| (position, section.clone()))
        .ok_or(Error::NoEnclosingSection { line })?;

    match &section.kind {
        SectionKind::Heading { text, .. } => {
            let raw = buffer.line(section.start_line).map(heading_text).unwrap_or_default();
            let text = if raw.is_empty() { text.as_str() } else { raw };
            Ok(format!("![[{name}#{text}]]"))
        }
        SectionKind::Paragraph { id: Some(id) } => Ok(embed(name, &RefToken::Block { id: id.clone() })),
        SectionKind::Paragraph { id: None } => {
            let at = section.end();
            let id = ids.generate_unique(|candidate| index.contains_id(candidate), &mut HashSet::new());
            let marker = format!(" ^{id}");
            buffer.replace_range(&marker, at, at);
            index.assign_id(position, &id, marker.len());
            tracing::debug!(%id, line = at.line, "embedded new block reference");
            Ok(embed(name, &RefToken::Block { id }))
        }
        SectionKind::Other { kind } => Err(Error::NotReferenceable {
            line,
            kind: kind.clone(),
        }),
    }
}

/// Sections touched by `selections`, each once, in document order.
fn touched_sections(index: &SectionIndex, selections: &[Selection]) -> BTreeSet<usize> {
    let mut touched = BTreeSet::new();
    for selection in selections {
        let mut line = selection.first_line();
        while line <= selection.last_line() {
            match find_enclosing(index.sections(), line) {
                Some((position, section)) => {
                    touched.insert(position);
                    line = section.end_line + 1;
                }
                None => line += 1,
            }
        }
    }
    touched
}

/// Reference tokens for every heading and paragraph the selections touch.
///
/// Each section yields one token however many selected lines it spans, and
/// tokens follow document order regardless of how the selections are oriented.
/// Paragraphs without an ID are given one: all IDs are allocated first, then
/// the ` ^id` markers are written into the buffer in one pass.
pub fn annotate_selections(
    buffer: &mut impl LineBuffer,
    index: &mut SectionIndex,
    ids: &mut BlockIdGenerator,
    selections: &[Selection],
) -> Vec<RefToken> {
    let mut tokens = Vec::new();
    let mut pending = Vec::new();
    let mut allocated = HashSet::new();

    for position in touched_sections(index, selections) {
        let section = &index.sections()[position];
        match &section.kind {
            SectionKind::Heading { level, text } => tokens.push(RefToken::Heading {
                level: *level,
                text: text.clone(),
            }),
            SectionKind::Paragraph { id: Some(id) } => tokens.push(RefToken::Block { id: id.clone() }),
            SectionKind::Paragraph { id: None } => {
                let id = ids.generate_unique(|candidate| index.contains_id(candidate), &mut allocated);
                pending.push((position, section.end(), id.clone()));
                tokens.push(RefToken::Block { id });
            }
            SectionKind::Other { .. } => {}
        }
    }

    for (position, at, id) in pending {
        let marker = format!(" ^{id}");
        buffer.replace_range(&marker, at, at);
        index.assign_id(position, &id, marker.len());
        tracing::debug!(%id, line = at.line, "embedded new block reference");
    }

    tokens
}

/// Reference tokens for a single selection; see [`annotate_selections`].
pub fn annotate_selection(
    buffer: &mut impl LineBuffer,
    index: &mut SectionIndex,
    ids: &mut BlockIdGenerator,
    selection: Selection,
) -> Vec<RefToken> {
    annotate_selections(buffer, index, ids, &[selection])
}

#[cfg(test)]
#[path = "tests/block_ref.rs"]
mod tests;
