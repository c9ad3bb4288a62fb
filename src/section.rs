//! Section representation for parsed documents.
//!
//! A section is a contiguous structural unit of a document (a heading, a
//! paragraph or some other block) as reported by an external parser. The
//! [`SectionIndex`] is a read-only, ordered snapshot of those sections; the
//! locator, the selection expander and the block reference manager all scan it
//! in line order and rely on its sections never overlapping.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// A point in a document: zero-based line and byte column within that line.
pub struct Position {
    /// Zero-based line number.
    pub line: usize,
    /// Byte offset within the line.
    pub column: usize,
}

impl Position {
    #[must_use]
    /// Create a position from a line and column.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    #[must_use]
    /// The start of a line.
    pub fn line_start(line: usize) -> Self {
        Self { line, column: 0 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// What a section is, with the data only that kind carries.
pub enum SectionKind {
    /// A heading, addressed by its text rather than a generated ID.
    Heading {
        /// Heading level, 1 to 6.
        level: usize,
        /// Heading text without markup symbols.
        text: String,
    },
    /// A paragraph, which may carry a block reference ID.
    Paragraph {
        /// Existing block reference, absent until one is assigned.
        id: Option<String>,
    },
    /// Any other block (lists, code, quotes), treated opaquely.
    Other {
        /// Block kind as named by the parser.
        kind: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A structural unit of a document with inclusive line bounds.
pub struct Section {
    /// Kind of block and its kind-specific data.
    #[serde(flatten)]
    pub kind: SectionKind,
    /// First line of the section.
    pub start_line: usize,
    /// Last line of the section (inclusive).
    pub end_line: usize,
    /// Byte offset within `end_line` where appended text is inserted.
    pub end_column: usize,
}

impl Section {
    #[must_use]
    /// A heading section covering a single line.
    pub fn heading(line: usize, level: usize, text: impl Into<String>, end_column: usize) -> Self {
        Self {
            kind: SectionKind::Heading {
                level,
                text: text.into(),
            },
            start_line: line,
            end_line: line,
            end_column,
        }
    }

    #[must_use]
    /// A paragraph section without a block reference.
    pub fn paragraph(start_line: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            kind: SectionKind::Paragraph { id: None },
            start_line,
            end_line,
            end_column,
        }
    }

    #[must_use]
    /// An opaque block section.
    pub fn other(kind: impl Into<String>, start_line: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            kind: SectionKind::Other { kind: kind.into() },
            start_line,
            end_line,
            end_column,
        }
    }

    #[must_use]
    /// Attach an existing block reference (only meaningful for paragraphs).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        if let SectionKind::Paragraph { id: slot } = &mut self.kind {
            *slot = Some(id.into());
        }
        self
    }

    #[must_use]
    /// Whether `line` falls within the section's inclusive bounds.
    pub fn contains(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    #[must_use]
    /// The block reference carried by a paragraph, if any.
    pub fn id(&self) -> Option<&str> {
        match &self.kind {
            SectionKind::Paragraph { id } => id.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    /// Short name of the section kind, for messages and logs.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            SectionKind::Heading { .. } => "heading",
            SectionKind::Paragraph { .. } => "paragraph",
            SectionKind::Other { kind } => kind,
        }
    }

    #[must_use]
    /// Where appended text (such as ` ^id`) goes.
    pub fn end(&self) -> Position {
        Position::new(self.end_line, self.end_column)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Heading record as exposed by `headings()`.
pub struct Heading {
    /// Heading level, 1 to 6.
    pub level: usize,
    /// Heading text without markup symbols.
    pub text: String,
    /// Line the heading sits on.
    pub start_line: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Ordered, non-overlapping snapshot of a document's sections.
pub struct SectionIndex {
    sections: Vec<Section>,
}

impl SectionIndex {
    /// Build an index, checking that sections are ordered and non-overlapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnorderedSections`] if a section ends before it starts,
    /// or starts on or before the last line of the section preceding it.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        for (index, section) in sections.iter().enumerate() {
            if section.end_line < section.start_line {
                return Err(Error::UnorderedSections { index });
            }
            if index > 0 && section.start_line <= sections[index - 1].end_line {
                return Err(Error::UnorderedSections { index });
            }
        }
        Ok(Self { sections })
    }

    #[must_use]
    /// All sections in line order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    /// Number of sections in the snapshot.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    /// Whether the document has no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    /// Heading records in line order.
    pub fn headings(&self) -> Vec<Heading> {
        self.sections
            .iter()
            .filter_map(|section| match &section.kind {
                SectionKind::Heading { level, text } => Some(Heading {
                    level: *level,
                    text: text.clone(),
                    start_line: section.start_line,
                }),
                _ => None,
            })
            .collect()
    }

    /// Block reference IDs already present in the document.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().filter_map(Section::id)
    }

    #[must_use]
    /// Whether `id` is already used by a section in this document.
    pub fn contains_id(&self, id: &str) -> bool {
        self.ids().any(|existing| existing == id)
    }

    /// Record a freshly embedded block reference on the paragraph at `index`.
    ///
    /// The caller has just appended `appended` bytes (` ^id`) to the section's
    /// last line, so the insertion column moves along with it. Non-paragraph
    /// sections are left untouched.
    pub fn assign_id(&mut self, index: usize, id: &str, appended: usize) {
        if let Some(section) = self.sections.get_mut(index) {
            if let SectionKind::Paragraph { id: slot } = &mut section.kind {
                *slot = Some(id.to_string());
                section.end_column += appended;
            }
        }
    }
}

/// Drop an ATX closing sequence (`## Title ##` ends in ` ##`) from heading text.
///
/// The run of `#` only counts as a closing sequence when whitespace separates
/// it from the text, or when it is all there is.
#[must_use]
pub fn strip_closing_sequence(text: &str) -> &str {
    let text = text.trim();
    let without = text.trim_end_matches('#');
    if without.is_empty() {
        ""
    } else if without.ends_with(char::is_whitespace) {
        without.trim_end()
    } else {
        text
    }
}

/// Heading text of a raw heading line, without opening or closing `#` markers.
///
/// Lines not starting with `#` (setext heading text) are only trimmed.
#[must_use]
pub fn heading_text(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.strip_prefix('#') {
        Some(rest) => strip_closing_sequence(rest.trim_start_matches('#')),
        None => raw,
    }
}

/// Provider of section snapshots for a document's text.
pub trait SectionSource {
    /// Parse `text` into an ordered section snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed.
    fn sections(&self, text: &str) -> Result<SectionIndex>;
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
