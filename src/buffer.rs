//! The editable line buffer the engine works against.
//!
//! [`LineBuffer`] is the narrow surface of a host editor: read lines, read and
//! set selections, replace ranges and ask for a range to be scrolled into
//! view. [`TextBuffer`] is the in-memory implementation the binary and the
//! tests use.

use crate::section::Position;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// A selection with a fixed anchor and a moving head.
pub struct Selection {
    /// Where the selection started.
    pub anchor: Position,
    /// Where the selection ends; this is the cursor.
    pub head: Position,
}

impl Selection {
    #[must_use]
    /// A selection from `anchor` to `head`.
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    #[must_use]
    /// A collapsed selection (a bare cursor).
    pub fn cursor(at: Position) -> Self {
        Self { anchor: at, head: at }
    }

    #[must_use]
    /// Whether anchor and head are the same point.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    #[must_use]
    /// The endpoints ordered by document position.
    pub fn ordered(&self) -> (Position, Position) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }

    #[must_use]
    /// First line the selection touches.
    pub fn first_line(&self) -> usize {
        self.anchor.line.min(self.head.line)
    }

    #[must_use]
    /// Last line the selection touches.
    pub fn last_line(&self) -> usize {
        self.anchor.line.max(self.head.line)
    }
}

/// Editor operations the engine consumes.
pub trait LineBuffer {
    /// Number of lines in the document.
    fn line_count(&self) -> usize;

    /// Text of line `n`, without its terminator.
    fn line(&self, n: usize) -> Option<&str>;

    /// Current selections; the first is the primary one.
    fn selections(&self) -> Vec<Selection>;

    /// Replace all selections with a single one.
    fn set_selection(&mut self, anchor: Position, head: Position);

    /// Replace the text between two positions.
    fn replace_range(&mut self, text: &str, from: Position, to: Position);

    /// Replace the primary selection, leaving the cursor after the new text.
    fn replace_selection(&mut self, text: &str);

    /// Ask the host to bring a range into view.
    fn scroll_into_view(&mut self, from: Position, to: Position);

    /// Length of line `n` in bytes, zero if it does not exist.
    fn line_len(&self, n: usize) -> usize {
        self.line(n).map_or(0, str::len)
    }

    /// Line the cursor (head of the primary selection) is on.
    fn cursor_line(&self) -> usize {
        self.selections().first().map_or(0, |s| s.head.line)
    }

    /// Text covered by the primary selection, lines joined with `\n`.
    fn selection_text(&self) -> String {
        let Some(selection) = self.selections().first().copied() else {
            return String::new();
        };
        let (from, to) = selection.ordered();
        let mut pieces = Vec::new();
        for n in from.line..=to.line {
            let Some(line) = self.line(n) else { break };
            let start = if n == from.line { clamp_column(line, from.column) } else { 0 };
            let end = if n == to.line { clamp_column(line, to.column) } else { line.len() };
            pieces.push(&line[start..end.max(start)]);
        }
        pieces.join("\n")
    }
}

/// Clamp a byte column into `line`, backing off to a char boundary.
pub(crate) fn clamp_column(line: &str, column: usize) -> usize {
    let mut column = column.min(line.len());
    while !line.is_char_boundary(column) {
        column -= 1;
    }
    column
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// In-memory document: lines plus selection and scroll state.
pub struct TextBuffer {
    lines: Vec<String>,
    selections: Vec<Selection>,
    scrolled_to: Option<(Position, Position)>,
    modified: bool,
}

impl TextBuffer {
    #[must_use]
    /// Split `text` on `\n` into a buffer with the cursor at the start.
    ///
    /// A trailing newline yields a final empty line, so [`TextBuffer::text`]
    /// gives back exactly the input.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(ToString::to_string).collect(),
            selections: vec![Selection::default()],
            scrolled_to: None,
            modified: false,
        }
    }

    #[must_use]
    /// Buffer from individual lines.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let lines: Vec<String> = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines.iter().map(|l| l.as_ref().to_string()).collect()
        };
        Self {
            lines,
            selections: vec![Selection::default()],
            scrolled_to: None,
            modified: false,
        }
    }

    #[must_use]
    /// Builder-style selection setter.
    pub fn with_selection(mut self, anchor: Position, head: Position) -> Self {
        self.set_selection(anchor, head);
        self
    }

    #[must_use]
    /// Builder-style cursor setter.
    pub fn with_cursor(self, at: Position) -> Self {
        self.with_selection(at, at)
    }

    /// Replace all selections at once (multiple cursors).
    pub fn set_selections(&mut self, selections: Vec<Selection>) {
        self.selections = selections.into_iter().map(|s| self.clamp_selection(s)).collect();
        if self.selections.is_empty() {
            self.selections.push(Selection::default());
        }
    }

    #[must_use]
    /// All lines of the document.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    /// Whole document text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    #[must_use]
    /// The range most recently passed to `scroll_into_view`.
    pub fn scrolled_to(&self) -> Option<(Position, Position)> {
        self.scrolled_to
    }

    #[must_use]
    /// Whether any edit has been made since the buffer was created.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clamp a position to an existing line and a char boundary within it.
    fn clamp(&self, at: Position) -> Position {
        let last = self.lines.len().saturating_sub(1);
        if at.line > last {
            return Position::new(last, self.lines[last].len());
        }
        Position::new(at.line, clamp_column(&self.lines[at.line], at.column))
    }

    fn clamp_selection(&self, selection: Selection) -> Selection {
        Selection::new(self.clamp(selection.anchor), self.clamp(selection.head))
    }

    /// Splice `text` over `from..to`, returning where the inserted text ends.
    fn splice(&mut self, text: &str, from: Position, to: Position) -> Position {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let (from, to) = (self.clamp(from), self.clamp(to));

        let prefix = &self.lines[from.line][..from.column];
        let suffix = &self.lines[to.line][to.column..];
        let replaced = format!("{prefix}{text}{suffix}");
        let new_lines: Vec<String> = replaced.split('\n').map(ToString::to_string).collect();

        let end_line = from.line + new_lines.len() - 1;
        let end_column = new_lines[new_lines.len() - 1].len() - suffix.len();

        self.lines.splice(from.line..=to.line, new_lines);
        self.modified = true;
        Position::new(end_line, end_column)
    }
}

impl LineBuffer for TextBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, n: usize) -> Option<&str> {
        self.lines.get(n).map(String::as_str)
    }

    fn selections(&self) -> Vec<Selection> {
        self.selections.clone()
    }

    fn set_selection(&mut self, anchor: Position, head: Position) {
        self.selections = vec![self.clamp_selection(Selection::new(anchor, head))];
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Position) {
        self.splice(text, from, to);
        self.selections = self
            .selections
            .iter()
            .map(|s| self.clamp_selection(*s))
            .collect();
    }

    fn replace_selection(&mut self, text: &str) {
        let selection = self.selections.first().copied().unwrap_or_default();
        let (from, to) = selection.ordered();
        let end = self.splice(text, from, to);
        self.selections = vec![Selection::cursor(end)];
    }

    fn scroll_into_view(&mut self, from: Position, to: Position) {
        self.scrolled_to = Some((from, to));
    }
}

#[cfg(test)]
#[path = "tests/buffer.rs"]
mod tests;
