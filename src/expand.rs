//! Growing a selection outward along section boundaries.
//!
//! Each call takes one step, so repeated invocations (a held key, say) walk
//! the selection from the cursor's line, to its block, then block by block up
//! to the start of the document or down to the last block:
//!
//! ```text
//! cursor -> Line -> Block -> Preceding/Next ... -> DocumentStart | Unchanged
//!                      ^
//!   blank line -> Nearest
//! ```
//!
//! Upward growth stops at line 0, so anything the parser does not report
//! before the first block (front matter, stray lines) gets picked up. Downward
//! growth stops at the end of the last block: trailing blank lines are never
//! content, and a selection already reaching the last block stays unchanged.

use crate::buffer::{LineBuffer, Selection};
use crate::locate::{find_enclosing, find_nearest, Direction};
use crate::section::{Position, Section};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Which rule produced an expansion.
pub enum Step {
    /// Selected the cursor's whole line.
    Line,
    /// Selected the single block the selection sits in.
    Block,
    /// The cursor was on an uncovered line; selected the nearest block.
    Nearest,
    /// Grew upward to include the preceding block.
    Preceding,
    /// Grew upward to the start of the document.
    DocumentStart,
    /// Grew downward to include the next block.
    Next,
    /// Already at the last block; nothing to grow into.
    Unchanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
/// Outcome of one expansion step.
pub struct Expansion {
    /// The new selection, anchored at the top and headed at the bottom.
    pub selection: Selection,
    /// Range the host should scroll into view, if any.
    pub reveal: Option<(Position, Position)>,
    /// Rule that produced this selection.
    pub step: Step,
}

impl Expansion {
    fn new(selection: Selection, step: Step) -> Self {
        Self {
            selection,
            reveal: None,
            step,
        }
    }

    fn revealing(mut self, from: Position, to: Position) -> Self {
        self.reveal = Some((from, to));
        self
    }
}

/// Lines `first..=last`, from the start of `first` to the end of `last`.
fn line_span(buffer: &impl LineBuffer, first: usize, last: usize) -> Selection {
    Selection::new(Position::line_start(first), Position::new(last, buffer.line_len(last)))
}

fn block_span(block: &Section) -> Selection {
    Selection::new(Position::line_start(block.start_line), block.end())
}

#[must_use]
/// Compute the next selection for `selection`, growing in `direction`.
pub fn expand(
    buffer: &impl LineBuffer,
    sections: &[Section],
    selection: Selection,
    direction: Direction,
) -> Expansion {
    let line = selection.head.line;
    let first = selection.first_line();
    let last = selection.last_line();

    if first == last {
        let len = buffer.line_len(line);
        let (from, to) = selection.ordered();
        if len > 0 && !(from.column == 0 && to.column >= len) {
            tracing::debug!(line, "selecting current line");
            return Expansion::new(line_span(buffer, line, line), Step::Line);
        }
    }

    match find_enclosing(sections, line) {
        Some((_, block)) => {
            let inside = first >= block.start_line && last <= block.end_line;
            let covered = first == block.start_line && last == block.end_line;
            if inside && !covered {
                tracing::debug!(start = block.start_line, end = block.end_line, "selecting block");
                return Expansion::new(block_span(block), Step::Block);
            }
        }
        None if first == last => {
            if let Some((_, nearest)) = find_nearest(sections, line, direction) {
                tracing::debug!(line, start = nearest.start_line, "selecting nearest block");
                return Expansion::new(block_span(nearest), Step::Nearest);
            }
        }
        None => {}
    }

    let current = sections.iter().rposition(|s| s.end_line <= last);
    let next = sections.get(current.map_or(0, |i| i + 1));
    let preceding = sections.iter().rev().find(|s| s.end_line < first);

    match direction {
        Direction::Up => match preceding {
            Some(block) => {
                let start = Position::line_start(block.start_line);
                tracing::debug!(start = block.start_line, last, "growing up to preceding block");
                Expansion::new(line_span(buffer, block.start_line, last), Step::Preceding)
                    .revealing(start, start)
            }
            None => {
                tracing::debug!(last, "growing up to document start");
                Expansion::new(line_span(buffer, 0, last), Step::DocumentStart)
                    .revealing(Position::line_start(0), Position::line_start(first))
            }
        },
        Direction::Down => match next {
            Some(block) => {
                let start = Position::line_start(block.start_line);
                tracing::debug!(first, end = block.end_line, "growing down to next block");
                Expansion::new(line_span(buffer, first, block.end_line), Step::Next)
                    .revealing(start, start)
            }
            None => {
                tracing::debug!(last, "already at the last block");
                Expansion::new(selection, Step::Unchanged)
            }
        },
    }
}

/// Select the whole line the cursor is on.
pub fn select_current_line(buffer: &mut impl LineBuffer) -> Selection {
    let line = buffer.cursor_line();
    let selection = line_span(buffer, line, line);
    buffer.set_selection(selection.anchor, selection.head);
    selection
}

/// Expand the buffer's primary selection one step and apply the result.
pub fn expand_selection(
    buffer: &mut impl LineBuffer,
    sections: &[Section],
    direction: Direction,
) -> Expansion {
    let selection = buffer.selections().first().copied().unwrap_or_default();
    let expansion = expand(buffer, sections, selection, direction);
    buffer.set_selection(expansion.selection.anchor, expansion.selection.head);
    if let Some((from, to)) = expansion.reveal {
        buffer.scroll_into_view(from, to);
    }
    expansion
}

#[cfg(test)]
#[path = "tests/expand.rs"]
mod tests;
