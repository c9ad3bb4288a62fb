//! Editor commands, each acting on an explicitly passed [`Document`].
//!
//! These are the entry points a host binds to keys. They combine the engine
//! operations with the host's collaborators: the sink for copied text, the
//! chooser for picking a target, and the store for the other document.
//!
//! Edits made here leave `doc.index` describing the text as it was parsed;
//! call [`Document::reindex`] before another section-aware command if the
//! buffer changed in between.

use crate::block_id::BlockIdGenerator;
use crate::block_ref::copy_reference;
use crate::buffer::{LineBuffer, Selection};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::expand::{self, Expansion};
use crate::locate::{find_enclosing, Direction};
use crate::section::{Section, SectionSource};
use crate::sink::Sink;
use crate::transfer::{self, pick_target, Chooser, FileStore, TransferMode};

/// Shown when the cursor is not on anything a reference can point at.
pub const NOT_REFERENCEABLE: &str = "The current cursor location is not a heading or block of text.";

/// Select the whole line under the cursor.
pub fn select_current_line(doc: &mut Document) -> Selection {
    expand::select_current_line(&mut doc.buffer)
}

#[must_use]
/// The section enclosing the cursor line, if any.
pub fn current_section(doc: &Document) -> Option<&Section> {
    find_enclosing(doc.index.sections(), doc.buffer.cursor_line()).map(|(_, section)| section)
}

/// Grow the primary selection by one step in `direction`.
pub fn select_current_section(doc: &mut Document, direction: Direction) -> Expansion {
    let expansion = expand::expand_selection(&mut doc.buffer, doc.index.sections(), direction);
    tracing::debug!(step = ?expansion.step, "expanded selection");
    expansion
}

/// Copy an embed of the block under the cursor to the clipboard.
///
/// A paragraph without an ID gets one written into the document first. When
/// the cursor is not on a heading or paragraph the user is told so and nothing
/// changes; that case yields `Ok(None)`.
///
/// # Errors
///
/// Propagates unexpected failures from the engine.
pub fn copy_block_ref(
    doc: &mut Document,
    ids: &mut BlockIdGenerator,
    sink: &mut impl Sink,
) -> Result<Option<String>> {
    let line = doc.buffer.cursor_line();
    match copy_reference(&mut doc.buffer, &doc.name, &mut doc.index, ids, line) {
        Ok(reference) => {
            sink.set_clipboard_text(&reference);
            Ok(Some(reference))
        }
        Err(err @ (Error::NoEnclosingSection { .. } | Error::NotReferenceable { .. })) => {
            tracing::debug!(%err, "nothing to reference");
            sink.notify(NOT_REFERENCEABLE);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Send the selection (or the cursor's line) to a chosen line of another document.
///
/// Returns `Ok(false)` if the user cancelled the choice.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn push_line_or_selection(
    doc: &mut Document,
    store: &impl FileStore,
    chooser: &mut impl Chooser,
    mode: TransferMode,
) -> Result<bool> {
    let Some(target) = pick_target(store, chooser, false, Some(&doc.path))? else {
        return Ok(false);
    };
    transfer::push(&mut doc.buffer, store, &target, mode)?;
    Ok(true)
}

/// Replace the selection with a chosen range of lines from another document.
///
/// Returns `Ok(false)` if the user cancelled the choice.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn pull_line_or_selection(
    doc: &mut Document,
    store: &impl FileStore,
    chooser: &mut impl Chooser,
    mode: TransferMode,
) -> Result<bool> {
    let Some(target) = pick_target(store, chooser, true, Some(&doc.path))? else {
        return Ok(false);
    };
    transfer::pull(&mut doc.buffer, store, &target, mode)?;
    Ok(true)
}

/// Embed every block in the selections into a chosen line of another document.
///
/// Returns the inserted embeds, or `Ok(None)` if the user cancelled.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn push_block_reference(
    doc: &mut Document,
    ids: &mut BlockIdGenerator,
    store: &impl FileStore,
    chooser: &mut impl Chooser,
) -> Result<Option<Vec<String>>> {
    let Some(target) = pick_target(store, chooser, false, Some(&doc.path))? else {
        return Ok(None);
    };
    transfer::push_block_reference(&mut doc.buffer, &doc.name, &mut doc.index, ids, store, &target)
        .map(Some)
}

/// Replace the selection with an embed of a chosen block in another document.
///
/// Returns the embed, or `Ok(None)` if the user cancelled. A chosen line that
/// is not a heading or paragraph is reported through `sink` and also yields
/// `Ok(None)`, leaving both documents untouched.
///
/// # Errors
///
/// Returns an error if the other document cannot be read, parsed or written.
pub fn pull_block_reference(
    doc: &mut Document,
    ids: &mut BlockIdGenerator,
    store: &impl FileStore,
    source: &impl SectionSource,
    chooser: &mut impl Chooser,
    sink: &mut impl Sink,
) -> Result<Option<String>> {
    let Some(target) = pick_target(store, chooser, false, Some(&doc.path))? else {
        return Ok(None);
    };
    match transfer::pull_block_reference(&mut doc.buffer, store, source, ids, &target) {
        Ok(reference) => Ok(Some(reference)),
        Err(err @ (Error::NoEnclosingSection { .. } | Error::NotReferenceable { .. })) => {
            tracing::debug!(%err, path = %target.path, "nothing to reference in target");
            sink.notify(NOT_REFERENCEABLE);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
#[path = "tests/commands.rs"]
mod tests;
