//! Moving and copying lines and block references between documents.
//!
//! Every flow works on a whole-file snapshot of the other document: its lines
//! are read once, the new content is composed in full, and then written back in
//! a single write. The target is chosen up front (file, then line, then
//! optionally an end line); cancelling any of those choices leaves both
//! documents untouched.
//!
//! The two documents are not updated atomically. A push writes the target
//! before deleting from the source, so a failure in between leaves the text
//! in both places rather than in neither.

use crate::block_id::BlockIdGenerator;
use crate::block_ref::{annotate_selections, copy_reference, embed};
use crate::buffer::{LineBuffer, Selection, TextBuffer};
use crate::error::{Error, Result};
use crate::section::{Position, SectionIndex, SectionSource};
use std::collections::VecDeque;

/// Whole-file access to the documents a vault holds.
pub trait FileStore {
    /// Read a document's full text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_file(&self, path: &str) -> Result<String>;

    /// Overwrite a document with `content` in one write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written; no retry is attempted.
    fn write_file(&self, path: &str, content: &str) -> Result<()>;

    /// Paths of every document in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be listed.
    fn list_files(&self) -> Result<Vec<String>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One option offered to a [`Chooser`].
pub struct Candidate {
    /// Text shown to the user.
    pub display: String,
    /// Stable key identifying the option (a path or a line number).
    pub key: String,
}

/// Asks the user to pick one of several candidates.
pub trait Chooser {
    /// Index of the chosen candidate, or `None` if the user cancelled.
    fn choose(&mut self, prompt: &str, candidates: &[Candidate]) -> Option<usize>;
}

/// Chooser answering from a fixed queue of candidate keys.
///
/// Each call pops the next key and picks the candidate carrying it; an empty
/// queue or an unknown key behaves like the user cancelling.
pub struct ScriptedChooser {
    answers: VecDeque<String>,
}

impl ScriptedChooser {
    #[must_use]
    /// Chooser that will answer with `answers`, in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Chooser for ScriptedChooser {
    fn choose(&mut self, prompt: &str, candidates: &[Candidate]) -> Option<usize> {
        let answer = self.answers.pop_front()?;
        let chosen = candidates.iter().position(|c| c.key == answer);
        tracing::debug!(prompt, %answer, ?chosen, "scripted choice");
        chosen
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Whether the source keeps its copy of transferred text.
pub enum TransferMode {
    /// Leave the source as it is.
    Copy,
    /// Remove the transferred text from the source.
    Move,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A chosen document and line range to transfer to or from.
pub struct Target {
    /// Path of the document in the store.
    pub path: String,
    /// The document's lines as read when it was chosen.
    pub lines: Vec<String>,
    /// First chosen line.
    pub start: usize,
    /// Last chosen line (equal to `start` when no end point was asked for).
    pub end: usize,
}

impl Target {
    /// Read `path` from `store` and target lines `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn load(store: &impl FileStore, path: &str, start: usize, end: usize) -> Result<Self> {
        Ok(Self {
            path: path.to_string(),
            lines: split_lines(&store.read_file(path)?),
            start,
            end,
        })
    }
}

#[must_use]
/// Split file content into lines on `\n`, keeping a trailing empty line.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(ToString::to_string).collect()
}

#[must_use]
/// Join lines back into file content.
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

#[must_use]
/// Name used to link to a document: its path without the file extension.
pub fn link_name(path: &str) -> String {
    match path.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !stem.ends_with('/') && !ext.contains('/') => {
            stem.to_string()
        }
        _ => path.to_string(),
    }
}

/// `lines` with `text` inserted as a new line right after `after`.
///
/// # Errors
///
/// Returns [`Error::LineOutOfRange`] if `after` is not a line of `lines`.
pub fn insert_after(lines: &[String], after: usize, text: &str) -> Result<Vec<String>> {
    if after >= lines.len() {
        return Err(Error::LineOutOfRange {
            line: after,
            len: lines.len(),
        });
    }
    let mut spliced = Vec::with_capacity(lines.len() + 1);
    spliced.extend_from_slice(&lines[..=after]);
    spliced.push(text.to_string());
    spliced.extend_from_slice(&lines[after + 1..]);
    Ok(spliced)
}

fn check_range(lines: &[String], start: usize, end: usize) -> Result<()> {
    if end >= lines.len() {
        return Err(Error::LineOutOfRange {
            line: end,
            len: lines.len(),
        });
    }
    if start > end {
        return Err(Error::LineOutOfRange {
            line: start,
            len: lines.len(),
        });
    }
    Ok(())
}

/// Let the user choose a file, a line in it and, if `with_end`, a last line.
///
/// When the first line chosen is the file's last line there is nothing left to
/// choose from, so the end point is that same line. The file at `exclude` (the
/// document being edited) is not offered: its open buffer is saved after the
/// transfer and would overwrite whatever the transfer wrote to it.
///
/// # Errors
///
/// Returns an error if the store cannot be listed or the chosen file read.
/// Cancelling a choice is not an error: it yields `Ok(None)`.
pub fn pick_target(
    store: &impl FileStore,
    chooser: &mut impl Chooser,
    with_end: bool,
    exclude: Option<&str>,
) -> Result<Option<Target>> {
    let mut files = store.list_files()?;
    files.retain(|path| Some(path.as_str()) != exclude);
    let file_candidates: Vec<Candidate> = files
        .iter()
        .map(|path| Candidate {
            display: path.clone(),
            key: path.clone(),
        })
        .collect();
    let Some(path) = chooser
        .choose("Select a file", &file_candidates)
        .and_then(|i| files.get(i))
    else {
        return Ok(None);
    };

    let lines = split_lines(&store.read_file(path)?);
    let line_candidates: Vec<Candidate> = lines
        .iter()
        .enumerate()
        .map(|(n, text)| Candidate {
            display: text.clone(),
            key: n.to_string(),
        })
        .collect();
    let Some(start) = chooser
        .choose("Select the line from file", &line_candidates)
        .filter(|&i| i < lines.len())
    else {
        return Ok(None);
    };

    let end = if !with_end || start + 1 == lines.len() {
        start
    } else {
        let rest = &line_candidates[start..];
        let Some(offset) = chooser
            .choose("Select the last line for the selection", rest)
            .filter(|&i| i < rest.len())
        else {
            return Ok(None);
        };
        start + offset
    };

    Ok(Some(Target {
        path: path.clone(),
        lines,
        start,
        end,
    }))
}

/// Remove line `line` and one adjoining line terminator from the buffer.
fn delete_line(buffer: &mut impl LineBuffer, line: usize) {
    if line + 1 < buffer.line_count() {
        buffer.replace_range("", Position::line_start(line), Position::line_start(line + 1));
    } else if line > 0 {
        let from = Position::new(line - 1, buffer.line_len(line - 1));
        let to = Position::new(line, buffer.line_len(line));
        buffer.replace_range("", from, to);
    } else {
        let to = Position::new(0, buffer.line_len(0));
        buffer.replace_range("", Position::line_start(0), to);
    }
}

/// Whether the primary selection is a bare cursor or exactly the cursor's line.
fn selects_whole_line(buffer: &impl LineBuffer, selection: Selection) -> bool {
    if selection.is_collapsed() {
        return true;
    }
    let line = selection.head.line;
    selection.ordered() == (Position::line_start(line), Position::new(line, buffer.line_len(line)))
}

/// Insert the selection (or the cursor's line) after the target's chosen line.
///
/// On [`TransferMode::Move`] the text then leaves the source: a whole-line
/// selection (or bare cursor) deletes the line with its terminator, anything
/// else deletes just the selected text.
///
/// # Errors
///
/// Returns an error if the chosen line does not exist or the write fails.
pub fn push(
    buffer: &mut impl LineBuffer,
    store: &impl FileStore,
    target: &Target,
    mode: TransferMode,
) -> Result<()> {
    let selection = buffer.selections().first().copied().unwrap_or_default();
    let line = selection.head.line;
    let whole_line = selects_whole_line(buffer, selection);
    let text = if selection.is_collapsed() {
        buffer.line(line).unwrap_or_default().to_string()
    } else {
        buffer.selection_text()
    };

    let content = join_lines(&insert_after(&target.lines, target.start, &text)?);
    store.write_file(&target.path, &content)?;
    tracing::info!(path = %target.path, after = target.start, "pushed text");

    if mode == TransferMode::Move {
        if whole_line {
            delete_line(buffer, line);
        } else {
            buffer.replace_selection("");
        }
    }
    Ok(())
}

/// Replace the current selection with the target's chosen lines.
///
/// On [`TransferMode::Move`] those lines are then removed from the target,
/// which is written back in one write.
///
/// # Errors
///
/// Returns an error if the chosen range does not exist or the write fails.
pub fn pull(
    buffer: &mut impl LineBuffer,
    store: &impl FileStore,
    target: &Target,
    mode: TransferMode,
) -> Result<()> {
    check_range(&target.lines, target.start, target.end)?;
    let text = target.lines[target.start..=target.end].join("\n");

    let remaining = (mode == TransferMode::Move).then(|| {
        let mut lines = target.lines.clone();
        lines.drain(target.start..=target.end);
        join_lines(&lines)
    });

    buffer.replace_selection(&text);
    if let Some(content) = remaining {
        store.write_file(&target.path, &content)?;
        tracing::info!(path = %target.path, start = target.start, end = target.end, "pulled lines out");
    }
    Ok(())
}

/// Reference every heading and paragraph in the selections from the target.
///
/// The selections are annotated (new IDs are written into `buffer`), each
/// token becomes an embed line `![[name#^id]]`, and the embeds are inserted
/// after the target's chosen line. Returns the embeds; when the selections
/// touch nothing referenceable, nothing is written.
///
/// # Errors
///
/// Returns an error if the chosen line does not exist or the write fails.
pub fn push_block_reference(
    buffer: &mut impl LineBuffer,
    name: &str,
    index: &mut SectionIndex,
    ids: &mut BlockIdGenerator,
    store: &impl FileStore,
    target: &Target,
) -> Result<Vec<String>> {
    check_range(&target.lines, target.start, target.start)?;

    let selections = buffer.selections();
    let tokens = annotate_selections(buffer, index, ids, &selections);
    if tokens.is_empty() {
        tracing::debug!("selection holds no headings or paragraphs");
        return Ok(Vec::new());
    }

    let embeds: Vec<String> = tokens.iter().map(|token| embed(name, token)).collect();
    let content = join_lines(&insert_after(&target.lines, target.start, &embeds.join("\n"))?);
    store.write_file(&target.path, &content)?;
    tracing::info!(path = %target.path, count = embeds.len(), "pushed block references");
    Ok(embeds)
}

/// Replace the current selection with an embed of the target's chosen line.
///
/// The target is parsed with `source`; if the chosen section is a paragraph
/// without an ID, one is written into the target first.
///
/// # Errors
///
/// Returns an error if the chosen line is not a heading or paragraph, or if
/// parsing or writing the target fails.
pub fn pull_block_reference(
    buffer: &mut impl LineBuffer,
    store: &impl FileStore,
    source: &impl SectionSource,
    ids: &mut BlockIdGenerator,
    target: &Target,
) -> Result<String> {
    check_range(&target.lines, target.start, target.start)?;

    let mut target_buffer = TextBuffer::from_lines(&target.lines);
    let mut target_index = source.sections(&join_lines(&target.lines))?;
    let name = link_name(&target.path);
    let reference = copy_reference(&mut target_buffer, &name, &mut target_index, ids, target.start)?;

    if target_buffer.is_modified() {
        store.write_file(&target.path, &target_buffer.text())?;
        tracing::info!(path = %target.path, line = target.start, "embedded block reference in target");
    }
    buffer.replace_selection(&reference);
    Ok(reference)
}

#[cfg(test)]
#[path = "tests/transfer.rs"]
mod tests;
