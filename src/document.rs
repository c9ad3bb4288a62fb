//! The document a command acts on: its text, selections and section snapshot.

use crate::buffer::TextBuffer;
use crate::error::Result;
use crate::section::{SectionIndex, SectionSource};
use crate::transfer::{link_name, FileStore};

/// An open document, passed explicitly to every command.
pub struct Document {
    /// Link name: the vault path without its extension.
    pub name: String,
    /// Vault-relative path the document was read from.
    pub path: String,
    /// Text and selection state.
    pub buffer: TextBuffer,
    /// Section snapshot taken when the text was last parsed.
    pub index: SectionIndex,
}

impl Document {
    /// Read `path` from `store` and take its section snapshot with `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open(store: &impl FileStore, path: &str, source: &impl SectionSource) -> Result<Self> {
        let text = store.read_file(path)?;
        let index = source.sections(&text)?;
        tracing::debug!(path, sections = index.len(), "opened document");
        Ok(Self {
            name: link_name(path),
            path: path.to_string(),
            buffer: TextBuffer::from_text(&text),
            index,
        })
    }

    /// Document over text already in memory, as the host would hand it over.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed.
    pub fn from_text(path: &str, text: &str, source: &impl SectionSource) -> Result<Self> {
        Ok(Self {
            name: link_name(path),
            path: path.to_string(),
            buffer: TextBuffer::from_text(text),
            index: source.sections(text)?,
        })
    }

    /// Re-parse the current text, replacing the section snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed.
    pub fn reindex(&mut self, source: &impl SectionSource) -> Result<()> {
        self.index = source.sections(&self.buffer.text())?;
        Ok(())
    }

    /// Write the text back in one write if it was edited. Returns whether it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save(&self, store: &impl FileStore) -> Result<bool> {
        if !self.buffer.is_modified() {
            return Ok(false);
        }
        store.write_file(&self.path, &self.buffer.text())?;
        Ok(true)
    }
}
