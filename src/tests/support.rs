//! In-memory collaborators shared by the unit tests.

use crate::error::{Error, Result};
use crate::section::{SectionIndex, SectionSource};
use crate::transfer::FileStore;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// File store over a map of paths to contents, counting writes.
#[derive(Default)]
pub(crate) struct MemoryStore {
    files: RefCell<BTreeMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub(crate) fn with(files: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (path, content) in files {
            store.files.borrow_mut().insert((*path).to_string(), (*content).to_string());
        }
        store
    }

    pub(crate) fn get(&self, path: &str) -> String {
        self.files.borrow()[path].clone()
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl FileStore for MemoryStore {
    fn read_file(&self, path: &str) -> Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            Error::io(path, std::io::Error::from(std::io::ErrorKind::NotFound))
        })
    }

    fn write_file(&self, path: &str, content: &str) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.files.borrow_mut().insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        Ok(self.files.borrow().keys().cloned().collect())
    }
}

/// Section source returning the same snapshot whatever the text.
pub(crate) struct FixedSections(pub(crate) SectionIndex);

impl SectionSource for FixedSections {
    fn sections(&self, _text: &str) -> Result<SectionIndex> {
        Ok(self.0.clone())
    }
}
