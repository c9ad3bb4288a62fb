//! A directory of plain-text notes, read and written whole.

use crate::error::{Error, Result};
use crate::transfer::FileStore;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File store rooted at a directory, listing files by extension.
pub struct Vault {
    root: PathBuf,
    extensions: Vec<String>,
}

impl Vault {
    #[must_use]
    /// Vault over `root`, listing files whose extension is in `extensions`.
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            extensions,
        }
    }

    #[must_use]
    /// Directory the vault is rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    #[must_use]
    /// Vault-relative, `/`-separated path for a file given on the command line.
    ///
    /// Paths outside the vault are returned unchanged.
    pub fn relative(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).ok().map(Path::to_path_buf).or_else(|| {
            let root = fs::canonicalize(&self.root).ok()?;
            let full = fs::canonicalize(path).ok()?;
            full.strip_prefix(root).ok().map(Path::to_path_buf)
        });
        to_slashed(relative.as_deref().unwrap_or(path))
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted == ext))
    }

    fn collect(&self, dir: &Path, out: &mut Vec<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let hidden = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with('.'));
            if hidden {
                continue;
            }
            if path.is_dir() {
                self.collect(&path, out)?;
            } else if self.matches_extension(&path) {
                if let Ok(relative) = path.strip_prefix(&self.root) {
                    out.push(to_slashed(relative));
                }
            }
        }
        Ok(())
    }
}

fn to_slashed(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

impl FileStore for Vault {
    fn read_file(&self, path: &str) -> Result<String> {
        let full = self.resolve(path);
        fs::read_to_string(&full).map_err(|e| Error::io(full, e))
    }

    fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let full = self.resolve(path);
        fs::write(&full, content).map_err(|e| Error::io(&full, e))?;
        tracing::info!(path = %full.display(), bytes = content.len(), "wrote document");
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        self.collect(&self.root, &mut files)
            .map_err(|e| Error::io(&self.root, e))?;
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
#[path = "tests/vault.rs"]
mod tests;
