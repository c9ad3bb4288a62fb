//! Error types shared by the engine, the host adapters and the binary.
//!
//! Lookups that simply find nothing (no enclosing section, no next block) are
//! modelled as `Option` by the engine itself. The variants here are the cases a
//! caller has to react to: telling the user there is nothing to reference, or
//! surfacing a failed whole-file read or write.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
/// Failures surfaced by transporter operations.
pub enum Error {
    /// The cursor line is not covered by any section and no nearby section exists.
    #[error("line {line} is not a heading or block of text")]
    NoEnclosingSection {
        /// Zero-based line the lookup started from.
        line: usize,
    },

    /// The enclosing section is a block kind that cannot carry a block reference.
    #[error("line {line} is inside a {kind} block, which cannot be referenced")]
    NotReferenceable {
        /// Zero-based line the lookup started from.
        line: usize,
        /// Block kind reported by the section index.
        kind: String,
    },

    /// A requested line lies outside the document.
    #[error("line {line} is out of range for a document of {len} lines")]
    LineOutOfRange {
        /// Zero-based line that was requested.
        line: usize,
        /// Number of lines in the document.
        len: usize,
    },

    /// A section snapshot overlaps or is out of order.
    #[error("section {index} overlaps or precedes the section before it")]
    UnorderedSections {
        /// Position of the offending section in the snapshot.
        index: usize,
    },

    /// Reading or writing a whole file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying error from the filesystem.
        #[source]
        source: std::io::Error,
    },

    /// The markup grammar could not be loaded.
    #[error("failed to load grammar: {0}")]
    Language(String),

    /// The markup parser produced no tree for a document.
    #[error("failed to parse document")]
    Parse,

    /// Command output could not be serialised.
    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
