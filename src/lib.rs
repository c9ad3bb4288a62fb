//! transporter: section-aware selection and block references across plain-text notes.
//!
//! The engine works on a snapshot of a document's sections ([`section::SectionIndex`])
//! and an editor-like [`buffer::LineBuffer`]. On top of those it provides:
//!
//! - [`locate`]: which section a line falls in, or the nearest one to it
//! - [`expand`]: growing a selection line, block, then block by block
//! - [`block_ref`]: stable ` ^id` block references and `![[name#^id]]` embeds
//! - [`transfer`]: pushing and pulling lines and references between documents
//!
//! [`commands`] binds these to an explicit [`document::Document`] and the
//! host's collaborators: a [`transfer::FileStore`] such as [`vault::Vault`],
//! a [`transfer::Chooser`] such as [`ui::TerminalChooser`], and a [`sink::Sink`].

pub mod block_id;
pub mod block_ref;
pub mod buffer;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod expand;
pub mod formats;
pub mod input;
pub mod locate;
pub mod section;
pub mod sink;
pub mod transfer;
pub mod ui;
pub mod vault;

#[cfg(test)]
#[path = "tests/support.rs"]
mod support;
