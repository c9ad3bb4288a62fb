//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides the tree-sitter queries and node classification for
//! markdown documents: ATX (`#`) and setext headings, top-level paragraphs,
//! and everything else (lists, code, quotes, front matter) as opaque blocks.

use crate::error::Result;
use crate::formats::{BlockClass, Format};
use crate::input;
use crate::section::{SectionIndex, SectionSource};

/// Tree-sitter queries for markdown block structure.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn title_query(&self) -> &'static str {
        "(atx_heading (inline) @title)"
    }

    fn classify(&self, kind: &str) -> BlockClass {
        match kind {
            "document" | "section" => BlockClass::Container,
            "atx_heading" | "setext_heading" => BlockClass::Heading,
            "paragraph" => BlockClass::Paragraph,
            "block_continuation" => BlockClass::Skip,
            _ => BlockClass::Other,
        }
    }

    fn heading_level(&self, node: tree_sitter::Node<'_>) -> usize {
        let mut cursor = node.walk();
        let level = node.children(&mut cursor).find_map(|child| match child.kind() {
            "atx_h1_marker" | "setext_h1_underline" => Some(1),
            "atx_h2_marker" | "setext_h2_underline" => Some(2),
            "atx_h3_marker" => Some(3),
            "atx_h4_marker" => Some(4),
            "atx_h5_marker" => Some(5),
            "atx_h6_marker" => Some(6),
            _ => None,
        });
        level.unwrap_or(1)
    }
}

impl SectionSource for MarkdownFormat {
    fn sections(&self, text: &str) -> Result<SectionIndex> {
        input::extract_sections(text, self)
    }
}
