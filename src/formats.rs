//! Format trait and implementations for different document types.
//!
//! A format names the tree-sitter grammar for a kind of document and says how
//! its syntax nodes map onto sections: which nodes merely contain blocks,
//! which are headings, paragraphs or other blocks, and which to ignore.

pub mod markdown;

/// How a syntax node takes part in the section list.
pub enum BlockClass {
    /// Holds blocks; walk into its children.
    Container,
    /// A heading section.
    Heading,
    /// A paragraph section.
    Paragraph,
    /// Some other block, reported opaquely.
    Other,
    /// Not a block; ignore it.
    Skip,
}

/// Grammar and node classification for one document format.
pub trait Format {
    /// Tree-sitter grammar for the format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing heading text as `@title`.
    fn title_query(&self) -> &str;
    /// Classify a node by its kind.
    fn classify(&self, kind: &str) -> BlockClass;
    /// Level of a heading node, 1 to 6.
    fn heading_level(&self, node: tree_sitter::Node<'_>) -> usize;
}
