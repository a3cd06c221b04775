//! Markdown parsing module.
//!
//! A deck is built in stages. The document is split into slide segments,
//! each segment has its verbatim regions pulled out into a [`BlockTable`],
//! the residual text is classified into lists, tables and lines, the lines
//! are rewritten into markup, and finally the placeholder tokens are
//! resolved back into code and diagram containers.
//!
//! [`BlockTable`]: crate::model::BlockTable

mod deck_parser;
mod extract;
mod frontmatter;
mod inline;
mod lists;
mod options;
mod restore;
mod rewrite;
mod splitter;
mod tables;

pub use deck_parser::DeckParser;
pub use extract::{diagram_fence, extract_fences, extract_notes, extract_positioned, NotesSplit};
pub use frontmatter::{collect_image_urls, parse_frontmatter, Frontmatter};
pub use inline::{format_inline, rewrite_links};
pub use lists::build_lists;
pub use options::{ErrorMode, ParseOptions, DEFAULT_DIAGRAM_KEYWORD, DEFAULT_MAX_NESTING_DEPTH};
pub use restore::{restore_blocks, restore_blocks_with};
pub use rewrite::Converter;
pub use splitter::{normalize, split_slides};
pub use tables::build_tables;

/// A unit of slide text between classification stages.
///
/// Lists and tables are rendered as soon as they are recognized; the
/// remaining lines wait for the rewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Raw markdown line not yet classified
    Line(String),
    /// Finished markup that later stages must not touch
    Html(String),
}

impl Fragment {
    /// Raw line text, if this fragment is still raw.
    pub fn as_line(&self) -> Option<&str> {
        match self {
            Fragment::Line(line) => Some(line),
            Fragment::Html(_) => None,
        }
    }
}
