//! # mdpreso
//!
//! Markdown to presentation slide deck conversion for Rust.
//!
//! A single markdown document becomes an ordered deck of slides. Slides are
//! separated by `---` lines, carry optional speaker notes, and may contain
//! code blocks, diagrams, absolutely positioned regions, lists, tables and
//! background images.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdpreso::{parse_file, render};
//!
//! fn main() -> mdpreso::Result<()> {
//!     let deck = parse_file("talk.md")?;
//!
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&deck, &options)?;
//!     std::fs::write("talk.html", html)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Slides and notes**: `---` separators, trailing `<!-- ... -->` comments
//! - **Verbatim blocks**: code and diagram fences survive conversion untouched
//! - **Positioned regions**: nested absolutely positioned blocks
//! - **Structure**: nested lists, aligned tables, headings, blockquotes
//! - **Highlighting**: pluggable, concurrent and failure tolerant
//! - **Parallel processing**: uses Rayon for multi-slide documents
//! - **Output formats**: standalone HTML, JSON, plain-text notes

pub mod error;
pub mod fetch;
pub mod highlight;
pub mod model;
pub mod parser;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use fetch::{read_document, DocumentSource, FileSource};
pub use highlight::{Highlighter, NoHighlighter};
pub use model::{
    Alignment, BlockKind, BlockTable, Deck, DeckStats, ExtractedBlock, ListMarker, ListNode,
    Metadata, Placeholder, Slide, SlideStats, Table,
};
pub use parser::{DeckParser, ErrorMode, ParseOptions};
pub use render::{JsonFormat, RenderOptions, SlideSelection};
pub use session::{NavCommand, NavKey, NavigationModel, Presenter, ViewState};

#[cfg(feature = "async")]
pub use highlight::CommandHighlighter;

use std::path::Path;

/// Parse a markdown document held in memory.
///
/// # Example
///
/// ```
/// let deck = mdpreso::parse_str("# One\n---\n# Two").unwrap();
/// assert_eq!(deck.slide_count(), 2);
/// ```
pub fn parse_str(source: &str) -> Result<Deck> {
    DeckParser::new(source).parse()
}

/// Parse a markdown document held in memory with custom options.
///
/// # Example
///
/// ```
/// use mdpreso::{parse_str_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strict().sequential();
/// let deck = parse_str_with_options("# Title", options).unwrap();
/// assert_eq!(deck.slide_count(), 1);
/// ```
pub fn parse_str_with_options(source: &str, options: ParseOptions) -> Result<Deck> {
    DeckParser::with_options(source, options).parse()
}

/// Parse a markdown file.
///
/// # Example
///
/// ```no_run
/// use mdpreso::parse_file;
///
/// let deck = parse_file("talk.md").unwrap();
/// println!("Slides: {}", deck.slide_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Deck> {
    DeckParser::open(path)?.parse()
}

/// Parse a markdown file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Deck> {
    DeckParser::open_with_options(path, options)?.parse()
}

/// Parse a markdown document and highlight its code blocks.
///
/// Requests for all blocks are issued together. A block whose request
/// fails is rendered as plain code.
pub async fn parse_with_highlighter(
    source: &str,
    options: ParseOptions,
    highlighter: &dyn Highlighter,
) -> Result<Deck> {
    DeckParser::with_options(source, options)
        .parse_with_highlighter(highlighter)
        .await
}

/// Convert a markdown file to a standalone HTML page.
///
/// # Example
///
/// ```no_run
/// let html = mdpreso::to_html("talk.md").unwrap();
/// std::fs::write("talk.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let deck = parse_file(path)?;
    render::to_html(&deck, &RenderOptions::default())
}

/// Convert a markdown file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let deck = parse_file(path)?;
    render::to_json(&deck, format)
}

/// Builder for parsing and rendering slide decks.
///
/// # Example
///
/// ```no_run
/// use mdpreso::Mdpreso;
///
/// let html = Mdpreso::new()
///     .strict()
///     .with_diagram_keyword("mermaid")
///     .with_notes(false)
///     .parse("talk.md")?
///     .to_html()?;
/// # Ok::<(), mdpreso::Error>(())
/// ```
pub struct Mdpreso {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Mdpreso {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Fail on the first malformed slide instead of rendering it literally.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Set the fence keyword that marks diagram blocks.
    pub fn with_diagram_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_diagram_keyword(keyword);
        self
    }

    /// Set the maximum nesting depth of positioned blocks.
    pub fn with_max_nesting(mut self, depth: usize) -> Self {
        self.parse_options = self.parse_options.with_max_nesting(depth);
        self
    }

    /// Enable or disable the frontmatter block.
    pub fn with_frontmatter(mut self, enabled: bool) -> Self {
        self.parse_options = self.parse_options.with_frontmatter(enabled);
        self
    }

    /// Set slide selection for rendering.
    pub fn with_slides(mut self, selection: SlideSelection) -> Self {
        self.render_options = self.render_options.with_slides(selection);
        self
    }

    /// Include or drop speaker notes in HTML output.
    pub fn with_notes(mut self, include: bool) -> Self {
        self.render_options = self.render_options.with_notes(include);
        self
    }

    /// Load a diagram rendering script in HTML output.
    pub fn with_diagram_script(mut self, url: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_diagram_script(url);
        self
    }

    /// Parse a markdown file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<MdpresoResult> {
        let deck = DeckParser::open_with_options(path, self.parse_options)?.parse()?;
        Ok(MdpresoResult {
            deck,
            render_options: self.render_options,
        })
    }

    /// Parse a markdown document held in memory.
    pub fn parse_str(self, source: &str) -> Result<MdpresoResult> {
        let deck = DeckParser::with_options(source, self.parse_options).parse()?;
        Ok(MdpresoResult {
            deck,
            render_options: self.render_options,
        })
    }

    /// Parse a markdown document, highlighting code blocks.
    pub async fn parse_str_with_highlighter(
        self,
        source: &str,
        highlighter: &dyn Highlighter,
    ) -> Result<MdpresoResult> {
        let deck = DeckParser::with_options(source, self.parse_options)
            .parse_with_highlighter(highlighter)
            .await?;
        Ok(MdpresoResult {
            deck,
            render_options: self.render_options,
        })
    }
}

impl Default for Mdpreso {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a markdown document.
pub struct MdpresoResult {
    /// The parsed deck
    pub deck: Deck,
    /// Render options to use
    render_options: RenderOptions,
}

impl MdpresoResult {
    /// Render as a standalone HTML page.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.deck, &self.render_options)
    }

    /// Render the selected slides as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let deck = render::select_deck(&self.deck, &self.render_options.slide_selection)?;
        render::to_json(&deck, format)
    }

    /// Collect speaker notes as plain text.
    pub fn to_notes(&self) -> Result<String> {
        render::to_notes(&self.deck, &self.render_options)
    }

    /// Get the deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
}
