//! Main deck parser implementation.

use std::path::Path;

use futures::future::join_all;
use rayon::prelude::*;
use regex::Regex;

use super::extract::{diagram_fence, extract_fences, extract_notes};
use super::frontmatter::{collect_image_urls, parse_frontmatter};
use super::restore::{restore_blocks, restore_blocks_with};
use super::rewrite::Converter;
use super::splitter::{normalize, split_slides};
use super::{ErrorMode, ParseOptions};
use crate::error::Result;
use crate::fetch;
use crate::highlight::Highlighter;
use crate::model::{BlockKind, BlockTable, Deck, Slide, SlideStats};

/// A slide whose markup still contains code and diagram placeholders.
#[derive(Debug)]
struct SlideDraft {
    index: usize,
    html: String,
    blocks: BlockTable,
    notes: Option<String>,
    stats: SlideStats,
}

impl SlideDraft {
    fn finish(self, html: String) -> Slide {
        Slide::new(self.index, html, self.notes)
            .with_diagrams(self.blocks.diagram_ids())
            .with_stats(self.stats)
    }
}

/// Markdown deck parser.
#[derive(Debug, Clone)]
pub struct DeckParser {
    source: String,
    options: ParseOptions,
}

impl DeckParser {
    /// Create a parser over markdown text.
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    /// Create a parser over markdown text with custom options.
    pub fn with_options(source: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            source: source.into(),
            options,
        }
    }

    /// Open a markdown file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a markdown file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let source = fetch::read_document(path.as_ref())?;
        Ok(Self::with_options(source, options))
    }

    /// Parse options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse the document into a deck, leaving code unhighlighted.
    pub fn parse(&self) -> Result<Deck> {
        let (mut deck, segments, fence) = self.prepare()?;

        let drafts: Vec<SlideDraft> = if self.options.parallel {
            segments
                .par_iter()
                .enumerate()
                .map(|(index, segment)| self.draft(index, segment, &fence))
                .collect::<Result<Vec<_>>>()?
        } else {
            segments
                .iter()
                .enumerate()
                .map(|(index, segment)| self.draft(index, segment, &fence))
                .collect::<Result<Vec<_>>>()?
        };

        let keyword = self.options.diagram_keyword.as_str();
        for draft in drafts {
            let html = restore_blocks(&draft.html, &draft.blocks, keyword);
            deck.add_slide(draft.finish(html));
        }
        Ok(deck)
    }

    /// Parse the document into a deck, highlighting tagged code blocks.
    ///
    /// Slides and the code blocks inside them are restored concurrently on
    /// the calling task. Slides keep document order regardless of which
    /// request finishes first.
    pub async fn parse_with_highlighter(&self, highlighter: &dyn Highlighter) -> Result<Deck> {
        let (mut deck, segments, fence) = self.prepare()?;

        let drafts = segments
            .iter()
            .enumerate()
            .map(|(index, segment)| self.draft(index, segment, &fence))
            .collect::<Result<Vec<_>>>()?;

        let keyword = self.options.diagram_keyword.as_str();
        let restored = join_all(drafts.iter().map(|draft| {
            restore_blocks_with(&draft.html, &draft.blocks, keyword, highlighter)
        }))
        .await;

        for (draft, html) in drafts.into_iter().zip(restored) {
            deck.add_slide(draft.finish(html));
        }
        Ok(deck)
    }

    /// Read metadata and image URLs, then split the body into segments.
    fn prepare(&self) -> Result<(Deck, Vec<String>, Regex)> {
        let fence = diagram_fence(&self.options.diagram_keyword)?;
        let text = normalize(&self.source);

        let mut deck = Deck::new();
        deck.image_urls = collect_image_urls(&text);

        let body = if self.options.frontmatter {
            let frontmatter = parse_frontmatter(&text);
            deck.metadata = frontmatter.metadata;
            frontmatter.body
        } else {
            text
        };

        let segments = split_slides(&body);
        log::debug!(
            "Split document into {} slides ({} images referenced)",
            segments.len(),
            deck.image_urls.len()
        );
        Ok((deck, segments, fence))
    }

    /// Run every stage up to placeholder resolution on one segment.
    fn draft(&self, index: usize, segment: &str, fence: &Regex) -> Result<SlideDraft> {
        let split = extract_notes(segment);

        let mut blocks = BlockTable::new();
        let text = extract_fences(&split.content, index, fence, &mut blocks);

        let mut converter = Converter::new(&self.options);
        let (html, mut stats) = match converter.convert(&text) {
            Ok(html) => (html, converter.into_stats()),
            Err(e) => match self.options.error_mode {
                ErrorMode::Strict => return Err(e),
                ErrorMode::Lenient => {
                    log::warn!("Slide {}: {}; rendering it as plain text", index + 1, e);
                    blocks = BlockTable::new();
                    literal(&split.content)
                }
            },
        };

        stats.code_block_count += blocks.count(BlockKind::Code) as u32;
        stats.diagram_count += blocks.count(BlockKind::Diagram) as u32;
        stats.count_text(&split.content);

        Ok(SlideDraft {
            index,
            html,
            blocks,
            notes: split.notes,
            stats,
        })
    }
}

/// Escaped paragraphs of the raw slide text, one per non-blank line.
fn literal(content: &str) -> (String, SlideStats) {
    let mut stats = SlideStats::new();
    let html = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            stats.paragraph_count += 1;
            format!(
                r#"<div class="content-block"><p>{}</p></div>"#,
                html_escape::encode_text(line)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    (html, stats)
}
