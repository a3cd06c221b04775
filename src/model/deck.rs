//! Deck-level types.

use super::{DeckStats, Slide};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A parsed slide deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Deck metadata (title, author, background, etc.)
    pub metadata: Metadata,

    /// Slides in presentation order
    pub slides: Vec<Slide>,

    /// Every image source referenced by the document, deduplicated
    pub image_urls: BTreeSet<String>,

    /// Aggregated content statistics
    pub stats: DeckStats,
}

impl Deck {
    /// Create a new empty deck.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            slides: Vec::new(),
            image_urls: BTreeSet::new(),
            stats: DeckStats::default(),
        }
    }

    /// Get the number of slides in the deck.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get a slide by number (1-indexed).
    pub fn get_slide(&self, number: usize) -> Option<&Slide> {
        if number == 0 {
            return None;
        }
        self.slides.get(number - 1)
    }

    /// Add a slide to the deck, folding its statistics into the totals.
    pub fn add_slide(&mut self, slide: Slide) {
        self.stats.merge(&slide.stats);
        self.stats.slide_count += 1;
        if slide.has_notes() {
            self.stats.notes_count += 1;
        }
        self.slides.push(slide);
    }

    /// Check if the deck has any slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Speaker notes of every slide that has them, as `(number, notes)`.
    pub fn notes(&self) -> Vec<(usize, &str)> {
        self.slides
            .iter()
            .filter_map(|s| s.notes.as_deref().map(|n| (s.number(), n)))
            .collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Deck metadata, taken from the frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Page background color
    pub bgcolor: Option<String>,

    /// Page background image URL
    pub bgimage: Option<String>,

    /// Auto-refresh interval in seconds
    pub refresh: Option<u64>,

    /// Any other keys found in the frontmatter block
    pub extra: BTreeMap<String, String>,
}

impl Metadata {
    /// Check if no metadata was set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.bgcolor.is_none()
            && self.bgimage.is_none()
            && self.refresh.is_none()
            && self.extra.is_empty()
    }

    /// Inline CSS for the page body built from the background settings.
    pub fn body_style(&self) -> Option<String> {
        let mut rules = Vec::new();
        if let Some(ref color) = self.bgcolor {
            rules.push(format!("background-color: {}", color));
        }
        if let Some(ref image) = self.bgimage {
            rules.push(format!("background-image: url('{}')", image));
            rules.push("background-size: cover".to_string());
            rules.push("background-position: center".to_string());
            rules.push("background-repeat: no-repeat".to_string());
        }
        if rules.is_empty() {
            None
        } else {
            Some(rules.join("; "))
        }
    }
}
