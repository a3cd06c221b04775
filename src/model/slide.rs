//! Slide-level types.

use super::SlideStats;
use serde::{Deserialize, Serialize};

/// A single rendered slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Position in the deck (0-indexed)
    pub index: usize,

    /// Rendered content markup
    pub content: String,

    /// Speaker notes, if the slide ends in HTML comments
    pub notes: Option<String>,

    /// Ids of the diagram containers in `content`, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagrams: Vec<String>,

    /// Content statistics for this slide
    #[serde(default)]
    pub stats: SlideStats,
}

impl Slide {
    /// Create a new slide.
    pub fn new(index: usize, content: impl Into<String>, notes: Option<String>) -> Self {
        Self {
            index,
            content: content.into(),
            notes,
            diagrams: Vec::new(),
            stats: SlideStats::default(),
        }
    }

    /// Attach diagram container ids and return self.
    pub fn with_diagrams(mut self, ids: Vec<String>) -> Self {
        self.diagrams = ids;
        self
    }

    /// Attach statistics and return self.
    pub fn with_stats(mut self, stats: SlideStats) -> Self {
        self.stats = stats;
        self
    }

    /// Slide number as shown to the audience (1-indexed).
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Check if the slide has speaker notes.
    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }

    /// Check if the slide renders nothing.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Ids of the diagram containers on this slide, in document order.
    pub fn diagram_ids(&self) -> &[String] {
        &self.diagrams
    }
}
