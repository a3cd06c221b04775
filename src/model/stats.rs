//! Content statistics collected while building slides.

use serde::{Deserialize, Serialize};

/// Statistics for a single slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of lists (top-level)
    pub list_count: u32,

    /// Number of list items at any depth
    pub list_item_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of fenced code blocks
    pub code_block_count: u32,

    /// Number of fenced diagrams
    pub diagram_count: u32,

    /// Number of images (inline and styled)
    pub image_count: u32,

    /// Number of blockquotes
    pub blockquote_count: u32,

    /// Number of positioned text/div blocks
    pub positioned_count: u32,

    /// Approximate word count of the source text (whitespace-separated tokens)
    pub word_count: u32,
}

impl SlideStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add word counts from source text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &SlideStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.code_block_count += other.code_block_count;
        self.diagram_count += other.diagram_count;
        self.image_count += other.image_count;
        self.blockquote_count += other.blockquote_count;
        self.positioned_count += other.positioned_count;
        self.word_count += other.word_count;
    }
}

/// Statistics for a whole deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStats {
    /// Number of slides
    pub slide_count: u32,

    /// Number of slides carrying speaker notes
    pub notes_count: u32,

    /// Content totals over all slides
    #[serde(flatten)]
    pub content: SlideStats,
}

impl DeckStats {
    /// Fold one slide's statistics into the totals.
    pub fn merge(&mut self, slide: &SlideStats) {
        self.content.merge(slide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_stats_count_text() {
        let mut stats = SlideStats::new();
        stats.count_text("Hello, world! This is a test.");
        assert_eq!(stats.word_count, 6);
    }

    #[test]
    fn test_slide_stats_merge() {
        let mut stats1 = SlideStats::new();
        stats1.paragraph_count = 5;
        stats1.table_count = 2;

        let stats2 = SlideStats {
            paragraph_count: 3,
            table_count: 1,
            image_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.table_count, 3);
        assert_eq!(stats1.image_count, 4);
    }

    #[test]
    fn test_deck_stats_json_is_flat() {
        let mut deck = DeckStats::default();
        deck.merge(&SlideStats {
            code_block_count: 2,
            ..Default::default()
        });
        let json = serde_json::to_string(&deck).unwrap();
        assert!(json.contains("\"code_block_count\":2"));
        assert!(!json.contains("\"content\""));
    }
}
