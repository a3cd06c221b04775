//! Extracted verbatim blocks and the placeholder tokens standing in for them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an extracted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Fenced code
    Code,
    /// Fenced diagram
    Diagram,
    /// `<text{…}>` or `<div{…}>` positioned block
    Positioned,
}

impl BlockKind {
    /// Tag used inside placeholder tokens.
    pub fn tag(&self) -> &'static str {
        match self {
            BlockKind::Code => "CODE",
            BlockKind::Diagram => "DIAGRAM",
            BlockKind::Positioned => "POSITIONED",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "CODE" => Some(BlockKind::Code),
            "DIAGRAM" => Some(BlockKind::Diagram),
            "POSITIONED" => Some(BlockKind::Positioned),
            _ => None,
        }
    }
}

/// Delimiter around placeholder tokens.
///
/// A private-use character, so no token can appear in author text once the
/// document is normalized.
pub const TOKEN_MARK: char = '\u{E000}';

/// A placeholder token: a kind tag plus a per-slide sequential index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placeholder {
    /// Kind of the extracted block
    pub kind: BlockKind,
    /// Index among blocks of the same kind on this slide
    pub index: usize,
}

impl Placeholder {
    /// Create a placeholder.
    pub fn new(kind: BlockKind, index: usize) -> Self {
        Self { kind, index }
    }

    /// Parse a token such as `\u{E000}CODE-BLOCK-3\u{E000}`.
    pub fn parse(token: &str) -> Option<Self> {
        let inner = token.strip_prefix(TOKEN_MARK)?.strip_suffix(TOKEN_MARK)?;
        let (tag, index) = inner.split_once("-BLOCK-")?;
        Some(Self {
            kind: BlockKind::from_tag(tag)?,
            index: index.parse().ok()?,
        })
    }

    /// Token text inserted into the slide.
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{mark}{}-BLOCK-{}{mark}",
            self.kind.tag(),
            self.index,
            mark = TOKEN_MARK
        )
    }
}

/// A region captured verbatim during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExtractedBlock {
    /// Fenced code with an optional language tag
    Code {
        /// Language tag after the opening fence
        language: Option<String>,
        /// Body, byte-for-byte
        source: String,
    },
    /// Fenced diagram
    Diagram {
        /// Container id, unique within the deck
        id: String,
        /// Body, byte-for-byte
        source: String,
    },
    /// Absolutely positioned block
    Positioned {
        /// Style string from the `{…}` attribute block
        style: String,
        /// Inner markdown, converted later
        inner: String,
    },
}

impl ExtractedBlock {
    /// Kind of this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            ExtractedBlock::Code { .. } => BlockKind::Code,
            ExtractedBlock::Diagram { .. } => BlockKind::Diagram,
            ExtractedBlock::Positioned { .. } => BlockKind::Positioned,
        }
    }
}

/// Slide-local table of extracted blocks, one sequence per kind.
#[derive(Debug, Clone, Default)]
pub struct BlockTable {
    code: Vec<ExtractedBlock>,
    diagrams: Vec<ExtractedBlock>,
    positioned: Vec<ExtractedBlock>,
}

impl BlockTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a block and return the placeholder that refers to it.
    pub fn insert(&mut self, block: ExtractedBlock) -> Placeholder {
        let kind = block.kind();
        let slot = self.slot_mut(kind);
        slot.push(block);
        Placeholder::new(kind, slot.len() - 1)
    }

    /// Look up the block behind a placeholder.
    pub fn get(&self, placeholder: Placeholder) -> Option<&ExtractedBlock> {
        self.slot(placeholder.kind).get(placeholder.index)
    }

    /// Number of blocks of a kind.
    pub fn count(&self, kind: BlockKind) -> usize {
        self.slot(kind).len()
    }

    /// Blocks of a kind, in extraction order.
    pub fn iter(&self, kind: BlockKind) -> impl Iterator<Item = &ExtractedBlock> {
        self.slot(kind).iter()
    }

    /// Container ids of the extracted diagrams, in extraction order.
    pub fn diagram_ids(&self) -> Vec<String> {
        self.iter(BlockKind::Diagram)
            .filter_map(|block| match block {
                ExtractedBlock::Diagram { id, .. } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.diagrams.is_empty() && self.positioned.is_empty()
    }

    fn slot(&self, kind: BlockKind) -> &Vec<ExtractedBlock> {
        match kind {
            BlockKind::Code => &self.code,
            BlockKind::Diagram => &self.diagrams,
            BlockKind::Positioned => &self.positioned,
        }
    }

    fn slot_mut(&mut self, kind: BlockKind) -> &mut Vec<ExtractedBlock> {
        match kind {
            BlockKind::Code => &mut self.code,
            BlockKind::Diagram => &mut self.diagrams,
            BlockKind::Positioned => &mut self.positioned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_token_roundtrip() {
        let p = Placeholder::new(BlockKind::Diagram, 12);
        assert_eq!(p.token(), "\u{E000}DIAGRAM-BLOCK-12\u{E000}");
        assert_eq!(Placeholder::parse("\u{E000}DIAGRAM-BLOCK-12\u{E000}"), Some(p));
        assert_eq!(Placeholder::parse("\u{E000}TABLE-BLOCK-1\u{E000}"), None);
        assert_eq!(Placeholder::parse("\u{E000}CODE-BLOCK-x\u{E000}"), None);
    }

    #[test]
    fn test_typed_token_text_is_not_a_placeholder() {
        assert_eq!(Placeholder::parse("@@CODE-BLOCK-0@@"), None);
    }

    #[test]
    fn test_block_table_counters_are_per_kind() {
        let mut table = BlockTable::new();
        let c0 = table.insert(ExtractedBlock::Code {
            language: None,
            source: "a".into(),
        });
        let d0 = table.insert(ExtractedBlock::Diagram {
            id: "diagram-0-0".into(),
            source: "graph TD".into(),
        });
        let c1 = table.insert(ExtractedBlock::Code {
            language: Some("rust".into()),
            source: "b".into(),
        });

        assert_eq!(c0, Placeholder::new(BlockKind::Code, 0));
        assert_eq!(d0, Placeholder::new(BlockKind::Diagram, 0));
        assert_eq!(c1, Placeholder::new(BlockKind::Code, 1));
        assert_eq!(table.count(BlockKind::Code), 2);
        assert!(table.get(Placeholder::new(BlockKind::Code, 2)).is_none());
        assert!(!table.is_empty());
        assert_eq!(table.diagram_ids(), vec!["diagram-0-0".to_string()]);
    }
}
