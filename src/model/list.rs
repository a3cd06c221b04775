//! List types.

use serde::{Deserialize, Serialize};

/// Number of nesting levels a list can render (top level included).
pub const MAX_LIST_DEPTH: usize = 3;

/// Marker that introduced a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMarker {
    /// `*` or `-`
    Bullet,
    /// `1.`, `2.`, ...
    Numbered,
}

impl ListMarker {
    /// HTML list element for a list opened by this marker.
    pub fn tag(&self) -> &'static str {
        match self {
            ListMarker::Bullet => "ul",
            ListMarker::Numbered => "ol",
        }
    }
}

/// A list item and its nested items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNode {
    /// Formatted item markup
    pub content: String,

    /// Marker of this item
    pub marker: ListMarker,

    /// Nested items
    pub children: Vec<ListNode>,
}

impl ListNode {
    /// Create a leaf item.
    pub fn new(content: impl Into<String>, marker: ListMarker) -> Self {
        Self {
            content: content.into(),
            marker,
            children: Vec::new(),
        }
    }

    /// Add a nested item.
    pub fn add_child(&mut self, child: ListNode) {
        self.children.push(child);
    }

    /// Total number of items in this subtree, this one included.
    pub fn total_items(&self) -> usize {
        1 + self.children.iter().map(ListNode::total_items).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(ListNode::depth).max().unwrap_or(0)
    }
}
