//! List detection and nested list rendering.

use once_cell::sync::Lazy;
use regex::Regex;

use super::inline::{format_inline, rewrite_links};
use super::Fragment;
use crate::model::{ListMarker, ListNode, SlideStats, MAX_LIST_DEPTH};

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([*\-]|\d+\.)\s+(.*)").unwrap());

/// Items collected for the list currently being read.
#[derive(Debug, Default)]
struct OpenList {
    items: Vec<ListNode>,
    /// Indentation of each open level, outermost first
    indents: Vec<usize>,
}

impl OpenList {
    fn push(&mut self, indent: usize, node: ListNode) {
        let level = self.level_for(indent);
        let mut siblings = &mut self.items;
        for _ in 0..level {
            if siblings.is_empty() {
                break;
            }
            let last = siblings.len() - 1;
            siblings = &mut siblings[last].children;
        }
        siblings.push(node);
    }

    /// Nesting level for an item at `indent`, updating the indent stack.
    ///
    /// A deeper indent opens one more level, up to [`MAX_LIST_DEPTH`]. A
    /// shallower indent closes levels until it reaches the nearest enclosing
    /// level whose indent is not greater, so `d` in `a / b / c / d` indented
    /// 0, 2, 4, 2 is a sibling of `b`, not a top-level item.
    fn level_for(&mut self, indent: usize) -> usize {
        while self.indents.len() > 1 && self.indents.last().is_some_and(|&top| indent < top) {
            self.indents.pop();
        }

        match self.indents.last() {
            None => {
                self.indents.push(indent);
                0
            }
            Some(&top) if indent > top => {
                if self.indents.len() < MAX_LIST_DEPTH {
                    self.indents.push(indent);
                }
                // Anything deeper than the last level stays on it.
                self.indents.len() - 1
            }
            Some(_) => self.indents.len() - 1,
        }
    }

    fn render(self, stats: &mut SlideStats) -> Option<Fragment> {
        if self.items.is_empty() {
            return None;
        }
        stats.list_count += 1;
        stats.list_item_count += self.items.iter().map(|n| n.total_items() as u32).sum::<u32>();

        let mut html = String::from(r#"<div class="content-block">"#);
        render_items(&self.items, &mut html);
        html.push_str("</div>");
        Some(Fragment::Html(html))
    }
}

fn render_items(items: &[ListNode], out: &mut String) {
    let tag = items.first().map_or("ul", |n| n.marker.tag());
    out.push_str(&format!(r#"<{} class="markdown-list">"#, tag));
    for item in items {
        out.push_str("<li>");
        out.push_str(&item.content);
        if !item.children.is_empty() {
            render_items(&item.children, out);
        }
        out.push_str("</li>");
    }
    out.push_str(&format!("</{}>", tag));
}

fn leading_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Turn list lines into rendered list blocks.
///
/// Any line that is not a list item closes the current list. Blank lines
/// are dropped; every other line is passed on unchanged.
pub fn build_lists(text: &str, stats: &mut SlideStats) -> Vec<Fragment> {
    let mut out = Vec::new();
    let mut open = OpenList::default();

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(caps) = LIST_ITEM.captures(trimmed) {
            let marker = if caps[1].ends_with('.') {
                ListMarker::Numbered
            } else {
                ListMarker::Bullet
            };
            let (content, images) = rewrite_links(&caps[2]);
            stats.image_count += images;
            open.push(leading_width(line), ListNode::new(format_inline(&content), marker));
            continue;
        }

        if let Some(list) = std::mem::take(&mut open).render(stats) {
            out.push(list);
        }
        if !trimmed.is_empty() {
            out.push(Fragment::Line(line.to_string()));
        }
    }

    if let Some(list) = open.render(stats) {
        out.push(list);
    }

    out
}
