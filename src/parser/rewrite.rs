//! Line rewriting: the last stage before placeholders are resolved.
//!
//! [`Converter`] drives one nesting level of a slide: positioned blocks are
//! pulled out, lists and tables are rendered, and the remaining lines are
//! rewritten one at a time. Positioned blocks re-enter the converter one
//! level deeper.
//!
//! Positioned blocks of every level share one table, so a block captured
//! inside another block's raw content still resolves when that content is
//! converted.

use once_cell::sync::Lazy;
use regex::Regex;

use super::extract::extract_positioned;
use super::inline::{format_inline, rewrite_links};
use super::lists::build_lists;
use super::tables::build_tables;
use super::{Fragment, ParseOptions};
use crate::error::{Error, Result};
use crate::model::{BlockKind, BlockTable, ExtractedBlock, Placeholder, SlideStats};

static BACKGROUND: Lazy<Regex> = Lazy::new(|| Regex::new(r"^background\s*\{([^}]*)\}").unwrap());

const HEADINGS: [(&str, u8); 3] = [("# ", 1), ("## ", 2), ("### ", 3)];

/// Prefixes of markup that already forms a block on its own.
const BLOCK_PREFIXES: [&str; 3] = [
    r#"<div class="content-block">"#,
    r#"<div class="slide-background""#,
    "<img ",
];

/// Converts slide text (with code and diagram placeholders) into markup.
#[derive(Debug)]
pub struct Converter<'a> {
    options: &'a ParseOptions,
    positioned: BlockTable,
    stats: SlideStats,
}

impl<'a> Converter<'a> {
    /// Create a converter for one slide.
    pub fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            positioned: BlockTable::new(),
            stats: SlideStats::default(),
        }
    }

    /// Convert the top level of a slide.
    pub fn convert(&mut self, text: &str) -> Result<String> {
        self.convert_at(text, 0)
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> &SlideStats {
        &self.stats
    }

    /// Consume the converter and return its statistics.
    pub fn into_stats(self) -> SlideStats {
        self.stats
    }

    fn convert_at(&mut self, text: &str, depth: usize) -> Result<String> {
        let limit = self.options.max_nesting_depth;
        if depth > limit {
            return Err(Error::NestingTooDeep { depth, limit });
        }

        let text = extract_positioned(text, &mut self.positioned);

        let fragments = build_lists(&text, &mut self.stats);
        let fragments = build_tables(fragments, &mut self.stats);

        let mut blocks = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            match fragment {
                Fragment::Html(html) => blocks.push(html),
                Fragment::Line(line) => {
                    if let Some(html) = self.rewrite_line(&line, depth)? {
                        blocks.push(html);
                    }
                }
            }
        }
        Ok(blocks.join("\n"))
    }

    fn rewrite_line(&mut self, line: &str, depth: usize) -> Result<Option<String>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if let Some(placeholder) = Placeholder::parse(line) {
            if placeholder.kind == BlockKind::Positioned {
                if let Some(ExtractedBlock::Positioned { style, inner }) =
                    self.positioned.get(placeholder).cloned()
                {
                    self.stats.positioned_count += 1;
                    let inner = self.convert_at(&inner, depth + 1)?;
                    return Ok(Some(format!(
                        r#"<div style="position: absolute; {}">{}</div>"#,
                        style, inner
                    )));
                }
            }
            // Code and diagram tokens wait for the restorer.
            return Ok(Some(line.to_string()));
        }

        for (prefix, level) in HEADINGS {
            if let Some(text) = line.strip_prefix(prefix) {
                self.stats.heading_count += 1;
                let text = self.links(text);
                return Ok(Some(format!(
                    r#"<div class="content-block"><h{0}>{1}</h{0}></div>"#,
                    level, text
                )));
            }
        }

        if let Some(text) = line.strip_prefix("> ") {
            self.stats.blockquote_count += 1;
            let text = self.links(text);
            return Ok(Some(format!(
                r#"<div class="content-block"><blockquote>{}</blockquote></div>"#,
                text
            )));
        }

        let line = BACKGROUND.replace(line, r#"<div class="slide-background" style="$1"></div>"#);
        let line = self.links(&line);

        if BLOCK_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
            return Ok(Some(line));
        }

        self.stats.paragraph_count += 1;
        Ok(Some(format!(
            r#"<div class="content-block"><p>{}</p></div>"#,
            format_inline(&line)
        )))
    }

    fn links(&mut self, text: &str) -> String {
        let (html, images) = rewrite_links(text);
        self.stats.image_count += images;
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(text: &str) -> String {
        let options = ParseOptions::default();
        Converter::new(&options).convert(text).unwrap()
    }

    #[test]
    fn test_headings() {
        assert_eq!(
            convert("# One\n## Two\n### Three\n#### Four"),
            concat!(
                r#"<div class="content-block"><h1>One</h1></div>"#,
                "\n",
                r#"<div class="content-block"><h2>Two</h2></div>"#,
                "\n",
                r#"<div class="content-block"><h3>Three</h3></div>"#,
                "\n",
                r#"<div class="content-block"><p>#### Four</p></div>"#
            )
        );
    }

    #[test]
    fn test_paragraph_formatting_only_in_paragraphs() {
        assert_eq!(
            convert("# **Title**\nsome **bold** text"),
            concat!(
                r#"<div class="content-block"><h1>**Title**</h1></div>"#,
                "\n",
                r#"<div class="content-block"><p>some <strong>bold</strong> text</p></div>"#
            )
        );
    }

    #[test]
    fn test_blockquote_and_links() {
        assert_eq!(
            convert("> see [here](https://x.y)"),
            concat!(
                r#"<div class="content-block"><blockquote>"#,
                r#"see <a href="https://x.y">here</a></blockquote></div>"#
            )
        );
        assert_eq!(
            convert("[home](/) is *nice*"),
            r#"<div class="content-block"><p><a href="/">home</a> is <em>nice</em></p></div>"#
        );
    }

    #[test]
    fn test_link_urls_are_not_formatted() {
        assert_eq!(
            convert("see [_docs_](https://x.io/_private_/page) now"),
            concat!(
                r#"<div class="content-block"><p>see "#,
                r#"<a href="https://x.io/_private_/page"><em>docs</em></a> now</p></div>"#
            )
        );
        let html = convert("see ![a](img/**b**.png) **c**");
        assert!(html.contains(r#"src="img/**b**.png""#));
        assert!(html.contains("<strong>c</strong>"));
    }

    #[test]
    fn test_background_and_images_are_blocks() {
        assert_eq!(
            convert("background{background-color: #000}"),
            r#"<div class="slide-background" style="background-color: #000"></div>"#
        );
        assert_eq!(
            convert("![a](b.png){position: absolute; top: 0}"),
            r#"<img src="b.png" alt="a" style="position: absolute; top: 0">"#
        );
        assert!(convert("![a](b.png)")
            .starts_with(r#"<div class="content-block"><img src="b.png""#));
    }

    #[test]
    fn test_html_like_line_is_kept_as_paragraph() {
        assert_eq!(
            convert("<span>raw</span>"),
            r#"<div class="content-block"><p><span>raw</span></p></div>"#
        );
    }

    #[test]
    fn test_placeholders_pass_through() {
        let token = Placeholder::new(BlockKind::Code, 0).token();
        assert_eq!(
            convert(&format!("a\n{}\nb", token)),
            format!(
                "{}\n{}\n{}",
                r#"<div class="content-block"><p>a</p></div>"#,
                token,
                r#"<div class="content-block"><p>b</p></div>"#
            )
        );
    }

    #[test]
    fn test_typed_token_is_paragraph_text() {
        assert_eq!(
            convert("literal @@CODE-BLOCK-0@@ text"),
            r#"<div class="content-block"><p>literal @@CODE-BLOCK-0@@ text</p></div>"#
        );
    }

    #[test]
    fn test_positioned_block_is_converted_recursively() {
        let html = convert("<text{top: 10%; left: 5%}>\n## Inner\n- item\n</text>");
        assert_eq!(
            html,
            concat!(
                r#"<div style="position: absolute; top: 10%; left: 5%">"#,
                r#"<div class="content-block"><h2>Inner</h2></div>"#,
                "\n",
                r#"<div class="content-block"><ul class="markdown-list"><li>item</li></ul></div>"#,
                "</div>"
            )
        );
    }

    #[test]
    fn test_nesting_limit() {
        let options = ParseOptions::default().with_max_nesting(1);
        let text = "<text{top: 0}><div{left: 0}>deep</div></text>";

        let err = Converter::new(&options).convert(text).unwrap_err();
        assert!(matches!(err, Error::NestingTooDeep { depth: 2, limit: 1 }));

        let html = Converter::new(&ParseOptions::default()).convert(text).unwrap();
        assert!(html.contains(r#"<div style="position: absolute; left: 0">"#));
        assert!(html.contains("<p>deep</p>"));
    }

    #[test]
    fn test_text_inside_div() {
        let html = convert("<div{right: 0}><text{top: 0}>inner</text></div>");
        assert!(html.starts_with(r#"<div style="position: absolute; right: 0">"#));
        assert!(html.contains(concat!(
            r#"<div style="position: absolute; top: 0">"#,
            r#"<div class="content-block"><p>inner</p></div></div>"#
        )));
        assert!(!html.contains(crate::model::TOKEN_MARK));
    }

    #[test]
    fn test_stats() {
        let options = ParseOptions::default();
        let mut converter = Converter::new(&options);
        converter
            .convert("# T\npara\n> quote\n- a\n  - b\n![x](y.png)\n| A |\n|---|\n| 1 |")
            .unwrap();
        let stats = converter.into_stats();

        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.blockquote_count, 1);
        assert_eq!(stats.list_count, 1);
        assert_eq!(stats.list_item_count, 2);
        assert_eq!(stats.image_count, 1);
        assert_eq!(stats.table_count, 1);
    }
}
