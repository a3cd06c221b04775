//! Placeholder resolution.
//!
//! Tokens are located in a single pass over the finished markup. The text
//! between tokens is copied as-is and replacement markup is never scanned
//! again, so block bodies that happen to contain token-like text survive.

use futures::future::join_all;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::highlight::Highlighter;
use crate::model::{BlockTable, ExtractedBlock, Placeholder};

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x{E000}(?:CODE|DIAGRAM|POSITIONED)-BLOCK-\d+\x{E000}").unwrap()
});

enum Piece<'a> {
    Text(&'a str),
    Token(&'a str),
}

fn split_tokens(html: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in TOKEN.find_iter(html) {
        if m.start() > last {
            pieces.push(Piece::Text(&html[last..m.start()]));
        }
        pieces.push(Piece::Token(m.as_str()));
        last = m.end();
    }
    if last < html.len() {
        pieces.push(Piece::Text(&html[last..]));
    }
    pieces
}

fn escape(source: &str) -> String {
    html_escape::encode_text(source).into_owned()
}

fn plain_code(source: &str) -> String {
    format!(
        r#"<div class="content-block"><pre><code>{}</code></pre></div>"#,
        escape(source)
    )
}

fn fallback_code(source: &str, language: &str) -> String {
    format!(
        r#"<div class="content-block"><pre><code class="language-{}">{}</code></pre></div>"#,
        language,
        escape(source)
    )
}

fn diagram(id: &str, source: &str, keyword: &str) -> String {
    format!(
        r#"<div class="content-block mermaid-container"><div class="{}" id="{}">{}</div></div>"#,
        keyword,
        id,
        escape(source)
    )
}

/// Markup for a token that needs no highlighting request.
fn render_token(token: &str, blocks: &BlockTable, keyword: &str) -> String {
    match Placeholder::parse(token).and_then(|p| blocks.get(p)) {
        Some(ExtractedBlock::Diagram { id, source }) => diagram(id, source, keyword),
        Some(ExtractedBlock::Code { source, .. }) => plain_code(source),
        _ => {
            log::warn!("No block recorded for {}, rendering it as text", token);
            plain_code(token)
        }
    }
}

/// Resolve every placeholder without highlighting.
pub fn restore_blocks(html: &str, blocks: &BlockTable, keyword: &str) -> String {
    let mut out = String::with_capacity(html.len());
    for piece in split_tokens(html) {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Token(token) => out.push_str(&render_token(token, blocks, keyword)),
        }
    }
    out
}

/// Code block that should go to the highlighter, if any.
fn highlight_request<'a>(
    token: &str,
    blocks: &'a BlockTable,
    highlighter: &dyn Highlighter,
) -> Option<(&'a str, &'a str)> {
    match Placeholder::parse(token).and_then(|p| blocks.get(p)) {
        Some(ExtractedBlock::Code {
            language: Some(language),
            source,
        }) if highlighter.supports(language) => Some((source.as_str(), language.as_str())),
        _ => None,
    }
}

async fn highlight_block(highlighter: &dyn Highlighter, source: &str, language: &str) -> String {
    match highlighter.highlight(source, language).await {
        Ok(markup) => format!(r#"<div class="content-block">{}</div>"#, markup),
        Err(e) => {
            log::warn!("{}", e);
            fallback_code(source, language)
        }
    }
}

/// Resolve every placeholder, highlighting tagged code blocks.
///
/// All requests of the slide run concurrently. Each result is written at
/// its own token's position, whatever order the requests finish in.
pub async fn restore_blocks_with(
    html: &str,
    blocks: &BlockTable,
    keyword: &str,
    highlighter: &dyn Highlighter,
) -> String {
    let pieces = split_tokens(html);

    let requests = pieces.iter().filter_map(|piece| match piece {
        Piece::Token(token) => highlight_request(token, blocks, highlighter)
            .map(|(source, language)| highlight_block(highlighter, source, language)),
        Piece::Text(_) => None,
    });
    let mut highlighted = join_all(requests).await.into_iter();

    let mut out = String::with_capacity(html.len());
    for piece in &pieces {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Token(token) => match highlight_request(token, blocks, highlighter) {
                Some((source, _)) => match highlighted.next() {
                    Some(markup) => out.push_str(&markup),
                    None => out.push_str(&plain_code(source)),
                },
                None => out.push_str(&render_token(token, blocks, keyword)),
            },
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::model::BlockKind;
    use async_trait::async_trait;
    use futures::executor::block_on;

    fn code(index: usize) -> String {
        Placeholder::new(BlockKind::Code, index).token()
    }

    struct Upper;

    #[async_trait]
    impl Highlighter for Upper {
        async fn highlight(&self, source: &str, language: &str) -> Result<String> {
            if language == "broken" {
                return Err(Error::highlight(language, "unsupported"));
            }
            Ok(format!("<pre class=\"hl\">{}</pre>", source.to_uppercase()))
        }
    }

    fn table() -> BlockTable {
        let mut blocks = BlockTable::new();
        blocks.insert(ExtractedBlock::Code {
            language: Some("rust".into()),
            source: "let a = 1;\n".into(),
        });
        blocks.insert(ExtractedBlock::Diagram {
            id: "diagram-0-0".into(),
            source: "graph TD\nA-->B\n".into(),
        });
        blocks.insert(ExtractedBlock::Code {
            language: None,
            source: "<html>\n".into(),
        });
        blocks.insert(ExtractedBlock::Code {
            language: Some("broken".into()),
            source: "x < y\n".into(),
        });
        blocks
    }

    #[test]
    fn test_restore_without_highlighter() {
        let diagram = Placeholder::new(BlockKind::Diagram, 0).token();
        let html = format!("<p>a</p>\n{}\n{}", code(1), diagram);
        let out = restore_blocks(&html, &table(), "mermaid");
        assert_eq!(
            out,
            concat!(
                "<p>a</p>\n",
                r#"<div class="content-block"><pre><code>&lt;html&gt;"#,
                "\n</code></pre></div>\n",
                r#"<div class="content-block mermaid-container">"#,
                r#"<div class="mermaid" id="diagram-0-0">graph TD"#,
                "\nA--&gt;B\n</div></div>"
            )
        );
    }

    #[test]
    fn test_restore_with_highlighter_is_positional() {
        let html = format!("{}|{}|{}", code(2), code(0), code(1));
        let out = block_on(restore_blocks_with(&html, &table(), "mermaid", &Upper));
        let parts: Vec<&str> = out.split('|').collect();

        assert_eq!(
            parts[0],
            r#"<div class="content-block"><pre><code class="language-broken">x &lt; y"#.to_string()
                + "\n</code></pre></div>"
        );
        assert_eq!(
            parts[1],
            "<div class=\"content-block\"><pre class=\"hl\">LET A = 1;\n</pre></div>"
        );
        assert!(parts[2].contains("<pre><code>&lt;html&gt;"));
    }

    #[test]
    fn test_missing_record_is_rendered_as_text() {
        let out = restore_blocks(&code(9), &BlockTable::new(), "mermaid");
        assert_eq!(
            out,
            format!(
                r#"<div class="content-block"><pre><code>{}</code></pre></div>"#,
                code(9)
            )
        );
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        let mut blocks = BlockTable::new();
        blocks.insert(ExtractedBlock::Code {
            language: None,
            source: code(0),
        });
        let out = restore_blocks(&code(0), &blocks, "mermaid");
        assert_eq!(out.matches(code(0).as_str()).count(), 1);
        assert!(out.starts_with(r#"<div class="content-block"><pre><code>"#));
    }

    #[test]
    fn test_typed_token_text_is_left_alone() {
        let mut blocks = BlockTable::new();
        blocks.insert(ExtractedBlock::Code {
            language: None,
            source: "secret\n".into(),
        });
        let html = format!("<p>literal @@CODE-BLOCK-0@@ text</p>\n{}", code(0));
        let out = restore_blocks(&html, &blocks, "mermaid");
        assert!(out.starts_with("<p>literal @@CODE-BLOCK-0@@ text</p>\n"));
        assert_eq!(out.matches("secret").count(), 1);
    }
}
