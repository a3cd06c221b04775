//! Integration tests for highlighted parsing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::executor::block_on;
use futures::future;
use mdpreso::error::Result;
use mdpreso::{parse_with_highlighter, Error, Highlighter, NoHighlighter, ParseOptions};

const DECK: &str = concat!(
    "```rust\nlet a = 1;\n```\ntext\n```python\nb = 2\n```\n",
    "```\nplain < code\n```\n---\n```fail\nboom\n```"
);

/// Wraps source in a tag naming the language. Requests for `fail` error.
struct Tagger {
    calls: AtomicUsize,
}

impl Tagger {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Highlighter for Tagger {
    async fn highlight(&self, source: &str, language: &str) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        // Let the first request finish last.
        if call == 0 {
            for _ in 0..8 {
                yield_now().await;
            }
        }
        if language == "fail" {
            return Err(Error::highlight(language, "service unavailable"));
        }
        Ok(format!("<pre data-lang=\"{}\">{}</pre>", language, source.trim()))
    }
}

/// Suspend once so other futures in the same join can progress.
async fn yield_now() {
    let mut yielded = false;
    future::poll_fn(|cx| {
        if yielded {
            std::task::Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            std::task::Poll::Pending
        }
    })
    .await
}

#[test]
fn test_results_keep_block_order() {
    let tagger = Tagger::new();
    let deck = block_on(parse_with_highlighter(DECK, ParseOptions::new(), &tagger)).unwrap();

    let html = &deck.slides[0].content;
    let rust = html.find(r#"<pre data-lang="rust">let a = 1;</pre>"#).unwrap();
    let text = html.find("<p>text</p>").unwrap();
    let python = html.find(r#"<pre data-lang="python">b = 2</pre>"#).unwrap();
    let plain = html.find("<pre><code>plain &lt; code").unwrap();
    assert!(rust < text && text < python && python < plain);

    // Untagged code is never sent.
    assert_eq!(tagger.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_failed_request_falls_back() {
    let deck = block_on(parse_with_highlighter(DECK, ParseOptions::new(), &Tagger::new())).unwrap();
    let html = &deck.slides[1].content;
    assert!(html.contains(r#"<pre><code class="language-fail">boom"#));
}

#[test]
fn test_no_highlighter_matches_sync_parse() {
    let highlighted =
        block_on(parse_with_highlighter(DECK, ParseOptions::new(), &NoHighlighter)).unwrap();
    let plain = mdpreso::parse_str(DECK).unwrap();
    assert_eq!(highlighted.slides, plain.slides);
}

#[cfg(all(unix, feature = "async"))]
mod command {
    use mdpreso::{CommandHighlighter, Highlighter};

    #[tokio::test]
    async fn test_command_highlighter_runs_process() {
        let hl = CommandHighlighter::new("tr a-z A-Z").unwrap();
        let out = hl.highlight("fn main() {}", "rust").await.unwrap();
        assert_eq!(out, "FN MAIN() {}");
    }

    #[tokio::test]
    async fn test_command_highlighter_failure() {
        let hl = CommandHighlighter::new("false").unwrap();
        assert!(hl.highlight("x", "rust").await.is_err());

        let hl = CommandHighlighter::new("mdpreso-no-such-program").unwrap();
        assert!(hl.highlight("x", "rust").await.is_err());
    }
}
