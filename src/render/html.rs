//! Standalone HTML page rendering.

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{select_slides, RenderOptions};
use crate::error::{Error, Result};
use crate::model::Deck;
use crate::session::error_message;

const DEFAULT_TITLE: &str = "Presentation";

const STYLESHEET: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Ubuntu, sans-serif;
    margin: 0;
    background: #f5f5f5;
    min-height: 100vh;
}
.slide { display: none; min-height: 100vh; flex-direction: column; }
.slide.active { display: flex; }
.presentation-content {
    padding: 2rem 1rem 1rem;
    flex: 1;
    position: relative;
    overflow: hidden;
}
body.presenter-mode .presentation-content > * { max-width: calc(100vh * 16 / 9); margin-left: auto; margin-right: auto; }
.speaker-notes {
    display: none;
    background: #2c3e50;
    color: white;
    padding: 1rem;
    font-size: 0.9em;
    white-space: pre-line;
}
body.presenter-mode .speaker-notes { display: block; }
.content-block { margin-bottom: 1rem; }
.content-block:last-child { margin-bottom: 0; }
h1, h2, h3 { margin: 0; line-height: 1.2; word-wrap: break-word; }
p, a { word-wrap: break-word; }
img { max-width: 100%; height: auto; object-fit: contain; }
[style*="position: absolute"] { max-width: calc(100vw - 2rem); max-height: calc(100vh - 6rem); }
.slide-background { position: absolute; top: 0; left: 0; right: 0; bottom: 0; z-index: -1; }
pre, code { max-width: 100%; overflow-x: auto; white-space: pre-wrap; }
.markdown-list { margin: 0.5rem 0; padding-left: 2rem; }
.markdown-list li { margin: 0.25rem 0; }
.markdown-list .markdown-list { list-style-type: circle; }
.markdown-list .markdown-list .markdown-list { list-style-type: square; }
.markdown-table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
.markdown-table th, .markdown-table td { border: 1px solid #ddd; padding: 4px; }
.markdown-table th { background-color: #f5f5f5; font-weight: bold; }
.markdown-table tr:nth-child(even) { background-color: #f0f0f0; }
blockquote {
    border-left: 4px solid #007bff;
    margin: 1rem 0;
    padding: 0.5rem 1rem;
    background-color: rgba(0, 123, 255, 0.05);
    font-style: italic;
    color: #555;
}
.error {
    color: #dc3545;
    padding: 1rem;
    margin: 1rem;
    border: 1px solid #dc3545;
    border-radius: 4px;
    background-color: #f8d7da;
}
"#;

// Shows one section at a time and keeps `#slide=N` in sync.
const NAVIGATION_SCRIPT: &str = r#"
(function () {
    var slides = document.querySelectorAll('section.slide');
    var current = 0;
    function show(i) {
        if (i < 0 || i >= slides.length) { return; }
        slides[current].classList.remove('active');
        current = i;
        slides[current].classList.add('active');
        history.replaceState(null, '', '#slide=' + slides[current].dataset.slide);
    }
    function fromHash() {
        var m = /slide=(\d+)/.exec(location.hash);
        for (var i = 0; m && i < slides.length; i++) {
            if (slides[i].dataset.slide === m[1]) { return i; }
        }
        return 0;
    }
    document.addEventListener('keydown', function (e) {
        if (e.key === 'ArrowRight' || e.key === 'ArrowDown') { e.preventDefault(); show(current + 1); }
        else if (e.key === 'ArrowLeft' || e.key === 'ArrowUp') { e.preventDefault(); show(current - 1); }
        else if (e.key === 'p' && e.ctrlKey) { e.preventDefault(); document.body.classList.toggle('presenter-mode'); }
    });
    window.addEventListener('hashchange', function () { show(fromHash()); });
    if (slides.length) { slides[0].classList.add('active'); show(fromHash()); }
})();
"#;

/// Render a deck as a standalone HTML page.
pub fn to_html(deck: &Deck, options: &RenderOptions) -> Result<String> {
    let slides = select_slides(deck, &options.slide_selection)?;
    let metadata = &deck.metadata;

    let content_len: usize = slides.iter().map(|s| s.content.len()).sum();
    let mut html = String::with_capacity(4096 + content_len);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{}</title>\n",
        encode_text(metadata.title.as_deref().unwrap_or(DEFAULT_TITLE))
    ));
    if let Some(ref author) = metadata.author {
        html.push_str(&format!(
            "<meta name=\"author\" content=\"{}\">\n",
            encode_double_quoted_attribute(author)
        ));
    }
    if let Some(seconds) = metadata.refresh {
        html.push_str(&format!("<meta http-equiv=\"refresh\" content=\"{}\">\n", seconds));
    }
    for url in &deck.image_urls {
        html.push_str(&format!(
            "<link rel=\"preload\" as=\"image\" href=\"{}\">\n",
            encode_double_quoted_attribute(url)
        ));
    }
    if options.include_styles {
        html.push_str("<style>");
        html.push_str(STYLESHEET);
        html.push_str("</style>\n");
    }
    html.push_str("</head>\n");

    let mut body_attrs = String::new();
    if options.presenter_mode {
        body_attrs.push_str(" class=\"presenter-mode\"");
    }
    if let Some(style) = metadata.body_style() {
        body_attrs.push_str(&format!(" style=\"{}\"", encode_double_quoted_attribute(&style)));
    }
    html.push_str(&format!("<body{}>\n", body_attrs));

    for slide in slides {
        html.push_str(&format!(
            "<section class=\"slide\" id=\"slide-{0}\" data-slide=\"{0}\">\n",
            slide.number()
        ));
        html.push_str("<div class=\"presentation-content\">\n");
        html.push_str(&slide.content);
        html.push_str("\n</div>\n");
        if options.include_notes {
            if let Some(ref notes) = slide.notes {
                html.push_str(&format!(
                    "<aside class=\"speaker-notes\">{}</aside>\n",
                    encode_text(notes)
                ));
            }
        }
        html.push_str("</section>\n");
    }

    if let Some(ref script) = options.diagram_script {
        html.push_str(&format!(
            "<script src=\"{}\"></script>\n",
            encode_double_quoted_attribute(script)
        ));
    }
    html.push_str("<script>");
    html.push_str(NAVIGATION_SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    Ok(html)
}

/// Page shown instead of the deck when the document could not be loaded.
pub fn error_page(err: &Error) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n\
         <div class=\"error\">{}</div>\n</body>\n</html>\n",
        DEFAULT_TITLE,
        STYLESHEET,
        encode_text(&error_message(err))
    )
}
