//! Inline formatting: highlight, strong and emphasis, plus links and images.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static HIGHLIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"==(.+?)==").unwrap());
static STRONG_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static STRONG_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());
static EM_STAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\s](?:[^*]*?[^*\s])?)\*").unwrap());
// No lookaround in `regex`: boundary characters are captured and re-emitted.
static EM_UNDERSCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[^\w])_([^_\s](?:[^_]*?[^_\s])?)_([^\w]|$)").unwrap());

// Stray mask characters are captured too, so unmasking stays aligned.
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z][^<>]*>|\x{E001}").unwrap());

/// Stands in for a tag while emphasis markers are matched.
const TAG_MASK: char = '\u{E001}';

static STYLED_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)\s*\{([^}]*)\}").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Default style for images without a style block: centered, fitted to the slide.
pub(crate) const IMAGE_STYLE: &str = "max-width: 100%; max-height: calc(100vh - 200px); \
width: auto; height: auto; display: block; margin: 1rem auto; object-fit: contain; \
box-shadow: 0 2px 4px rgba(0,0,0,0.1);";

/// Apply highlight, strong and emphasis substitutions, in that order.
///
/// Markup tags in the text, such as finished links and images, are opaque:
/// markers inside their attributes are never matched. Running this over its
/// own output changes nothing.
pub fn format_inline(text: &str) -> String {
    let tags: Vec<&str> = TAG.find_iter(text).map(|m| m.as_str()).collect();
    if tags.is_empty() {
        return format_markers(text);
    }

    let masked = TAG.replace_all(text, NoExpand(&TAG_MASK.to_string()));
    let formatted = format_markers(&masked);

    let mut tags = tags.into_iter();
    let mut out = String::with_capacity(formatted.len() + text.len());
    for c in formatted.chars() {
        if c == TAG_MASK {
            out.push_str(tags.next().unwrap_or_default());
        } else {
            out.push(c);
        }
    }
    out
}

fn format_markers(text: &str) -> String {
    let text = HIGHLIGHT.replace_all(text, "<mark>$1</mark>");
    let text = STRONG_STAR.replace_all(&text, "<strong>$1</strong>");
    let text = STRONG_UNDERSCORE.replace_all(&text, "<strong>$1</strong>");
    let text = EM_STAR.replace_all(&text, "<em>$1</em>");

    // Adjacent matches share a boundary character, so repeat until stable.
    let mut text = text.into_owned();
    loop {
        let next = EM_UNDERSCORE.replace_all(&text, "$1<em>$2</em>$3");
        if next == text {
            return text;
        }
        text = next.into_owned();
    }
}

/// Rewrite styled images, plain images and links into markup.
///
/// Returns the rewritten text and the number of images found.
pub fn rewrite_links(text: &str) -> (String, u32) {
    let mut images = STYLED_IMAGE.find_iter(text).count() as u32;
    let text = STYLED_IMAGE.replace_all(text, r#"<img src="$2" alt="$1" style="$3">"#);

    images += IMAGE.find_iter(&text).count() as u32;
    let text = IMAGE.replace_all(&text, |caps: &regex::Captures| {
        format!(
            r#"<div class="content-block"><img src="{}" alt="{}" style="{}"></div>"#,
            &caps[2], &caps[1], IMAGE_STYLE
        )
    });

    let text = LINK.replace_all(&text, r#"<a href="$2">$1</a>"#);
    (text.into_owned(), images)
}

/// Image sources referenced with `![alt](src)` in the text.
pub(crate) fn image_sources(text: &str) -> impl Iterator<Item = &str> {
    IMAGE
        .captures_iter(text)
        .filter_map(|caps| caps.get(2).map(|m| m.as_str()))
}
