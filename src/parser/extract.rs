//! Block extraction: speaker notes, fenced regions and positioned blocks.
//!
//! Everything pulled out here is stored verbatim in a [`BlockTable`] and
//! replaced by a placeholder token on its own line, so no later stage can
//! reinterpret it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::model::{BlockKind, BlockTable, ExtractedBlock};

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[ \t]*([\w+#.-]+)?(?:[ \t]*\{[^}\n]*\})?[ \t]*\n(.*?)```").unwrap()
});
static POSITIONED_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<text\s*\{([^}]*)\}>(.*?)</text>").unwrap());
static POSITIONED_DIV: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<div\s*\{([^}]*)\}>(.*?)</div>").unwrap());

/// A slide segment split into content and trailing speaker notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesSplit {
    /// Content lines, untouched
    pub content: String,
    /// Notes text, `None` if the slide has no trailing comments
    pub notes: Option<String>,
}

/// Split trailing HTML-comment regions off a slide segment.
///
/// Lines are scanned from the bottom. A line ending in `-->` opens a
/// region, a line starting with `<!--` closes it, and a line doing both is
/// a region of its own. The first line outside any region ends the scan.
/// A region still open when the top is reached is not a comment after all
/// and is kept as content.
pub fn extract_notes(segment: &str) -> NotesSplit {
    let lines: Vec<&str> = segment.lines().collect();

    let mut regions: Vec<Vec<String>> = Vec::new();
    let mut open: Option<(usize, Vec<String>)> = None;
    let mut boundary = 0;

    for (i, raw) in lines.iter().enumerate().rev() {
        let line = raw.trim();

        if let Some((start, mut region)) = open.take() {
            if let Some(rest) = line.strip_prefix(COMMENT_OPEN) {
                push_front_nonempty(&mut region, rest.trim());
                regions.push(region);
            } else {
                region.insert(0, line.to_string());
                open = Some((start, region));
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        if let Some(body) = line.strip_suffix(COMMENT_CLOSE) {
            if let Some(inner) = body.strip_prefix(COMMENT_OPEN) {
                let mut region = Vec::new();
                push_front_nonempty(&mut region, inner.trim());
                regions.push(region);
            } else {
                let mut region = Vec::new();
                push_front_nonempty(&mut region, body.trim());
                open = Some((i, region));
            }
            continue;
        }

        boundary = i + 1;
        break;
    }

    // An unterminated region reaches back to its opening line as content.
    if let Some((start, _)) = open {
        boundary = boundary.max(start + 1);
    }

    let content = lines[..boundary].join("\n");

    // Regions were collected bottom-up.
    regions.reverse();
    let notes = regions
        .into_iter()
        .map(|region| region.join("\n"))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    NotesSplit {
        content,
        notes: if notes.is_empty() { None } else { Some(notes) },
    }
}

fn push_front_nonempty(region: &mut Vec<String>, text: &str) {
    if !text.is_empty() {
        region.insert(0, text.to_string());
    }
}

/// Replace diagram fences, then code fences, with placeholder lines.
///
/// Diagram ids are `diagram-{slide}-{n}`, unique within a deck.
pub fn extract_fences(
    text: &str,
    slide: usize,
    diagram_fence: &Regex,
    blocks: &mut BlockTable,
) -> String {
    let text = diagram_fence.replace_all(text, |caps: &Captures| {
        let id = format!("diagram-{}-{}", slide, blocks.count(BlockKind::Diagram));
        let placeholder = blocks.insert(ExtractedBlock::Diagram {
            id,
            source: caps[1].to_string(),
        });
        format!("\n{}\n", placeholder)
    });

    let text = CODE_FENCE.replace_all(&text, |caps: &Captures| {
        let placeholder = blocks.insert(ExtractedBlock::Code {
            language: caps.get(1).map(|m| m.as_str().to_string()),
            source: caps[2].to_string(),
        });
        format!("\n{}\n", placeholder)
    });

    text.into_owned()
}

/// Compile the fence pattern for diagrams tagged with `keyword`.
pub fn diagram_fence(keyword: &str) -> Result<Regex> {
    let pattern = format!(
        r"(?s)```[ \t]*{}(?:[ \t]*\{{[^}}\n]*\}})?[ \t]*\n(.*?)```",
        regex::escape(keyword)
    );
    Regex::new(&pattern)
        .map_err(|e| Error::Other(format!("Invalid diagram keyword {:?}: {}", keyword, e)))
}

/// Replace `<text{…}>…</text>` and `<div{…}>…</div>` blocks with
/// placeholder lines. Inner content is stored raw for later conversion.
pub fn extract_positioned(text: &str, blocks: &mut BlockTable) -> String {
    let mut text = text.to_string();
    for pattern in [&*POSITIONED_TEXT, &*POSITIONED_DIV] {
        text = pattern
            .replace_all(&text, |caps: &Captures| {
                let placeholder = blocks.insert(ExtractedBlock::Positioned {
                    style: caps[1].trim().to_string(),
                    inner: caps[2].to_string(),
                });
                format!("\n{}\n", placeholder)
            })
            .into_owned();
    }
    text
}
