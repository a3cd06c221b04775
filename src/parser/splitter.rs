//! Document normalization and slide splitting.

use crate::model::TOKEN_MARK;

/// Line that separates two slides.
pub const SLIDE_DELIMITER: &str = "---";

/// Normalize line endings to `\n`.
///
/// The placeholder delimiter is replaced with U+FFFD, so text in the
/// document can never be read back as a placeholder.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").replace(TOKEN_MARK, "\u{FFFD}")
}

/// Split a document into slide segments on lines that are exactly `---`.
///
/// N delimiter lines always give N+1 segments, empty ones included.
/// Leading and trailing blank lines of each segment are dropped;
/// indentation of the remaining lines is kept.
pub fn split_slides(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if line == SLIDE_DELIMITER {
            segments.push(trim_blank_lines(&current));
            current.clear();
        } else {
            current.push(line);
        }
    }
    segments.push(trim_blank_lines(&current));

    segments
}

fn trim_blank_lines(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiters_give_one_more_segment() {
        let slides = split_slides("# A\n---\n# B\n---\n# C");
        assert_eq!(slides, vec!["# A", "# B", "# C"]);
    }

    #[test]
    fn test_empty_segments_are_kept() {
        let slides = split_slides("---\n\n---\nlast\n---");
        assert_eq!(slides, vec!["", "", "last", ""]);
    }

    #[test]
    fn test_only_exact_delimiter_lines_split() {
        let slides = split_slides("a --- b\n----\n --- \n|---|---|");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_indentation_is_kept() {
        let slides = split_slides("\n\n  - a\n    - b\n\n");
        assert_eq!(slides, vec!["  - a\n    - b"]);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a\r\nb\r\n"), "a\nb\n");
        assert_eq!(normalize("x\u{E000}y"), "x\u{FFFD}y");
    }
}
