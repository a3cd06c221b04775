//! Frontmatter parsing and image URL collection.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::inline::image_sources;
use crate::model::Metadata;

static FRONTMATTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^---\n([\s\S]*?)\n---\n").unwrap());
static BACKGROUND_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"background\s*\{[^}]*background-image:\s*url\(['"]([^'"]+)['"]\)"#).unwrap()
});

/// Key that must read `True` for the block to take effect.
const GATE_KEY: &str = "frontmatter";

/// Result of reading the leading metadata block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// Metadata to apply
    pub metadata: Metadata,
    /// Document with the block removed (unchanged if the block was not applied)
    pub body: String,
}

/// Read the leading `---` block of a normalized document.
///
/// The block only counts when it contains `frontmatter: True`. Otherwise
/// the document is returned untouched and its `---` lines split slides
/// like any other.
pub fn parse_frontmatter(text: &str) -> Frontmatter {
    let Some(caps) = FRONTMATTER.captures(text) else {
        return Frontmatter {
            metadata: Metadata::default(),
            body: text.to_string(),
        };
    };

    let mut pairs = BTreeMap::new();
    for line in caps[1].lines() {
        if let Some((key, value)) = line.split_once(':') {
            pairs.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    if pairs.get(GATE_KEY).map(String::as_str) != Some("True") {
        log::debug!("Leading block is not gated by `{}: True`, keeping it as slides", GATE_KEY);
        return Frontmatter {
            metadata: Metadata::default(),
            body: text.to_string(),
        };
    }
    pairs.remove(GATE_KEY);

    let mut metadata = Metadata::default();
    for (key, value) in pairs {
        match key.as_str() {
            "title" => metadata.title = Some(value),
            "author" => metadata.author = Some(strip_quotes(&value).to_string()),
            "bgcolor" => metadata.bgcolor = Some(value),
            "bgimage" => metadata.bgimage = Some(value),
            "refresh" => match value.parse::<u64>() {
                Ok(seconds) if seconds > 0 => metadata.refresh = Some(seconds),
                _ => log::warn!("Ignoring invalid refresh interval {:?}", value),
            },
            _ => {
                metadata.extra.insert(key, value);
            }
        }
    }

    let body = text[caps.get(0).map_or(0, |m| m.end())..].to_string();
    Frontmatter { metadata, body }
}

/// Strip one pair of surrounding quotes.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}

/// Every image source in the document: `![alt](src)` and
/// `background-image: url('…')` inside `background{…}` directives.
pub fn collect_image_urls(text: &str) -> BTreeSet<String> {
    let mut urls: BTreeSet<String> = image_sources(text).map(str::to_string).collect();
    urls.extend(
        BACKGROUND_IMAGE
            .captures_iter(text)
            .map(|caps| caps[1].to_string()),
    );
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gated_frontmatter_is_applied() {
        let text = concat!(
            "---\nfrontmatter: True\ntitle: Talk\nauthor: \"Ada L\"\n",
            "refresh: 30\nbgcolor: #111\ntheme: dark\n---\n# Slide"
        );
        let fm = parse_frontmatter(text);

        assert_eq!(fm.body, "# Slide");
        assert_eq!(fm.metadata.title.as_deref(), Some("Talk"));
        assert_eq!(fm.metadata.author.as_deref(), Some("Ada L"));
        assert_eq!(fm.metadata.refresh, Some(30));
        assert_eq!(fm.metadata.bgcolor.as_deref(), Some("#111"));
        assert_eq!(fm.metadata.extra.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn test_ungated_frontmatter_is_kept() {
        let text = "---\ntitle: Talk\n---\n# Slide";
        let fm = parse_frontmatter(text);
        assert_eq!(fm.body, text);
        assert!(fm.metadata.is_empty());

        let fm = parse_frontmatter("---\nfrontmatter: true\ntitle: x\n---\nbody");
        assert!(fm.metadata.title.is_none());
    }

    #[test]
    fn test_invalid_refresh_is_ignored() {
        let fm = parse_frontmatter("---\nfrontmatter: True\nrefresh: soon\n---\n");
        assert!(fm.metadata.refresh.is_none());
        assert_eq!(fm.body, "");
    }

    #[test]
    fn test_values_may_contain_colons() {
        let fm = parse_frontmatter("---\nfrontmatter: True\nbgimage: https://x.io/a.png\n---\nb");
        assert_eq!(fm.metadata.bgimage.as_deref(), Some("https://x.io/a.png"));
    }

    #[test]
    fn test_no_frontmatter() {
        let fm = parse_frontmatter("# Just a slide");
        assert_eq!(fm.body, "# Just a slide");
        assert!(fm.metadata.is_empty());
    }

    #[test]
    fn test_collect_image_urls() {
        let text = concat!(
            "![a](one.png)\n---\n![b](two.png) ![c](one.png)\n",
            "background{background-image: url('bg.jpg'); background-size: cover}"
        );
        let urls = collect_image_urls(text);
        let urls: Vec<_> = urls.iter().map(String::as_str).collect();
        assert_eq!(urls, vec!["bg.jpg", "one.png", "two.png"]);
    }
}
