//! Rendering options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options for rendering a deck.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Slides to render
    pub slide_selection: SlideSelection,

    /// Include speaker notes in the output
    pub include_notes: bool,

    /// Embed the default stylesheet in HTML output
    pub include_styles: bool,

    /// URL of a diagram rendering script to load in HTML output
    pub diagram_script: Option<String>,

    /// Start HTML output in presenter mode (speaker notes visible)
    pub presenter_mode: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set slide selection.
    pub fn with_slides(mut self, selection: SlideSelection) -> Self {
        self.slide_selection = selection;
        self
    }

    /// Set a specific slide range.
    pub fn with_slide_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.slide_selection = SlideSelection::Range(range);
        self
    }

    /// Enable or disable speaker notes.
    pub fn with_notes(mut self, include: bool) -> Self {
        self.include_notes = include;
        self
    }

    /// Enable or disable the embedded stylesheet.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Load a diagram rendering script.
    pub fn with_diagram_script(mut self, url: impl Into<String>) -> Self {
        self.diagram_script = Some(url.into());
        self
    }

    /// Start in presenter mode.
    pub fn with_presenter_mode(mut self, enabled: bool) -> Self {
        self.presenter_mode = enabled;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            slide_selection: SlideSelection::All,
            include_notes: true,
            include_styles: true,
            diagram_script: None,
            presenter_mode: false,
        }
    }
}

/// Slide selection for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SlideSelection {
    /// Render all slides
    #[default]
    All,
    /// Render a range of slides (inclusive, 1-indexed)
    Range(RangeInclusive<usize>),
    /// Render specific slides (1-indexed)
    Slides(Vec<usize>),
}

impl SlideSelection {
    /// Check if a slide number should be included.
    pub fn includes(&self, slide: usize) -> bool {
        match self {
            SlideSelection::All => true,
            SlideSelection::Range(range) => range.contains(&slide),
            SlideSelection::Slides(slides) => slides.contains(&slide),
        }
    }

    /// Parse a slide selection string (e.g., "3-7", "1,3,5-6").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s == "all" {
            return Ok(SlideSelection::All);
        }

        let invalid = || Error::InvalidSlideRange(s.to_string());
        let number = |part: &str| -> Result<usize> {
            match part.trim().parse::<usize>() {
                Ok(n) if n >= 1 => Ok(n),
                _ => Err(invalid()),
            }
        };

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let (start, end) = (number(start)?, number(end)?);
                if start > end {
                    return Err(invalid());
                }
                return Ok(SlideSelection::Range(start..=end));
            }
        }

        let mut slides = Vec::new();
        for part in s.split(',') {
            match part.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (number(start)?, number(end)?);
                    if start > end {
                        return Err(invalid());
                    }
                    slides.extend(start..=end);
                }
                None => slides.push(number(part)?),
            }
        }
        slides.sort_unstable();
        slides.dedup();
        Ok(SlideSelection::Slides(slides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_notes(false)
            .with_diagram_script("mermaid.min.js")
            .with_slide_range(2..=4);

        assert!(!options.include_notes);
        assert!(options.include_styles);
        assert_eq!(options.diagram_script.as_deref(), Some("mermaid.min.js"));
        assert!(options.slide_selection.includes(3));
        assert!(!options.slide_selection.includes(5));
    }

    #[test]
    fn test_slide_selection_includes() {
        let all = SlideSelection::All;
        assert!(all.includes(1));
        assert!(all.includes(100));

        let range = SlideSelection::Range(5..=10);
        assert!(!range.includes(4));
        assert!(range.includes(5));
        assert!(range.includes(10));
        assert!(!range.includes(11));

        let slides = SlideSelection::Slides(vec![1, 3]);
        assert!(slides.includes(3));
        assert!(!slides.includes(2));
    }

    #[test]
    fn test_slide_selection_parse() {
        assert_eq!(SlideSelection::parse("all").unwrap(), SlideSelection::All);
        assert_eq!(SlideSelection::parse("3-7").unwrap(), SlideSelection::Range(3..=7));
        assert_eq!(
            SlideSelection::parse("1,3,5-6,3").unwrap(),
            SlideSelection::Slides(vec![1, 3, 5, 6])
        );
        assert!(SlideSelection::parse("0").is_err());
        assert!(SlideSelection::parse("7-3").is_err());
        assert!(matches!(
            SlideSelection::parse("x"),
            Err(Error::InvalidSlideRange(ref s)) if s == "x"
        ));
    }
}
