//! Parsing options and configuration.

/// Default language tag that marks a fenced block as a diagram.
pub const DEFAULT_DIAGRAM_KEYWORD: &str = "mermaid";

/// Default limit for nested positioned blocks.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 8;

/// Options for parsing markdown documents into slides.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to process slides in parallel
    pub parallel: bool,

    /// Language tag that turns a fenced block into a diagram
    pub diagram_keyword: String,

    /// Maximum nesting of positioned `<text{}>`/`<div{}>` blocks
    pub max_nesting_depth: usize,

    /// Whether frontmatter is recognized at all
    pub frontmatter: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (degrade failing slides and continue).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable strict mode (the first failing slide fails the deck).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the diagram language tag.
    pub fn with_diagram_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.diagram_keyword = keyword.into();
        self
    }

    /// Set the maximum nesting depth of positioned blocks.
    pub fn with_max_nesting(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth.max(1);
        self
    }

    /// Enable or disable frontmatter recognition.
    pub fn with_frontmatter(mut self, enabled: bool) -> Self {
        self.frontmatter = enabled;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            parallel: true,
            diagram_keyword: DEFAULT_DIAGRAM_KEYWORD.to_string(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            frontmatter: true,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any slide error
    Strict,
    /// Render a failing slide as literal text and continue
    #[default]
    Lenient,
}
