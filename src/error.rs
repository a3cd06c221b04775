//! Error types for mdpreso library.

use std::io;
use thiserror::Error;

/// Result type alias for mdpreso operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or rendering a slide deck.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The markdown document could not be loaded.
    #[error("Failed to load markdown file {name}: {reason}")]
    Fetch {
        /// Requested document name
        name: String,
        /// Underlying failure
        reason: String,
    },

    /// The highlighting service rejected or failed a code block.
    #[error("Failed to highlight code for language {language}: {reason}")]
    Highlight {
        /// Language tag of the rejected block
        language: String,
        /// Underlying failure
        reason: String,
    },

    /// The diagram renderer failed on a container.
    #[error("Diagram rendering error: {0}")]
    Diagram(String),

    /// Positioned blocks are nested deeper than the configured limit.
    #[error("Positioned blocks nested {depth} levels deep (limit is {limit})")]
    NestingTooDeep {
        /// Depth that was reached
        depth: usize,
        /// Configured limit
        limit: usize,
    },

    /// Error during rendering (HTML, JSON, notes).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Slide number is out of range.
    #[error("Slide {0} is out of range (deck has {1} slides)")]
    SlideOutOfRange(usize, usize),

    /// Invalid slide range specification.
    #[error("Invalid slide range: {0}")]
    InvalidSlideRange(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

impl Error {
    /// Build a fetch error for the given document name.
    pub fn fetch(name: impl Into<String>, reason: impl ToString) -> Self {
        Error::Fetch {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a highlighting error for the given language.
    pub fn highlight(language: impl Into<String>, reason: impl ToString) -> Self {
        Error::Highlight {
            language: language.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::SlideOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Slide 10 is out of range (deck has 5 slides)"
        );

        let err = Error::NestingTooDeep { depth: 9, limit: 8 };
        assert_eq!(
            err.to_string(),
            "Positioned blocks nested 9 levels deep (limit is 8)"
        );
    }

    #[test]
    fn test_fetch_error_display() {
        let err = Error::fetch("deck.md", "Not Found");
        assert_eq!(
            err.to_string(),
            "Failed to load markdown file deck.md: Not Found"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
