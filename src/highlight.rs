//! Syntax highlighting adapters.
//!
//! The parser only depends on the [`Highlighter`] trait. A failed request
//! never fails a slide: the block falls back to plain code.

use async_trait::async_trait;

use crate::error::{Error, Result};

/// A service turning source text into highlighted markup.
#[async_trait]
pub trait Highlighter: Send + Sync {
    /// Highlight `source` written in `language`.
    async fn highlight(&self, source: &str, language: &str) -> Result<String>;

    /// Whether requests for `language` should be made at all.
    fn supports(&self, _language: &str) -> bool {
        true
    }
}

/// Highlighter that declines every language, leaving code plain.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighlighter;

#[async_trait]
impl Highlighter for NoHighlighter {
    async fn highlight(&self, _source: &str, language: &str) -> Result<String> {
        Err(Error::highlight(language, "highlighting is disabled"))
    }

    fn supports(&self, _language: &str) -> bool {
        false
    }
}

#[cfg(feature = "async")]
pub use command::CommandHighlighter;

#[cfg(feature = "async")]
mod command {
    use std::process::Stdio;

    use async_trait::async_trait;
    use tokio::io::AsyncWriteExt;
    use tokio::process::Command;

    use super::Highlighter;
    use crate::error::{Error, Result};

    /// Placeholder replaced by the block's language tag.
    const LANG_PLACEHOLDER: &str = "{lang}";

    /// Highlighter backed by an external command.
    ///
    /// The command line is split on whitespace and every `{lang}` argument
    /// is replaced by the block's language. Source goes to stdin, markup is
    /// read from stdout, e.g. `pygmentize -l {lang} -f html`.
    #[derive(Debug, Clone)]
    pub struct CommandHighlighter {
        program: String,
        args: Vec<String>,
    }

    impl CommandHighlighter {
        /// Parse a command line.
        pub fn new(command: &str) -> Result<Self> {
            let mut parts = command.split_whitespace().map(str::to_string);
            let program = parts
                .next()
                .ok_or_else(|| Error::Other("Empty highlight command".to_string()))?;
            Ok(Self {
                program,
                args: parts.collect(),
            })
        }

        /// Program that will be run.
        pub fn program(&self) -> &str {
            &self.program
        }

        fn args_for(&self, language: &str) -> Vec<String> {
            self.args
                .iter()
                .map(|arg| arg.replace(LANG_PLACEHOLDER, language))
                .collect()
        }
    }

    #[async_trait]
    impl Highlighter for CommandHighlighter {
        async fn highlight(&self, source: &str, language: &str) -> Result<String> {
            log::debug!("Highlighting {} block with {}", language, self.program);

            let mut child = Command::new(&self.program)
                .args(self.args_for(language))
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| Error::highlight(language, e))?;

            // Feed stdin while draining stdout so large blocks cannot stall the pipe.
            let stdin = child.stdin.take();
            let feed = async move {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(source.as_bytes()).await?;
                }
                Ok::<(), std::io::Error>(())
            };
            let (fed, output) = futures::future::join(feed, child.wait_with_output()).await;
            fed.map_err(|e| Error::highlight(language, e))?;
            let output = output.map_err(|e| Error::highlight(language, e))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(Error::highlight(language, stderr.trim()));
            }
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_highlighter_declines() {
        let hl = NoHighlighter;
        assert!(!hl.supports("rust"));
        let result = futures::executor::block_on(hl.highlight("fn main() {}", "rust"));
        assert!(result.is_err());
    }
}
