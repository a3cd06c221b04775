//! Document loading.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Something that can hand out markdown documents by name.
pub trait DocumentSource {
    /// Return the raw text of the named document.
    fn fetch(&self, name: &str) -> Result<String>;
}

/// Serves documents from a single directory.
///
/// Only the final path component of a requested name is used, so names
/// such as `../secret.md` resolve inside the root.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Serve documents from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory documents are served from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a requested name resolves to.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let file_name = Path::new(name)
            .file_name()
            .ok_or_else(|| Error::fetch(name, "not a file name"))?;
        Ok(self.root.join(file_name))
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self, name: &str) -> Result<String> {
        let path = self.resolve(name)?;
        log::debug!("Loading {}", path.display());
        std::fs::read_to_string(&path).map_err(|e| Error::fetch(name, e))
    }
}

/// Read a markdown file from disk.
pub fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::fetch(path.display().to_string(), e))
}

/// Read a markdown file without blocking the runtime.
#[cfg(feature = "async")]
pub async fn fetch_async(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::fetch(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_source_uses_final_component() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("deck.md"), "# Hi").unwrap();

        let source = FileSource::new(dir.path());
        assert_eq!(source.fetch("deck.md").unwrap(), "# Hi");
        assert_eq!(source.fetch("../../deck.md").unwrap(), "# Hi");
        assert_eq!(source.resolve("a/b/c.md").unwrap(), dir.path().join("c.md"));
    }

    #[test]
    fn test_missing_document_is_fetch_error() {
        let dir = tempdir().unwrap();
        let err = FileSource::new(dir.path()).fetch("nope.md").unwrap_err();
        assert!(matches!(err, Error::Fetch { ref name, .. } if name == "nope.md"));

        let err = FileSource::new(dir.path()).fetch("..").unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }

    #[test]
    fn test_read_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("talk.md");
        fs::write(&path, "a\n---\nb").unwrap();
        assert_eq!(read_document(&path).unwrap(), "a\n---\nb");
        assert!(read_document(&dir.path().join("missing.md")).is_err());
    }
}
