//! Sources of timetable page text.
//!
//! Text extraction from PDFs happens outside this crate. A document is
//! stored as a UTF-8 text file with one form feed between pages, which
//! is what `pdftotext` and similar tools emit.

use std::ffi::OsStr;
use std::path::PathBuf;

/// Page separator in stored documents.
pub const PAGE_BREAK: char = '\x0c';

const TEXT_EXTENSION: &str = "txt";

/// Errors from a document source.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// No document with this name
    #[error("document not found: {0}")]
    NotFound(String),

    /// The name could escape the document directory
    #[error("invalid document name: {0:?}")]
    InvalidName(String),

    /// Reading the document failed
    #[error("failed to read document {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Provides the page text of named timetable documents.
pub trait DocumentSource: Send + Sync {
    /// Names of every available document, sorted.
    fn list(&self) -> Result<Vec<String>, DocumentError>;

    /// The text of each page of `name`, in page order.
    fn pages(&self, name: &str) -> Result<Vec<String>, DocumentError>;
}

/// Documents stored as `<root>/<name>.txt`.
#[derive(Debug, Clone)]
pub struct TextDirectorySource {
    root: PathBuf,
}

impl TextDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, DocumentError> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
            || name.contains('\0')
        {
            return Err(DocumentError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.{TEXT_EXTENSION}")))
    }
}

impl DocumentSource for TextDirectorySource {
    fn list(&self) -> Result<Vec<String>, DocumentError> {
        let io_err = |source| DocumentError::Io {
            name: self.root.display().to_string(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file() || path.extension() != Some(OsStr::new(TEXT_EXTENSION)) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    fn pages(&self, name: &str) -> Result<Vec<String>, DocumentError> {
        let path = self.path_for(name)?;

        let text = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                DocumentError::NotFound(name.to_string())
            } else {
                DocumentError::Io {
                    name: name.to_string(),
                    source,
                }
            }
        })?;

        Ok(split_pages(&text))
    }
}

/// Split document text on form feeds, dropping a trailing empty page.
pub fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn split_on_form_feed() {
        assert_eq!(split_pages("a\x0cb\x0cc"), vec!["a", "b", "c"]);
        assert_eq!(split_pages("a\x0cb\x0c"), vec!["a", "b"]);
        assert_eq!(split_pages("single"), vec!["single"]);
        assert_eq!(split_pages(""), vec![""]);
    }

    #[test]
    fn reads_pages() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("route_101.txt"),
            "Bellville|05:00\x0cMowbray|06:00\x0c",
        )
        .unwrap();

        let source = TextDirectorySource::new(dir.path());
        let pages = source.pages("route_101").unwrap();
        assert_eq!(pages, vec!["Bellville|05:00", "Mowbray|06:00"]);
    }

    #[test]
    fn lists_text_documents_sorted() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("wynberg.txt"), "").unwrap();
        std::fs::write(dir.path().join("athlone.txt"), "").unwrap();
        std::fs::write(dir.path().join("athlone.pdf"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let source = TextDirectorySource::new(dir.path());
        assert_eq!(source.list().unwrap(), vec!["athlone", "wynberg"]);
    }

    #[test]
    fn missing_document() {
        let dir = tempdir().unwrap();
        let source = TextDirectorySource::new(dir.path());

        assert!(matches!(
            source.pages("nope"),
            Err(DocumentError::NotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn rejects_traversal() {
        let dir = tempdir().unwrap();
        let source = TextDirectorySource::new(dir.path());

        for name in ["../secret", "a/b", "a\\b", "..", ""] {
            assert!(
                matches!(source.pages(name), Err(DocumentError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn missing_directory_is_io_error() {
        let source = TextDirectorySource::new("/nonexistent/ridelogic-docs");
        assert!(matches!(source.list(), Err(DocumentError::Io { .. })));
    }
}
