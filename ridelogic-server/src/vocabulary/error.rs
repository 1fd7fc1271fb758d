//! Vocabulary loading errors.

use std::path::PathBuf;

/// Errors that can occur when loading a vocabulary file.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    /// The file could not be read
    #[error("failed to read vocabulary {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid vocabulary JSON
    #[error("invalid vocabulary {path}: {message}")]
    Json { path: PathBuf, message: String },

    /// The vocabulary has no canonical locations
    #[error("vocabulary has no locations")]
    NoLocations,
}
