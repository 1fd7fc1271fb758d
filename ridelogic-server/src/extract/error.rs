//! Schedule extraction errors.

use std::path::PathBuf;

/// Errors that abort an extraction.
///
/// A single page failing is not an error of this kind; see
/// [`PageFailure`](super::PageFailure).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractError {
    /// The place registry lock was poisoned by a panicking writer
    #[error("place registry lock poisoned")]
    RegistryPoisoned,

    /// The extraction configuration is unusable
    #[error("invalid extract config: {0}")]
    InvalidConfig(&'static str),

    /// The extraction configuration file could not be loaded
    #[error("failed to load extract config {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },
}
