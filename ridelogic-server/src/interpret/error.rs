//! Query interpreter errors.

/// Errors building a query interpreter from a vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    /// A correction could not be compiled into a pattern
    #[error("invalid correction {wrong:?}: {source}")]
    Correction {
        wrong: String,
        source: regex::Error,
    },
}
