//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from I/O and HTTP errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A place name was empty or only whitespace
    #[error("place name is empty")]
    EmptyPlaceName,

    /// A cell contained a marker that identifies headers or ranges
    #[error("{name:?} is not a place: contains {marker:?}")]
    NotAPlace { name: String, marker: String },
}
