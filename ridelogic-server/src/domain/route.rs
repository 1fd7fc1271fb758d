//! Route candidates produced from natural-language queries.

use serde::{Deserialize, Serialize};

/// Time text used when a query names no time.
pub const UNSPECIFIED_TIME: &str = "unspecified";

/// A possible reading of a query: travel between two locations at some time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// Origin location.
    pub from: String,

    /// Destination location.
    pub to: String,

    /// Time range text, or [`UNSPECIFIED_TIME`].
    pub time: String,
}

impl RouteCandidate {
    /// Create a candidate. A missing time becomes [`UNSPECIFIED_TIME`].
    pub fn new(from: impl Into<String>, to: impl Into<String>, time: Option<&str>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            time: time.unwrap_or(UNSPECIFIED_TIME).to_string(),
        }
    }

    /// The sentence a rider would have typed for this candidate.
    pub fn sentence(&self) -> String {
        format!("bus from {} to {} at {}", self.from, self.to, self.time)
    }

    /// The confirmation question shown to the rider.
    pub fn question(&self) -> String {
        format!("A bus from {} to {} at {}?", self.from, self.to, self.time)
    }
}

/// A candidate with its similarity to the query, on a 0-100 scale.
///
/// Serializes as a two-element array `[candidate, score]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRoute(pub RouteCandidate, pub f64);

impl ScoredRoute {
    /// The scored candidate.
    pub fn candidate(&self) -> &RouteCandidate {
        &self.0
    }

    /// The similarity score.
    pub fn score(&self) -> f64 {
        self.1
    }
}
