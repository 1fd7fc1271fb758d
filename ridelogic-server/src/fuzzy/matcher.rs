//! Best-candidate matching against the location vocabulary.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::vocabulary::Vocabulary;

use super::similarity::wratio;

/// Minimum scores for accepting a fuzzy match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchThresholds {
    /// Threshold for matching against canonical locations.
    pub location: f64,

    /// Threshold for alias resolution.
    /// Stricter, since aliases are often short and ambiguous.
    pub alias: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            location: 70.0,
            alias: 80.0,
        }
    }
}

/// The best-scoring candidate for some text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    /// The matched candidate.
    pub choice: &'a str,
    /// Its [`wratio`] score.
    pub score: f64,
    /// Its position in the candidate list.
    pub index: usize,
}

/// Find the highest-scoring candidate for `query`.
///
/// Ties go to the earliest candidate. Returns `None` only when there are
/// no candidates.
pub fn extract_one<'a, S: AsRef<str>>(query: &str, choices: &'a [S]) -> Option<Match<'a>> {
    let mut best: Option<Match<'a>> = None;

    for (index, choice) in choices.iter().enumerate() {
        let choice = choice.as_ref();
        let score = wratio(query, choice);
        if best.is_none_or(|b| score > b.score) {
            best = Some(Match {
                choice,
                score,
                index,
            });
        }
    }

    best
}

/// Find the best candidate for `text`, if it scores at least `threshold`.
pub fn best_match<'a, S: AsRef<str>>(
    text: &str,
    candidates: &'a [S],
    threshold: f64,
) -> Option<Match<'a>> {
    extract_one(text, candidates).filter(|m| m.score >= threshold)
}

/// Fuzzy matcher bound to a vocabulary.
///
/// Cheap to share: holds the vocabulary behind an `Arc` and the
/// flattened alias list built once at construction.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    vocabulary: Arc<Vocabulary>,
    thresholds: MatchThresholds,
    /// Lowercased aliases, in alias-table order.
    aliases: Vec<String>,
    /// Alias-table row each entry of `aliases` came from.
    alias_rows: Vec<usize>,
}

impl FuzzyMatcher {
    /// Create a matcher over `vocabulary`.
    pub fn new(vocabulary: Arc<Vocabulary>, thresholds: MatchThresholds) -> Self {
        let (aliases, alias_rows) = vocabulary.alias_pairs().into_iter().unzip();
        Self {
            vocabulary,
            thresholds,
            aliases,
            alias_rows,
        }
    }

    /// The vocabulary this matcher uses.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Match `text` against the canonical locations.
    pub fn match_location(&self, text: &str) -> Option<Match<'_>> {
        best_match(text, &self.vocabulary.locations, self.thresholds.location)
    }

    /// Resolve `input` through the alias table.
    ///
    /// The input is trimmed and lowercased, then matched against every
    /// alias. On a match, the result is the alias *string* stored under
    /// the matched row's key, not the key. So "village 1 south" resolves
    /// to "ELITHA PARK", while "khayelitsha" (the key of a row whose
    /// aliases are a list of townships) resolves to that whole list.
    /// Downstream callers rely on this mapping.
    pub fn standard_location(&self, input: &str) -> Option<&str> {
        let input = input.trim().to_lowercase();
        let found = best_match(&input, &self.aliases, self.thresholds.alias)?;
        let row = self.alias_rows[found.index];
        self.vocabulary
            .alias_entry(row)
            .map(|entry| entry.aliases.as_str())
    }
}
