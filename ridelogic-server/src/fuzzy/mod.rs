//! Fuzzy string matching.
//!
//! Approximate matching of free text against a fixed vocabulary,
//! tolerant of typos, word reordering and partial overlap.

mod matcher;
mod similarity;

pub use matcher::{FuzzyMatcher, Match, MatchThresholds, best_match, extract_one};
pub use similarity::{
    partial_ratio, partial_token_ratio, ratio, token_set_ratio, token_sort_ratio, wratio,
};
