//! Query normalisation.

use regex::{NoExpand, Regex};

use crate::vocabulary::Vocabulary;

use super::error::InterpretError;

/// Lowercases queries and applies whole-word corrections.
#[derive(Debug, Clone)]
pub struct QueryNormalizer {
    fixes: Vec<(Regex, String)>,
}

impl QueryNormalizer {
    /// Compile the vocabulary's corrections.
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, InterpretError> {
        let fixes = vocabulary
            .common_fixes
            .iter()
            .map(|fix| {
                let pattern = format!(r"\b{}\b", regex::escape(&fix.wrong.to_lowercase()));
                Regex::new(&pattern)
                    .map(|re| (re, fix.correct.to_lowercase()))
                    .map_err(|source| InterpretError::Correction {
                        wrong: fix.wrong.clone(),
                        source,
                    })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { fixes })
    }

    /// Lowercase `query` and apply each correction in order.
    pub fn normalize(&self, query: &str) -> String {
        let mut text = query.to_lowercase();
        for (pattern, correct) in &self.fixes {
            if pattern.is_match(&text) {
                text = pattern.replace_all(&text, NoExpand(correct)).into_owned();
            }
        }
        text
    }
}
