//! Natural-language route interpretation.
//!
//! Turns a rider's free-text question ("bus fom cpt to bellville in the
//! morning") into ranked origin/destination/time candidates.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{RouteCandidate, ScoredRoute};
use crate::fuzzy::{FuzzyMatcher, ratio, token_set_ratio};

use super::error::InterpretError;
use super::normalize::QueryNormalizer;
use super::time_entity::TimeEntityExtractor;

/// One location query or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationQuery {
    One(String),
    Many(Vec<String>),
}

impl LocationQuery {
    /// True for an empty string or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            LocationQuery::One(s) => s.is_empty(),
            LocationQuery::Many(v) => v.is_empty(),
        }
    }

    fn texts(&self) -> &[String] {
        match self {
            LocationQuery::One(s) => std::slice::from_ref(s),
            LocationQuery::Many(v) => v,
        }
    }
}

/// Interprets rider queries against the location vocabulary.
///
/// Stateless after construction; safe to share between requests.
#[derive(Debug, Clone)]
pub struct QueryInterpreter {
    matcher: FuzzyMatcher,
    normalizer: QueryNormalizer,
    time_entities: Arc<dyn TimeEntityExtractor>,
}

impl QueryInterpreter {
    /// Create an interpreter.
    ///
    /// `time_entities` is consulted only when a query contains none of
    /// the vocabulary's time keywords.
    pub fn new(
        matcher: FuzzyMatcher,
        time_entities: Arc<dyn TimeEntityExtractor>,
    ) -> Result<Self, InterpretError> {
        let normalizer = QueryNormalizer::new(matcher.vocabulary())?;
        Ok(Self {
            matcher,
            normalizer,
            time_entities,
        })
    }

    /// Lowercase and correct a query.
    pub fn normalize(&self, query: &str) -> String {
        self.normalizer.normalize(query)
    }

    /// The time range a normalised query refers to, if any.
    pub fn time_hint(&self, normalized: &str) -> Option<String> {
        match self.matcher.vocabulary().time_keyword_in(normalized) {
            Some(keyword) => Some(keyword.range.clone()),
            None => self.time_entities.extract_time(normalized),
        }
    }

    /// Every distinct location matched by a word or pair of adjacent words.
    ///
    /// Locations are returned in the order first matched.
    pub fn candidate_locations(&self, normalized: &str) -> Vec<String> {
        let words: Vec<&str> = normalized.split_whitespace().collect();
        let mut found: Vec<String> = Vec::new();
        let mut add = |text: &str| {
            if let Some(m) = self.matcher.match_location(text)
                && !found.iter().any(|f| f == m.choice)
            {
                found.push(m.choice.to_string());
            }
        };

        for (i, &word) in words.iter().enumerate() {
            add(word);
            if let Some(next) = words.get(i + 1) {
                add(format!("{word} {next}").as_str());
            }
        }

        found
    }

    /// All directed trips between the locations named in `query`.
    ///
    /// With `n` distinct locations this yields `n * (n - 1)` candidates,
    /// each carrying the query's time hint.
    pub fn extract_possible_routes(&self, query: &str) -> Vec<RouteCandidate> {
        let normalized = self.normalize(query);
        let time = self.time_hint(&normalized);
        let locations = self.candidate_locations(&normalized);

        let mut routes = Vec::with_capacity(locations.len() * locations.len().saturating_sub(1));
        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if i != j {
                    routes.push(RouteCandidate::new(from, to, time.as_deref()));
                }
            }
        }

        tracing::debug!(
            query = %normalized,
            locations = locations.len(),
            routes = routes.len(),
            "Interpreted query"
        );

        routes
    }

    /// Text that route sentences are scored against: the normalised
    /// query with its time keyword spelled out as the range it stands for.
    fn scoring_text(&self, query: &str) -> String {
        let normalized = self.normalize(query);
        match self.matcher.vocabulary().time_keyword_in(&normalized) {
            Some(keyword) => normalized.replace(&keyword.keyword, &keyword.range.to_lowercase()),
            None => normalized,
        }
    }

    /// Score each candidate by how well its sentence matches `query`.
    ///
    /// The score averages word-set similarity, which ignores order, with
    /// plain sequence similarity, which does not, so that the reverse
    /// trip scores below the one the rider asked for. Results are sorted
    /// best first; equal scores keep their input order.
    pub fn score_routes_by_query_match(
        &self,
        query: &str,
        routes: Vec<RouteCandidate>,
    ) -> Vec<ScoredRoute> {
        let text = self.scoring_text(query);

        let mut scored: Vec<ScoredRoute> = routes
            .into_iter()
            .map(|route| {
                let sentence = route.sentence().to_lowercase();
                let score = (token_set_ratio(&text, &sentence) + ratio(&text, &sentence)) / 2.0;
                ScoredRoute(route, score)
            })
            .collect();

        scored.sort_by(|a, b| b.score().total_cmp(&a.score()));
        scored
    }

    /// Canonical names for one or more location strings, best match first.
    ///
    /// Each string is matched against the locations; if that fails it is
    /// resolved through the alias table, which counts as a perfect score.
    /// Strings that match neither are dropped.
    pub fn match_locations_sort(&self, queries: &LocationQuery) -> Vec<String> {
        let mut matches: Vec<(String, f64)> = queries
            .texts()
            .iter()
            .filter_map(|text| match self.matcher.match_location(text) {
                Some(m) => Some((m.choice.to_string(), m.score)),
                None => self
                    .matcher
                    .standard_location(text)
                    .map(|alias| (alias.to_string(), 100.0)),
            })
            .collect();

        matches.sort_by(|a, b| b.1.total_cmp(&a.1));
        matches.into_iter().map(|(name, _)| name).collect()
    }
}
