//! Rider-facing suggestions built from scored routes.

use serde::Serialize;

use crate::domain::ScoredRoute;

/// Reply when no route could be read from a query.
pub const CLARIFICATION_REQUEST: &str =
    "Sorry, I couldn't understand your route. Can you please provide more details?";

/// Final option offered after the route questions.
pub const SOMETHING_ELSE: &str = "Something else";

/// Either a list of confirmation questions or a request to rephrase.
///
/// Serializes as a bare list or a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Suggestions {
    Options(Vec<String>),
    Clarification(String),
}

/// One question per scored route, in order, followed by [`SOMETHING_ELSE`].
///
/// With no routes, returns [`CLARIFICATION_REQUEST`] instead.
pub fn generate_suggestions(scored: &[ScoredRoute]) -> Suggestions {
    if scored.is_empty() {
        return Suggestions::Clarification(CLARIFICATION_REQUEST.to_string());
    }

    let mut options: Vec<String> = scored.iter().map(|s| s.candidate().question()).collect();
    options.push(SOMETHING_ELSE.to_string());
    Suggestions::Options(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteCandidate;

    #[test]
    fn empty_input_asks_for_clarification() {
        assert_eq!(
            generate_suggestions(&[]),
            Suggestions::Clarification(CLARIFICATION_REQUEST.to_string())
        );
    }

    #[test]
    fn questions_then_fallback() {
        let scored = vec![
            ScoredRoute(RouteCandidate::new("Bellville", "Cape Town", Some("12 pm")), 90.0),
            ScoredRoute(RouteCandidate::new("Cape Town", "Bellville", None), 70.0),
        ];

        assert_eq!(
            generate_suggestions(&scored),
            Suggestions::Options(vec![
                "A bus from Bellville to Cape Town at 12 pm?".to_string(),
                "A bus from Cape Town to Bellville at unspecified?".to_string(),
                "Something else".to_string(),
            ])
        );
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_value(generate_suggestions(&[])).unwrap();
        assert_eq!(json, serde_json::json!(CLARIFICATION_REQUEST));

        let scored = vec![ScoredRoute(RouteCandidate::new("Harare", "Mowbray", None), 50.0)];
        let json = serde_json::to_value(generate_suggestions(&scored)).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().map(Vec::len), Some(2));
    }
}
