//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::assistant::{BestTimesRequest, ChatMessage};
use crate::domain::ScoredRoute;
use crate::interpret::{LocationQuery, Suggestions};
use crate::reports::CrowdReport;

/// Documents available for extraction.
#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<String>,
}

/// Request to interpret a free-text route query.
#[derive(Debug, Deserialize)]
pub struct InterpretRequest {
    /// Rider's query, e.g. "bus from bellville to cape town at 7am"
    #[serde(default)]
    pub query: String,
}

/// Ranked readings of a route query.
#[derive(Debug, Serialize)]
pub struct InterpretResponse {
    /// The query as received
    pub query: String,

    /// Confirmation questions, or a request to rephrase
    pub interpretations: Suggestions,

    /// Scored route candidates, best first
    pub options: Vec<ScoredRoute>,
}

/// Request to resolve one or more location strings.
#[derive(Debug, Deserialize)]
pub struct MatchLocationRequest {
    #[serde(default)]
    pub query: Option<LocationQuery>,
}

/// Canonical location names, best match first.
#[derive(Debug, Serialize)]
pub struct MatchLocationResponse {
    pub query: LocationQuery,
    pub options: Vec<String>,
}

/// A stored crowd report.
#[derive(Debug, Serialize)]
pub struct CrowdReportResponse {
    pub success: bool,
    pub report: CrowdReport,
}

/// Filters for listing crowd reports.
#[derive(Debug, Deserialize)]
pub struct CrowdReportsQuery {
    #[serde(rename = "routeId")]
    pub route_id: Option<String>,
    pub stop: Option<String>,
}

/// Crowd reports matching the filters.
#[derive(Debug, Serialize)]
pub struct CrowdReportsResponse {
    pub success: bool,
    pub reports: Vec<CrowdReport>,
}

/// A free-text question for the assistant.
#[derive(Debug, Deserialize)]
pub struct AskTextRequest {
    pub prompt: Option<String>,

    /// Earlier turns of the conversation
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// The assistant's answer.
#[derive(Debug, Serialize)]
pub struct AskTextResponse {
    pub response: String,
}

/// Request for the best departures between two places.
#[derive(Debug, Default, Deserialize)]
pub struct BestTimesBody {
    /// Timetable documents to consult
    pub pdf_files: Option<Vec<String>>,

    /// Desired departure time
    pub time: Option<String>,

    /// Destination
    pub whereto: Option<String>,

    /// Origin
    #[serde(rename = "fromWhere")]
    pub from_where: Option<String>,
}

impl BestTimesBody {
    /// Convert to an assistant request, or name every missing field.
    pub fn into_request(self) -> Result<BestTimesRequest, Vec<&'static str>> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        let documents = self.pdf_files.filter(|files| !files.is_empty());
        let time = present(self.time);
        let to = present(self.whereto);
        let from = present(self.from_where);

        match (documents, time, to, from) {
            (Some(documents), Some(time), Some(to), Some(from)) => Ok(BestTimesRequest {
                documents,
                time,
                from,
                to,
            }),
            (documents, time, to, from) => {
                let mut missing = Vec::new();
                if documents.is_none() {
                    missing.push("pdf_files");
                }
                if time.is_none() {
                    missing.push("time");
                }
                if to.is_none() {
                    missing.push("whereto");
                }
                if from.is_none() {
                    missing.push("fromWhere");
                }
                Err(missing)
            }
        }
    }
}

/// The assistant's best-times answer.
#[derive(Debug, Serialize)]
pub struct BestTimesResponse {
    pub result: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteCandidate;

    #[test]
    fn best_times_lists_missing_fields() {
        let body: BestTimesBody =
            serde_json::from_str(r#"{"pdf_files": [], "time": "7am", "whereto": " "}"#).unwrap();

        assert_eq!(
            body.into_request(),
            Err(vec!["pdf_files", "whereto", "fromWhere"])
        );
    }

    #[test]
    fn best_times_complete() {
        let body: BestTimesBody = serde_json::from_str(
            r#"{
                "pdf_files": ["route_101"],
                "time": "7am",
                "whereto": "Cape Town",
                "fromWhere": "Bellville"
            }"#,
        )
        .unwrap();

        let request = body.into_request().unwrap();
        assert_eq!(request.from, "Bellville");
        assert_eq!(request.to, "Cape Town");
        assert_eq!(request.documents, vec!["route_101"]);
    }

    #[test]
    fn match_location_accepts_string_or_list() {
        let one: MatchLocationRequest = serde_json::from_str(r#"{"query": "kasi"}"#).unwrap();
        assert_eq!(one.query, Some(LocationQuery::One("kasi".to_string())));

        let many: MatchLocationRequest =
            serde_json::from_str(r#"{"query": ["kasi", "town"]}"#).unwrap();
        assert!(matches!(many.query, Some(LocationQuery::Many(v)) if v.len() == 2));

        let none: MatchLocationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(none.query, None);
    }

    #[test]
    fn interpret_response_shape() {
        let response = InterpretResponse {
            query: "bellville to wynberg".to_string(),
            interpretations: Suggestions::Options(vec!["Something else".to_string()]),
            options: vec![ScoredRoute(
                RouteCandidate::new("Bellville", "Wynberg", None),
                88.5,
            )],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["options"][0][0]["from"], "Bellville");
        assert_eq!(json["options"][0][1], 88.5);
        assert_eq!(json["interpretations"][0], "Something else");
    }
}
