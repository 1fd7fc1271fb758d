//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::assistant::AssistantError;
use crate::cache::LoadError;
use crate::documents::DocumentError;
use crate::extract::ExtractionOutcome;
use crate::interpret::generate_suggestions;
use crate::reports::{CrowdReport, NewReport, ReportError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/files/list", get(list_files))
        .route("/extract/:filename", get(extract_document))
        .route("/interpret", post(interpret))
        .route("/match-location", post(match_location))
        .route("/crowd-report", post(submit_crowd_report))
        .route("/crowd-reports", get(list_crowd_reports))
        .route("/ask-text", post(ask_text))
        .route("/best-times", post(best_times))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, body = %String::from_utf8_lossy(body), "Rejected request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// List the documents available for extraction.
async fn list_files(State(state): State<AppState>) -> Result<Json<FileListResponse>, AppError> {
    let files = state.extractor.list().await?;
    Ok(Json(FileListResponse { files }))
}

/// Extract stops and times from one document.
async fn extract_document(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<ExtractionOutcome>, AppError> {
    let outcome = state.extractor.extract(&filename).await?;
    Ok(Json(ExtractionOutcome::clone(&outcome)))
}

/// Interpret a free-text route query.
async fn interpret(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<InterpretResponse>, AppError> {
    let req: InterpretRequest = parse_body(&body)?;
    if req.query.is_empty() {
        return Err(AppError::BadRequest {
            message: "Missing 'query' in request.".to_string(),
        });
    }

    let routes = state.interpreter.extract_possible_routes(&req.query);
    let options = state
        .interpreter
        .score_routes_by_query_match(&req.query, routes);
    let interpretations = generate_suggestions(&options);

    tracing::debug!(query = %req.query, options = options.len(), "Interpreted query");

    Ok(Json(InterpretResponse {
        query: req.query,
        interpretations,
        options,
    }))
}

/// Resolve location strings to canonical names.
async fn match_location(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MatchLocationResponse>, AppError> {
    let req: MatchLocationRequest = parse_body(&body)?;
    let query = req
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "Missing 'query' in request.".to_string(),
        })?;

    let options = state.interpreter.match_locations_sort(&query);
    Ok(Json(MatchLocationResponse { query, options }))
}

/// Store a crowd report.
async fn submit_crowd_report(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let new: NewReport = parse_body(&body)?;
    let report = CrowdReport::from_new(new, chrono::Utc::now())?;
    state.reports.submit(report.clone())?;

    Ok((
        StatusCode::CREATED,
        Json(CrowdReportResponse {
            success: true,
            report,
        }),
    )
        .into_response())
}

/// List crowd reports, optionally filtered by route and stop.
async fn list_crowd_reports(
    State(state): State<AppState>,
    Query(filter): Query<CrowdReportsQuery>,
) -> Result<Json<CrowdReportsResponse>, AppError> {
    let reports = state
        .reports
        .query(filter.route_id.as_deref(), filter.stop.as_deref())?;
    Ok(Json(CrowdReportsResponse {
        success: true,
        reports,
    }))
}

/// Ask the assistant a free-text question.
async fn ask_text(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AskTextResponse>, AppError> {
    let req: AskTextRequest = parse_body(&body)?;
    let prompt = req
        .prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "Missing required field: prompt".to_string(),
        })?;

    let response = state.assistant.ask(&prompt, &req.history).await?;
    Ok(Json(AskTextResponse { response }))
}

/// Ask the assistant for the best departures between two places.
async fn best_times(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BestTimesResponse>, AppError> {
    let req: BestTimesBody = parse_body(&body)?;
    let request = req.into_request().map_err(|missing| AppError::BadRequest {
        message: format!("Missing required fields: {}", missing.join(", ")),
    })?;

    let result = state.assistant.best_times(&request).await?;
    Ok(Json(BestTimesResponse { result }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Document(DocumentError::NotFound(name)) => AppError::NotFound {
                message: format!("Document {name} not found"),
            },
            LoadError::Document(e @ DocumentError::InvalidName(_)) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<ReportError> for AppError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::MissingField(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            ReportError::StoreUnavailable => AppError::Unavailable {
                message: e.to_string(),
            },
        }
    }
}

impl From<AssistantError> for AppError {
    fn from(e: AssistantError) -> Self {
        match e {
            AssistantError::NotConfigured => AppError::Unavailable {
                message: e.to_string(),
            },
            AssistantError::Upstream(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "Request failed");
        } else {
            tracing::debug!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
