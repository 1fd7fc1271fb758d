//! Application state for the web layer.

use std::sync::Arc;

use crate::assistant::TransitAssistant;
use crate::cache::CachedExtractor;
use crate::interpret::QueryInterpreter;
use crate::reports::ReportStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached timetable extraction over the document source
    pub extractor: Arc<CachedExtractor>,

    /// Route and location interpretation
    pub interpreter: Arc<QueryInterpreter>,

    /// Crowd report storage
    pub reports: Arc<dyn ReportStore>,

    /// Question-answering backend
    pub assistant: Arc<dyn TransitAssistant>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        extractor: CachedExtractor,
        interpreter: QueryInterpreter,
        reports: Arc<dyn ReportStore>,
        assistant: Arc<dyn TransitAssistant>,
    ) -> Self {
        Self {
            extractor: Arc::new(extractor),
            interpreter: Arc::new(interpreter),
            reports,
            assistant,
        }
    }
}
