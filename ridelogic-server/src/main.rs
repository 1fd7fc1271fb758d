use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use ridelogic_server::assistant::UnconfiguredAssistant;
use ridelogic_server::cache::{CacheConfig, CachedExtractor};
use ridelogic_server::documents::TextDirectorySource;
use ridelogic_server::extract::{ExtractConfig, ScheduleExtractor};
use ridelogic_server::fuzzy::{FuzzyMatcher, MatchThresholds};
use ridelogic_server::interpret::{ClockTimeExtractor, QueryInterpreter};
use ridelogic_server::reports::InMemoryReportStore;
use ridelogic_server::vocabulary::Vocabulary;
use ridelogic_server::web::{AppState, create_router};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DOCUMENTS_DIR: &str = "pdf_downloads";

fn load_vocabulary() -> Vocabulary {
    match std::env::var("VOCABULARY_PATH") {
        Ok(path) => {
            let vocabulary =
                Vocabulary::from_json_file(&path).expect("Failed to load vocabulary");
            tracing::info!(%path, locations = vocabulary.locations.len(), "Loaded vocabulary");
            vocabulary
        }
        Err(_) => {
            tracing::warn!("VOCABULARY_PATH not set, using built-in Cape Town vocabulary");
            Vocabulary::default()
        }
    }
}

fn load_extract_config() -> ExtractConfig {
    match std::env::var("EXTRACT_CONFIG_PATH") {
        Ok(path) => {
            let config =
                ExtractConfig::from_json_file(&path).expect("Failed to load extract config");
            tracing::info!(%path, "Loaded extract config");
            config
        }
        Err(_) => ExtractConfig::default(),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let bind_addr: IpAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|a| a.parse().ok())
        .unwrap_or(IpAddr::from([0, 0, 0, 0]));
    let documents_dir =
        std::env::var("DOCUMENTS_DIR").unwrap_or_else(|_| DEFAULT_DOCUMENTS_DIR.to_string());

    // Interpretation
    let vocabulary = Arc::new(load_vocabulary());
    let matcher = FuzzyMatcher::new(vocabulary, MatchThresholds::default());
    let interpreter = QueryInterpreter::new(matcher, Arc::new(ClockTimeExtractor))
        .expect("Failed to build query interpreter");

    // Extraction
    let extractor =
        ScheduleExtractor::new(load_extract_config()).expect("Invalid extract config");
    let cached_extractor = CachedExtractor::new(
        Arc::new(TextDirectorySource::new(&documents_dir)),
        extractor,
        &CacheConfig::default(),
    );
    tracing::info!(dir = %documents_dir, "Serving timetable documents");

    let state = AppState::new(
        cached_extractor,
        interpreter,
        Arc::new(InMemoryReportStore::new()),
        Arc::new(UnconfiguredAssistant),
    );
    let app = create_router(state);

    let addr = SocketAddr::new(bind_addr, port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "RideLogic listening");

    axum::serve(listener, app).await.expect("Server error");
}
