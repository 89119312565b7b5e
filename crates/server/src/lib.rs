use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use shared::{ExtractionMode, Language};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod ai;
pub mod config;
pub mod error;
pub mod routes;

use ai::client::ModelClient;
use config::Config;

/// Настройки, общие для всех запросов
#[derive(Debug, Clone)]
pub struct Settings {
    pub model: String,
    pub language: Language,
    pub extraction: ExtractionMode,
    pub timeout: Duration,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            language: config.language,
            extraction: config.extraction,
            timeout: config.timeout,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ModelClient>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(client: Arc<dyn ModelClient>, settings: Settings) -> Self {
        Self {
            client,
            settings: Arc::new(settings),
        }
    }
}

pub fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/generate", post(routes::generate))
        .route("/analyze", post(routes::analyze))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
