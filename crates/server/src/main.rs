use std::sync::Arc;

use kitchen_server::ai::client::GeminiClient;
use kitchen_server::config::Config;
use kitchen_server::error::ServiceError;
use kitchen_server::{app, AppState, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServiceError> {
    // Локальный .env не перекрывает уже заданные переменные окружения
    if let Ok(path) = dotenvy::dotenv() {
        tracing::info!("Loaded environment from {}", path.display());
    }
    let config = Config::from_env()?;
    let client = GeminiClient::new(&config)?;

    let state = AppState::new(Arc::new(client), Settings::from(&config));
    let app = app(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(
        model = %config.model,
        language = %config.language,
        extraction = %config.extraction,
        "Server running on http://{}",
        config.addr
    );
    axum::serve(listener, app).await?;
    Ok(())
}
