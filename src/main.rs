use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use movies_api::app;
use movies_api::config::settings::AppConfig;
use movies_api::infrastructure::seed;
use movies_api::middleware::origin::OriginGate;
use movies_api::modules::movie::repository::MovieStore;
use movies_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new();
    let movies = seed::load(&config.seed_path)?;
    info!(count = movies.len(), path = %config.seed_path, "Movie collection seeded");

    let state = AppState::new(config, MovieStore::new(movies), OriginGate::default());
    let addr = state.config.bind_addr();
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server running on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
