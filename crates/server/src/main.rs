use server::config::{Config, EngineConfig};
use server::routes;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();

    // Discover the engine once at startup; analyses reuse the resolved
    // path but each spawns its own session.
    let candidates = config.engine_candidates();
    let candidate_refs: Vec<&str> = candidates.iter().map(String::as_str).collect();
    let engine_path = match review_core::engine::discover(&candidate_refs).await {
        Ok(path) => {
            tracing::info!(path = %path, "Engine discovered");
            Some(path)
        }
        Err(e) => {
            tracing::warn!(error = %e, "No engine found; analysis requests will fail");
            None
        }
    };

    let engine = EngineConfig {
        path: engine_path,
        limit: config.search_limit(),
    };

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(routes::health::root))
        .route("/api/games/{username}", get(routes::games::get_games))
        .route("/api/analyze", post(routes::analyze::analyze_game))
        .layer(Extension(engine))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
