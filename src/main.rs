use axum::Router;
use runroute::config::Config;
use runroute::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runroute=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting runroute API server");
    tracing::info!(
        base_url = %config.google_maps.base_url,
        timeout_ms = config.google_maps.request_timeout.as_millis() as u64,
        street_factor = config.planner.street_factor,
        "Configuration loaded: upstream {}, timeout {}ms",
        config.google_maps.base_url,
        config.google_maps.request_timeout.as_millis()
    );

    let state = Arc::new(AppState::new(&config.google_maps, config.planner.clone())?);

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", runroute::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
