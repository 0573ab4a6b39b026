use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::get,
    serve, Router,
};
use shelfwatch_utils::{init_logging, validate_model, AppConfig};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

mod error;
mod handlers;
mod metrics;
mod routes;
mod state;


use handlers::{health_check, metrics_handler};
pub use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration ({}), using defaults", e);
        AppConfig::default()
    });

    init_logging(&config.logging)?;
    validate_model(&config)?;
    info!("Starting Shelfwatch report service");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = create_app(AppState::new(config)?);

    let listener = TcpListener::bind(&addr).await?;
    info!("Report service listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

fn create_app(state: AppState) -> Router {
    let max_request_size = state.config.server.max_request_size;

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1", routes::create_api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(DefaultBodyLimit::max(max_request_size)),
        )
        .with_state(state)
}
