//! Earthquake Insights Dashboard
//!
//! Loads the events CSV once at startup and serves a single page with a year
//! selector and two plotly charts. Every selection change calls
//! `/api/charts`, which filters the in-memory records and rebuilds both
//! figures from scratch.

mod charts;
mod config;
mod dataset;
mod error;
mod handlers;
mod models;
mod page;

use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    init_tracing();
    let config = config::Config::from_env();

    tracing::info!("Earthquake Insights Dashboard starting...");

    let dataset = dataset::Dataset::load(&config.data_path).with_context(|| {
        format!("failed to load dataset from {}", config.data_path.display())
    })?;
    tracing::info!(
        "Loaded {} records spanning {} years from {}",
        dataset.len(),
        dataset.years().len(),
        dataset.source()
    );
    if dataset.is_empty() {
        tracing::warn!("Dataset has no records; charts will be empty");
    }

    let state = AppState {
        dataset: Arc::new(dataset),
        config: config.clone(),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("🚀 Dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quake_dashboard=debug,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<dataset::Dataset>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::page::index))
        .route("/api/charts", get(handlers::charts::charts))
        .route("/api/years", get(handlers::charts::years))
        .route("/health", get(handlers::health::check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
