//! Earthquake Prediction API
//!
//! Loads a pre-trained magnitude regressor once at startup and serves it over
//! HTTP.
//!
//! ```text
//! POST /predict/?latitude&longitude&depth&year&month&day
//!        │
//!        ▼
//!  ┌────────────┐    ┌──────────────┐    ┌──────────────────────┐
//!  │  Query     │ ─► │  Domain      │ ─► │  LoadedModel         │
//!  │  coercion  │    │  checks      │    │  (onnx | linear)     │
//!  └────────────┘    └──────────────┘    └──────────┬───────────┘
//!                                                   ▼
//!                                 {"predicted_magnitude": f64}
//! ```

mod config;
mod error;
mod handlers;
mod model;
mod models;
mod validation;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
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

    tracing::info!("Earthquake Prediction API starting...");
    tracing::info!("Input validation mode: {:?}", config.input_validation);

    let model = model::load(&config.model_path).with_context(|| {
        format!("failed to load model from {}", config.model_path.display())
    })?;

    let state = AppState {
        model: Arc::new(model),
        config: config.clone(),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("🚀 Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quake_predict=debug,tower_http=debug".into());
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
    pub model: Arc<model::LoadedModel>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::predict::root))
        .route("/predict/", post(handlers::predict::predict))
        .route("/predict", post(handlers::predict::predict))
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
