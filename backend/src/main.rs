//! Kitchen Waste Management - Analytics Server
//!
//! Read-side service for restaurant kitchens: reconciled inventory views,
//! spoilage assessments, and waste analytics over batch data owned by the
//! external inventory service.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::InventoryClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub inventory: InventoryClient,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kwm_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Kitchen Waste Management Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Inventory API: {}", config.inventory_api.base_url);

    // Build the external inventory API client
    let inventory = InventoryClient::new(
        config.inventory_api.base_url.clone(),
        Duration::from_secs(config.inventory_api.timeout_seconds),
    )?;

    // Create application state
    let state = AppState {
        inventory,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Kitchen Waste Management API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
