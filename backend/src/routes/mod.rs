//! Route definitions for the Kitchen Waste Management API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Reconciled inventory view
        .nest("/inventory", inventory_routes())
        // Spoilage assessment
        .nest("/spoilage", spoilage_routes())
        // Waste analytics
        .nest("/analytics", analytics_routes())
}

/// Inventory view routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/view", get(handlers::get_inventory_view))
        .route("/export", get(handlers::export_inventory))
}

/// Spoilage assessment routes
fn spoilage_routes() -> Router<AppState> {
    Router::new()
        .route("/assessments", get(handlers::get_spoilage_assessments))
        .route("/expiring", get(handlers::get_expiring_items))
}

/// Waste analytics routes
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/distribution", get(handlers::get_waste_distribution))
        .route("/trends", get(handlers::get_waste_trends))
        .route("/item-analysis", get(handlers::get_item_analysis))
        .route("/cost", get(handlers::get_cost_analysis))
        .route("/summary", get(handlers::get_waste_summary))
        .route("/recommendations", get(handlers::get_recommendations))
}
