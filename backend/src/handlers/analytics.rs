//! HTTP handlers for waste analytics endpoints
//!
//! Each endpoint serves one slice of the waste report so the dashboard
//! panels can load independently.

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::analytics::AnalyticsService;
use crate::AppState;
use shared::{
    CategoryWaste, CostSummary, ItemWasteAnalysis, Recommendation, WasteSummary, WeeklyTrendPoint,
};

fn service(state: &AppState) -> AnalyticsService {
    AnalyticsService::new(state.inventory.clone(), state.config.analytics.clone())
}

/// Waste share per category
pub async fn get_waste_distribution(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryWaste>>> {
    let report = service(&state).waste_report().await?;
    Ok(Json(report.distribution))
}

/// Daily waste versus target over the trailing week
pub async fn get_waste_trends(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WeeklyTrendPoint>>> {
    let report = service(&state).waste_report().await?;
    Ok(Json(report.weekly_trends))
}

/// Per-item waste analysis, highest waste first
pub async fn get_item_analysis(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ItemWasteAnalysis>>> {
    let report = service(&state).waste_report().await?;
    Ok(Json(report.item_analysis))
}

/// Financial impact of waste
pub async fn get_cost_analysis(State(state): State<AppState>) -> AppResult<Json<CostSummary>> {
    let report = service(&state).waste_report().await?;
    Ok(Json(report.cost_summary))
}

/// Headline waste metrics
pub async fn get_waste_summary(State(state): State<AppState>) -> AppResult<Json<WasteSummary>> {
    let report = service(&state).waste_report().await?;
    Ok(Json(report.summary))
}

/// Ranked action items
pub async fn get_recommendations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let recommendations = service(&state).recommendations().await?;
    Ok(Json(recommendations))
}
