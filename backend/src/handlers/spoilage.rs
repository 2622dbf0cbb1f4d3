//! HTTP handlers for spoilage assessment endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::spoilage::{SpoilageAssessment, SpoilageService};
use crate::AppState;
use shared::ItemView;

/// Freshness assessment of recently purchased items
pub async fn get_spoilage_assessments(
    State(state): State<AppState>,
) -> AppResult<Json<SpoilageAssessment>> {
    let service = SpoilageService::new(state.inventory.clone(), state.config.analytics.clone());
    let assessment = service.assess_recent().await?;
    Ok(Json(assessment))
}

/// Items at or below the expiry alert threshold
pub async fn get_expiring_items(State(state): State<AppState>) -> AppResult<Json<Vec<ItemView>>> {
    let service = SpoilageService::new(state.inventory.clone(), state.config.analytics.clone());
    let items = service.expiring_items().await?;
    Ok(Json(items))
}
