//! HTTP handlers for the reconciled inventory view

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::error::AppResult;
use crate::services::inventory::{ExportQuery, InventoryService};
use crate::AppState;
use shared::{ItemView, ItemViewFilter};

/// Get the reconciled, filtered inventory view
pub async fn get_inventory_view(
    State(state): State<AppState>,
    Query(filter): Query<ItemViewFilter>,
) -> AppResult<Json<Vec<ItemView>>> {
    let service = InventoryService::new(state.inventory.clone());
    let views = service.get_item_views(&filter).await?;
    Ok(Json(views))
}

/// Export the reconciled inventory view as CSV
pub async fn export_inventory(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = InventoryService::new(state.inventory.clone());
    let csv = service.export_csv(&query).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"inventory-{}-months.csv\"", query.months),
            ),
        ],
        csv,
    ))
}
