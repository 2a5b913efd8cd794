//! HTTP handlers for reporting endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{CategoryBreakdownEntry, DashboardSummary, LowStockEntry, MovementTotals};
use crate::services::report::ReportService;
use crate::AppState;

/// Query parameters for the low-stock listing
#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    pub limit: Option<i64>,
}

/// Dashboard summary over active products
pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> AppResult<Json<DashboardSummary>> {
    let service = ReportService::new(state.db);
    let summary = service.dashboard().await?;
    Ok(Json(summary))
}

/// Low-stock products, truncated to the requested limit
pub async fn low_stock_list(
    State(state): State<AppState>,
    Query(query): Query<LowStockQuery>,
) -> AppResult<Json<Vec<LowStockEntry>>> {
    let service = ReportService::new(state.db);
    let entries = service.low_stock(query.limit.unwrap_or(10)).await?;
    Ok(Json(entries))
}

/// Product count and inventory value per category
pub async fn category_breakdown(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryBreakdownEntry>>> {
    let service = ReportService::new(state.db);
    let breakdown = service.category_breakdown().await?;
    Ok(Json(breakdown))
}

/// Inbound vs outbound counts over the recent movement window
pub async fn movement_totals(State(state): State<AppState>) -> AppResult<Json<MovementTotals>> {
    let service = ReportService::new(state.db);
    let totals = service.movement_totals().await?;
    Ok(Json(totals))
}
