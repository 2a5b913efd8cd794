//! HTTP handlers for stock movement endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Movement, MovementOverview};
use crate::services::movement::{MovementService, RecordMovementInput};
use crate::AppState;

/// Register a stock movement
pub async fn register_movement(
    State(state): State<AppState>,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<Json<Movement>> {
    let service = MovementService::new(state.db);
    let movement = service.record(input).await?;
    Ok(Json(movement))
}

/// List recent movements (newest-first, capped at 100)
pub async fn list_movements(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MovementOverview>>> {
    let service = MovementService::new(state.db);
    let movements = service.list().await?;
    Ok(Json(movements))
}

/// List all movements for one product
pub async fn get_product_movements(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<MovementOverview>>> {
    let service = MovementService::new(state.db);
    let movements = service.list_for_product(product_id).await?;
    Ok(Json(movements))
}
