//! HTTP handlers for product registry endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Product, ProductOverview, RetireOutcome};
use crate::services::product::{CreateProductInput, ProductService, UpdateProductInput};
use crate::AppState;

/// Query parameters for product listings
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Response for a retire command
#[derive(Debug, serde::Serialize)]
pub struct RetireResponse {
    pub outcome: RetireOutcome,
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.create(input).await?;
    Ok(Json(product))
}

/// List products with resolved reference names and derived stock status
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> AppResult<Json<Vec<ProductOverview>>> {
    let service = ProductService::new(state.db);
    let products = service.list(query.include_inactive).await?;
    Ok(Json(products))
}

/// Look up a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.get(product_id).await?;
    Ok(Json(product))
}

/// Update a product's registry fields
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.update(product_id, input).await?;
    Ok(Json(product))
}

/// Retire a product (soft- or hard-delete behind the deletion gate)
pub async fn retire_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<RetireResponse>> {
    let service = ProductService::new(state.db);
    let outcome = service.retire(product_id).await?;
    Ok(Json(RetireResponse { outcome }))
}
