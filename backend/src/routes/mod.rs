//! Route definitions for the Stock Control System

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Product registry
        .nest("/products", product_routes())
        // Movement ledger
        .nest("/movements", movement_routes())
        // Catalog lookups
        .route("/categories", get(handlers::list_categories))
        .route("/suppliers", get(handlers::list_suppliers))
        // Reports
        .nest("/reports", report_routes())
}

/// Product registry routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::retire_product),
        )
        .route(
            "/:product_id/movements",
            get(handlers::get_product_movements),
        )
}

/// Movement ledger routes
fn movement_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::list_movements).post(handlers::register_movement),
    )
}

/// Reporting routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::dashboard_summary))
        .route("/low-stock", get(handlers::low_stock_list))
        .route("/categories", get(handlers::category_breakdown))
        .route("/movements", get(handlers::movement_totals))
}
