//! Report record types
//!
//! Read-only projections derived from products and movements. These are
//! plain records; the backend computes them fresh from persisted state on
//! every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Headline dashboard metrics over active products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_products: i64,
    pub low_stock_products: i64,
    /// Sum of current_stock * sale_price across active products
    pub inventory_value: Decimal,
}

/// A low-stock listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowStockEntry {
    pub product_id: Uuid,
    pub name: String,
    pub current_stock: i32,
    pub min_stock: i32,
    pub unit: String,
}

/// Per-category product count and inventory value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdownEntry {
    /// Category name, or "Uncategorized" for the synthetic bucket
    pub category_name: String,
    pub product_count: i64,
    pub inventory_value: Decimal,
}

/// Inbound vs outbound counts over the retrieved movement window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementTotals {
    pub inbound: i64,
    pub outbound: i64,
}
