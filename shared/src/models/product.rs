//! Product models and derived stock rules

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default maximum stock threshold for new products
pub const DEFAULT_MAX_STOCK: i32 = 100;

/// Default unit of measure for new products
pub const DEFAULT_UNIT: &str = "UN";

/// A tracked product
///
/// `current_stock` is never set directly; it is always the signed sum of the
/// product's movements and only the movement path mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    pub unit: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Derived stock status against the configured thresholds
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.current_stock, self.min_stock, self.max_stock)
    }
}

/// A product decorated with resolved reference names and derived status,
/// as returned by product listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOverview {
    #[serde(flatten)]
    pub product: Product,
    /// Resolved category name; absent reference means no name, not an error
    pub category_name: Option<String>,
    pub supplier_name: Option<String>,
    pub stock_status: StockStatus,
}

/// Derived stock classification from current stock vs configured thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Low,
    Normal,
    High,
}

impl StockStatus {
    /// Classify a stock level: `Low` when at or below the minimum, `High`
    /// when at or above the maximum, otherwise `Normal`.
    ///
    /// Low is checked first, so a product whose stock meets both thresholds
    /// at once (`min_stock == max_stock`) reports `Low`.
    pub fn classify(current_stock: i32, min_stock: i32, max_stock: i32) -> Self {
        if current_stock <= min_stock {
            StockStatus::Low
        } else if current_stock >= max_stock {
            StockStatus::High
        } else {
            StockStatus::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Low => "low",
            StockStatus::Normal => "normal",
            StockStatus::High => "high",
        }
    }
}

/// Outcome of retiring a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetireOutcome {
    /// Row removed permanently; the product never had a movement
    HardDeleted,
    /// Active flag cleared; movement history preserved
    SoftDeleted,
}

/// Deletion gate for a product
///
/// A product with on-hand stock cannot be removed at all. A product that ever
/// participated in a movement is soft-deleted to keep its history; one with
/// no history is hard-deleted.
pub fn retire_outcome(
    current_stock: i32,
    movement_count: i64,
) -> Result<RetireOutcome, &'static str> {
    if current_stock > 0 {
        return Err("cannot remove product with on-hand stock");
    }
    if movement_count > 0 {
        Ok(RetireOutcome::SoftDeleted)
    } else {
        Ok(RetireOutcome::HardDeleted)
    }
}
