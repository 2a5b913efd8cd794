//! Stock movement models
//!
//! A movement is an immutable ledger event; the ledger never edits or
//! deletes one. Corrections are made by registering a compensating movement
//! of the opposite kind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Inbound,
    Outbound,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Inbound => "inbound",
            MovementKind::Outbound => "outbound",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "inbound" => Some(MovementKind::Inbound),
            "outbound" => Some(MovementKind::Outbound),
            _ => None,
        }
    }

    /// Signed stock delta this movement applies for the given quantity
    pub fn signed_delta(&self, quantity: i32) -> i32 {
        match self {
            MovementKind::Inbound => quantity,
            MovementKind::Outbound => -quantity,
        }
    }
}

/// An inventory ledger event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    pub unit_value: Decimal,
    pub total_value: Decimal,
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub actor: String,
}

/// A movement joined with its product name, as returned by movement listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementOverview {
    #[serde(flatten)]
    pub movement: Movement,
    pub product_name: String,
}

/// Computed value of a movement: quantity times unit value
pub fn movement_total(quantity: i32, unit_value: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_value
}
