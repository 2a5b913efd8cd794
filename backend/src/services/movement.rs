//! Movement engine: the single path through which stock quantities change
//!
//! A movement is appended and the owning product's stock adjusted inside one
//! transaction; if either step fails, neither is observable. Movements are
//! never edited or deleted afterwards.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{movement_total, Movement, MovementKind, MovementOverview};
use shared::validation::{validate_movement_quantity, validate_unit_value};

/// Actor label recorded when the caller does not supply one
pub(crate) const DEFAULT_ACTOR: &str = "system";

/// Movement service for registering and listing stock movements
#[derive(Clone)]
pub struct MovementService {
    db: PgPool,
}

/// Input for registering a movement
#[derive(Debug, Deserialize)]
pub struct RecordMovementInput {
    pub product_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    pub unit_value: Option<Decimal>,
    pub note: Option<String>,
    pub actor: Option<String>,
}

/// Movement row as stored
#[derive(Debug, FromRow)]
struct MovementRow {
    id: Uuid,
    product_id: Uuid,
    kind: String,
    quantity: i32,
    unit_value: Decimal,
    total_value: Decimal,
    note: Option<String>,
    occurred_at: DateTime<Utc>,
    actor: String,
}

/// Row for movement listings joined with the product name
#[derive(Debug, FromRow)]
struct MovementOverviewRow {
    id: Uuid,
    product_id: Uuid,
    kind: String,
    quantity: i32,
    unit_value: Decimal,
    total_value: Decimal,
    note: Option<String>,
    occurred_at: DateTime<Utc>,
    actor: String,
    product_name: String,
}

fn parse_kind(kind: &str) -> AppResult<MovementKind> {
    MovementKind::from_str(kind).ok_or_else(|| {
        AppError::Storage(sqlx::Error::Decode(
            format!("unknown movement kind: {kind}").into(),
        ))
    })
}

impl TryFrom<MovementRow> for Movement {
    type Error = AppError;

    fn try_from(row: MovementRow) -> AppResult<Self> {
        Ok(Movement {
            id: row.id,
            product_id: row.product_id,
            kind: parse_kind(&row.kind)?,
            quantity: row.quantity,
            unit_value: row.unit_value,
            total_value: row.total_value,
            note: row.note,
            occurred_at: row.occurred_at,
            actor: row.actor,
        })
    }
}

impl TryFrom<MovementOverviewRow> for MovementOverview {
    type Error = AppError;

    fn try_from(row: MovementOverviewRow) -> AppResult<Self> {
        Ok(MovementOverview {
            movement: Movement {
                id: row.id,
                product_id: row.product_id,
                kind: parse_kind(&row.kind)?,
                quantity: row.quantity,
                unit_value: row.unit_value,
                total_value: row.total_value,
                note: row.note,
                occurred_at: row.occurred_at,
                actor: row.actor,
            },
            product_name: row.product_name,
        })
    }
}

/// Register a movement on an open transaction: validates the command,
/// appends the ledger row, and adjusts the product's stock. Every stock
/// mutation in the system goes through here.
pub(crate) async fn record_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
    kind: MovementKind,
    quantity: i32,
    unit_value: Decimal,
    note: Option<&str>,
    actor: &str,
) -> AppResult<Movement> {
    validate_movement_quantity(quantity).map_err(|message| AppError::Validation {
        field: "quantity".to_string(),
        message: message.to_string(),
    })?;
    validate_unit_value(unit_value).map_err(|message| AppError::Validation {
        field: "unit_value".to_string(),
        message: message.to_string(),
    })?;

    let current_stock =
        sqlx::query_scalar::<_, i32>("SELECT current_stock FROM products WHERE id = $1 FOR UPDATE")
            .bind(product_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    // No partial fulfillment: an outbound movement that would drive stock
    // negative is rejected before anything is written
    if kind == MovementKind::Outbound && current_stock < quantity {
        return Err(AppError::InsufficientStock(format!(
            "requested {} but only {} on hand",
            quantity, current_stock
        )));
    }

    let total_value = movement_total(quantity, unit_value);

    let row = sqlx::query_as::<_, MovementRow>(
        r#"
        INSERT INTO movements (product_id, kind, quantity, unit_value, total_value, note, actor)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, product_id, kind, quantity, unit_value, total_value, note, occurred_at, actor
        "#,
    )
    .bind(product_id)
    .bind(kind.as_str())
    .bind(quantity)
    .bind(unit_value)
    .bind(total_value)
    .bind(note)
    .bind(actor)
    .fetch_one(&mut **tx)
    .await?;

    sqlx::query(
        "UPDATE products SET current_stock = current_stock + $1, updated_at = now() WHERE id = $2",
    )
    .bind(kind.signed_delta(quantity))
    .bind(product_id)
    .execute(&mut **tx)
    .await?;

    row.try_into()
}

impl MovementService {
    /// Create a new MovementService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a stock movement
    ///
    /// Re-issuing an identical command registers a second movement and
    /// applies the stock delta again; duplicate submission means duplicate
    /// stock change.
    pub async fn record(&self, input: RecordMovementInput) -> AppResult<Movement> {
        let mut tx = self.db.begin().await?;

        let movement = record_in_tx(
            &mut tx,
            input.product_id,
            input.kind,
            input.quantity,
            input.unit_value.unwrap_or(Decimal::ZERO),
            input.note.as_deref(),
            input.actor.as_deref().unwrap_or(DEFAULT_ACTOR),
        )
        .await?;

        tx.commit().await?;

        Ok(movement)
    }

    /// List movements newest-first, capped at the 100 most recent
    ///
    /// The cap keeps unfiltered history scans bounded; per-product queries
    /// (`list_for_product`) are scoped and therefore unbounded.
    pub async fn list(&self) -> AppResult<Vec<MovementOverview>> {
        let rows = sqlx::query_as::<_, MovementOverviewRow>(
            r#"
            SELECT m.id, m.product_id, m.kind, m.quantity, m.unit_value, m.total_value,
                   m.note, m.occurred_at, m.actor, p.name AS product_name
            FROM movements m
            JOIN products p ON p.id = m.product_id
            ORDER BY m.occurred_at DESC
            LIMIT 100
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List all movements for one product, newest-first
    pub async fn list_for_product(&self, product_id: Uuid) -> AppResult<Vec<MovementOverview>> {
        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let rows = sqlx::query_as::<_, MovementOverviewRow>(
            r#"
            SELECT m.id, m.product_id, m.kind, m.quantity, m.unit_value, m.total_value,
                   m.note, m.occurred_at, m.actor, p.name AS product_name
            FROM movements m
            JOIN products p ON p.id = m.product_id
            WHERE m.product_id = $1
            ORDER BY m.occurred_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
