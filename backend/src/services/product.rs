//! Product registry: create, edit, list, and retire products
//!
//! The registry never mutates stock directly; the only stock change it ever
//! causes is the synthetic initial-stock movement on creation, which goes
//! through the movement engine inside the same transaction as the insert.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::movement;
use shared::models::{
    retire_outcome, MovementKind, Product, ProductOverview, RetireOutcome, StockStatus,
    DEFAULT_MAX_STOCK, DEFAULT_UNIT,
};
use shared::validation::{
    validate_initial_stock, validate_price, validate_product_name, validate_stock_thresholds,
};

/// Note recorded on the synthetic inbound movement that establishes a
/// product's initial on-hand quantity
const INITIAL_STOCK_NOTE: &str = "Initial stock";

/// Product service for registry operations
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub purchase_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    /// Initial on-hand quantity, established via an inbound movement rather
    /// than written to the stock column directly
    pub initial_stock: Option<i32>,
    pub min_stock: Option<i32>,
    pub max_stock: Option<i32>,
    pub unit: Option<String>,
}

/// Input for updating a product
///
/// There is deliberately no stock field here; `current_stock` is owned by
/// the movement engine.
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub purchase_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub min_stock: Option<i32>,
    pub max_stock: Option<i32>,
    pub unit: Option<String>,
}

/// Product row as stored
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    category_id: Option<Uuid>,
    supplier_id: Option<Uuid>,
    purchase_price: Decimal,
    sale_price: Decimal,
    current_stock: i32,
    min_stock: i32,
    max_stock: i32,
    unit: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            category_id: row.category_id,
            supplier_id: row.supplier_id,
            purchase_price: row.purchase_price,
            sale_price: row.sale_price,
            current_stock: row.current_stock,
            min_stock: row.min_stock,
            max_stock: row.max_stock,
            unit: row.unit,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row for product listings with resolved reference names
#[derive(Debug, FromRow)]
struct ProductListRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    category_id: Option<Uuid>,
    supplier_id: Option<Uuid>,
    purchase_price: Decimal,
    sale_price: Decimal,
    current_stock: i32,
    min_stock: i32,
    max_stock: i32,
    unit: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: Option<String>,
    supplier_name: Option<String>,
}

impl From<ProductListRow> for ProductOverview {
    fn from(row: ProductListRow) -> Self {
        let stock_status = StockStatus::classify(row.current_stock, row.min_stock, row.max_stock);
        ProductOverview {
            product: Product {
                id: row.id,
                name: row.name,
                description: row.description,
                category_id: row.category_id,
                supplier_id: row.supplier_id,
                purchase_price: row.purchase_price,
                sale_price: row.sale_price,
                current_stock: row.current_stock,
                min_stock: row.min_stock,
                max_stock: row.max_stock,
                unit: row.unit,
                active: row.active,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            category_name: row.category_name,
            supplier_name: row.supplier_name,
            stock_status,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, description, category_id, supplier_id, purchase_price, \
     sale_price, current_stock, min_stock, max_stock, unit, active, created_at, updated_at";

fn validate_fields(
    name: &str,
    purchase_price: Decimal,
    sale_price: Decimal,
    min_stock: i32,
    max_stock: i32,
) -> AppResult<()> {
    validate_product_name(name).map_err(|message| AppError::Validation {
        field: "name".to_string(),
        message: message.to_string(),
    })?;
    validate_price(purchase_price).map_err(|message| AppError::Validation {
        field: "purchase_price".to_string(),
        message: message.to_string(),
    })?;
    validate_price(sale_price).map_err(|message| AppError::Validation {
        field: "sale_price".to_string(),
        message: message.to_string(),
    })?;
    validate_stock_thresholds(min_stock, max_stock).map_err(|message| AppError::Validation {
        field: "max_stock".to_string(),
        message: message.to_string(),
    })?;
    Ok(())
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product
    ///
    /// The row is persisted with zero stock; a requested initial quantity is
    /// then established through the movement engine in the same transaction,
    /// so a creation is never half-applied.
    pub async fn create(&self, input: CreateProductInput) -> AppResult<Product> {
        let purchase_price = input.purchase_price.unwrap_or(Decimal::ZERO);
        let sale_price = input.sale_price.unwrap_or(Decimal::ZERO);
        let min_stock = input.min_stock.unwrap_or(0);
        let max_stock = input.max_stock.unwrap_or(DEFAULT_MAX_STOCK);
        let unit = input.unit.unwrap_or_else(|| DEFAULT_UNIT.to_string());
        let initial_stock = input.initial_stock.unwrap_or(0);

        validate_fields(&input.name, purchase_price, sale_price, min_stock, max_stock)?;
        validate_initial_stock(initial_stock).map_err(|message| AppError::Validation {
            field: "initial_stock".to_string(),
            message: message.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (
                name, description, category_id, supplier_id, purchase_price,
                sale_price, current_stock, min_stock, max_stock, unit
            )
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, $9)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.category_id)
        .bind(input.supplier_id)
        .bind(purchase_price)
        .bind(sale_price)
        .bind(min_stock)
        .bind(max_stock)
        .bind(&unit)
        .fetch_one(&mut *tx)
        .await?;

        let row = if initial_stock > 0 {
            movement::record_in_tx(
                &mut tx,
                row.id,
                MovementKind::Inbound,
                initial_stock,
                purchase_price,
                Some(INITIAL_STOCK_NOTE),
                movement::DEFAULT_ACTOR,
            )
            .await?;

            // Re-read so the returned record reflects the established stock
            sqlx::query_as::<_, ProductRow>(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
            ))
            .bind(row.id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            row
        };

        tx.commit().await?;

        Ok(row.into())
    }

    /// Update a product's registry fields; `current_stock` stays untouched
    pub async fn update(&self, product_id: Uuid, input: UpdateProductInput) -> AppResult<Product> {
        let purchase_price = input.purchase_price.unwrap_or(Decimal::ZERO);
        let sale_price = input.sale_price.unwrap_or(Decimal::ZERO);
        let min_stock = input.min_stock.unwrap_or(0);
        let max_stock = input.max_stock.unwrap_or(DEFAULT_MAX_STOCK);
        let unit = input.unit.unwrap_or_else(|| DEFAULT_UNIT.to_string());

        validate_fields(&input.name, purchase_price, sale_price, min_stock, max_stock)?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products SET
                name = $1, description = $2, category_id = $3, supplier_id = $4,
                purchase_price = $5, sale_price = $6, min_stock = $7,
                max_stock = $8, unit = $9, updated_at = now()
            WHERE id = $10
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.category_id)
        .bind(input.supplier_id)
        .bind(purchase_price)
        .bind(sale_price)
        .bind(min_stock)
        .bind(max_stock)
        .bind(&unit)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }

    /// Look up a single product by id
    pub async fn get(&self, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }

    /// List products ordered by name, decorated with resolved category and
    /// supplier names and the derived stock status
    pub async fn list(&self, include_inactive: bool) -> AppResult<Vec<ProductOverview>> {
        let rows = sqlx::query_as::<_, ProductListRow>(
            r#"
            SELECT p.id, p.name, p.description, p.category_id, p.supplier_id,
                   p.purchase_price, p.sale_price, p.current_stock, p.min_stock,
                   p.max_stock, p.unit, p.active, p.created_at, p.updated_at,
                   c.name AS category_name, s.name AS supplier_name
            FROM products p
            LEFT JOIN categories c ON p.category_id = c.id
            LEFT JOIN suppliers s ON p.supplier_id = s.id
            WHERE p.active OR $1
            ORDER BY p.name
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Retire a product behind the two-tier deletion gate
    ///
    /// A product with on-hand stock is never removed. One with movement
    /// history is soft-deleted so the ledger stays intact; one without is
    /// hard-deleted.
    pub async fn retire(&self, product_id: Uuid) -> AppResult<RetireOutcome> {
        let mut tx = self.db.begin().await?;

        let current_stock = sqlx::query_scalar::<_, i32>(
            "SELECT current_stock FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let movement_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movements WHERE product_id = $1")
                .bind(product_id)
                .fetch_one(&mut *tx)
                .await?;

        let outcome =
            retire_outcome(current_stock, movement_count).map_err(|message| AppError::Conflict {
                resource: "product".to_string(),
                message: message.to_string(),
            })?;

        match outcome {
            RetireOutcome::SoftDeleted => {
                sqlx::query(
                    "UPDATE products SET active = false, updated_at = now() WHERE id = $1",
                )
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
            }
            RetireOutcome::HardDeleted => {
                sqlx::query("DELETE FROM products WHERE id = $1")
                    .bind(product_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        Ok(outcome)
    }
}
