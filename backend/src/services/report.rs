//! Reporting service: read-only projections over products and movements
//!
//! Nothing here mutates state or caches results; every call reads the
//! persisted tables fresh, so repeated calls agree with each other and with
//! the listings as long as the underlying data is unchanged.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{CategoryBreakdownEntry, DashboardSummary, LowStockEntry, MovementTotals};
use shared::validation::validate_listing_limit;

/// Name of the synthetic bucket for products without a category
const UNCATEGORIZED: &str = "Uncategorized";

/// Reporting service
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

impl ReportService {
    /// Create a new ReportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Headline metrics over active products
    pub async fn dashboard(&self) -> AppResult<DashboardSummary> {
        let (total_products, low_stock_products, inventory_value) =
            sqlx::query_as::<_, (i64, i64, Decimal)>(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE current_stock <= min_stock),
                       COALESCE(SUM(current_stock * sale_price), 0)
                FROM products
                WHERE active
                "#,
            )
            .fetch_one(&self.db)
            .await?;

        Ok(DashboardSummary {
            total_products,
            low_stock_products,
            inventory_value,
        })
    }

    /// Active products at or below their minimum, ordered by name
    pub async fn low_stock(&self, limit: i64) -> AppResult<Vec<LowStockEntry>> {
        validate_listing_limit(limit).map_err(|message| AppError::Validation {
            field: "limit".to_string(),
            message: message.to_string(),
        })?;

        let rows = sqlx::query_as::<_, (Uuid, String, i32, i32, String)>(
            r#"
            SELECT id, name, current_stock, min_stock, unit
            FROM products
            WHERE active AND current_stock <= min_stock
            ORDER BY name
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(product_id, name, current_stock, min_stock, unit)| LowStockEntry {
                    product_id,
                    name,
                    current_stock,
                    min_stock,
                    unit,
                },
            )
            .collect())
    }

    /// Product count and inventory value per category
    ///
    /// Every category appears, zero counts included. An "Uncategorized"
    /// bucket is appended when at least one active product has no category.
    pub async fn category_breakdown(&self) -> AppResult<Vec<CategoryBreakdownEntry>> {
        let rows = sqlx::query_as::<_, (String, i64, Decimal)>(
            r#"
            SELECT c.name,
                   COUNT(p.id),
                   COALESCE(SUM(p.current_stock * p.sale_price), 0)
            FROM categories c
            LEFT JOIN products p ON p.category_id = c.id AND p.active
            GROUP BY c.id, c.name
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut entries: Vec<CategoryBreakdownEntry> = rows
            .into_iter()
            .map(
                |(category_name, product_count, inventory_value)| CategoryBreakdownEntry {
                    category_name,
                    product_count,
                    inventory_value,
                },
            )
            .collect();

        let (uncategorized_count, uncategorized_value) = sqlx::query_as::<_, (i64, Decimal)>(
            r#"
            SELECT COUNT(*), COALESCE(SUM(current_stock * sale_price), 0)
            FROM products
            WHERE active AND category_id IS NULL
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        if uncategorized_count > 0 {
            entries.push(CategoryBreakdownEntry {
                category_name: UNCATEGORIZED.to_string(),
                product_count: uncategorized_count,
                inventory_value: uncategorized_value,
            });
        }

        Ok(entries)
    }

    /// Inbound vs outbound counts over the most recent 100 movements
    ///
    /// Shares the bounded window of the unfiltered movement listing, so the
    /// totals always describe the history the user sees.
    pub async fn movement_totals(&self) -> AppResult<MovementTotals> {
        let (inbound, outbound) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*) FILTER (WHERE kind = 'inbound'),
                   COUNT(*) FILTER (WHERE kind = 'outbound')
            FROM (SELECT kind FROM movements ORDER BY occurred_at DESC LIMIT 100) recent
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(MovementTotals { inbound, outbound })
    }
}
