//! Category and supplier lookups
//!
//! Both entities are seeded at first initialization; the ledger only reads
//! them to resolve references and never deletes either.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use shared::models::{Category, Supplier};

/// Catalog service for category and supplier queries
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    tax_id: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all categories ordered by name
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: row.id,
                name: row.name,
                description: row.description,
                created_at: row.created_at,
            })
            .collect())
    }

    /// List all suppliers ordered by name
    pub async fn list_suppliers(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, tax_id, phone, email, address, created_at FROM suppliers ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Supplier {
                id: row.id,
                name: row.name,
                tax_id: row.tax_id,
                phone: row.phone,
                email: row.email,
                address: row.address,
                created_at: row.created_at,
            })
            .collect())
    }
}
