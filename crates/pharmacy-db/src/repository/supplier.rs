//! # Supplier Repository
//!
//! Suppliers are created and listed; medicines point at them loosely.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use pharmacy_core::{NewSupplier, Supplier};

const SUPPLIER_COLUMNS: &str = "id, name, contact_number, address, gst_number, created_at";

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Inserts a supplier and returns the stored row.
    pub async fn create(&self, supplier: &NewSupplier) -> DbResult<Supplier> {
        debug!(name = %supplier.name, "Inserting supplier");

        let created = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            INSERT INTO suppliers (name, contact_number, address, gst_number, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {SUPPLIER_COLUMNS}
            "#
        ))
        .bind(supplier.name.trim())
        .bind(supplier.contact_number.trim())
        .bind(supplier.address.trim())
        .bind(supplier.gst_number.trim())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Gets a supplier by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Lists all suppliers ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers ORDER BY name, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }
}
