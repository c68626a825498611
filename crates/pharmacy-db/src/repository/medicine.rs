//! # Medicine Repository
//!
//! Catalog operations: CRUD, filtered listing and stock decrements.
//!
//! ## Stock Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                                │
//! │                                                                         │
//! │  ❌ Check-then-act (two checkouts both see stock = 3)                  │
//! │     SELECT stock_quantity ...; UPDATE ... SET stock_quantity = 0       │
//! │                                                                         │
//! │  ✅ Conditional delta, one statement                                   │
//! │     UPDATE medicines                                                   │
//! │        SET stock_quantity = stock_quantity - ?                         │
//! │      WHERE id = ? AND stock_quantity >= ?                              │
//! │                                                                         │
//! │  rows_affected = 1  → decremented                                      │
//! │  rows_affected = 0  → missing medicine or not enough stock             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Duration, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use pharmacy_core::{Medicine, MedicineFilter, MedicineUpdate, NewMedicine, DEFAULT_MIN_STOCK_LEVEL};

pub(crate) const MEDICINE_COLUMNS: &str = "id, name, category, batch_number, expiry_date, \
     purchase_price_paise, selling_price_paise, gst_percentage, \
     stock_quantity, min_stock_level, supplier_id, created_at, updated_at";

/// Repository for medicine database operations.
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: SqlitePool,
}

impl MedicineRepository {
    /// Creates a new MedicineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MedicineRepository { pool }
    }

    /// Gets a medicine by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Medicine))` - Medicine found
    /// * `Ok(None)` - Medicine not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Medicine>> {
        let medicine = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(medicine)
    }

    /// Lists medicines matching every condition of `filter`, ordered by name.
    ///
    /// ## Filters
    /// - `search`: case-insensitive substring of the name
    /// - `low_stock`: `stock_quantity <= min_stock_level`
    /// - `expiring_within_days`: `expiry_date <= today + N` (UTC)
    pub async fn list(&self, filter: &MedicineFilter) -> DbResult<Vec<Medicine>> {
        debug!(?filter, "Listing medicines");

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {MEDICINE_COLUMNS} FROM medicines WHERE 1 = 1"));

        if let Some(search) = filter.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                query.push(" AND name LIKE '%' || ");
                query.push_bind(search.to_string());
                query.push(" || '%'");
            }
        }

        if filter.low_stock {
            query.push(" AND stock_quantity <= min_stock_level");
        }

        if let Some(days) = filter.expiring_within_days {
            let horizon = Utc::now().date_naive() + Duration::days(days);
            query.push(" AND expiry_date <= ");
            query.push_bind(horizon);
        }

        query.push(" ORDER BY name, id");

        let medicines = query
            .build_query_as::<Medicine>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = medicines.len(), "Medicine list returned");
        Ok(medicines)
    }

    /// Inserts a new medicine.
    ///
    /// ## Returns
    /// The stored row, with generated id and timestamps.
    pub async fn create(&self, medicine: &NewMedicine) -> DbResult<Medicine> {
        debug!(name = %medicine.name, batch = %medicine.batch_number, "Inserting medicine");

        let now = Utc::now();

        let created = sqlx::query_as::<_, Medicine>(&format!(
            r#"
            INSERT INTO medicines (
                name, category, batch_number, expiry_date,
                purchase_price_paise, selling_price_paise, gst_percentage,
                stock_quantity, min_stock_level, supplier_id,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7,
                ?8, ?9, ?10,
                ?11, ?11
            )
            RETURNING {MEDICINE_COLUMNS}
            "#
        ))
        .bind(medicine.name.trim())
        .bind(medicine.category)
        .bind(medicine.batch_number.trim())
        .bind(medicine.expiry_date)
        .bind(medicine.purchase_price_paise)
        .bind(medicine.selling_price_paise)
        .bind(medicine.gst_percentage)
        .bind(medicine.stock_quantity)
        .bind(medicine.min_stock_level.unwrap_or(DEFAULT_MIN_STOCK_LEVEL))
        .bind(medicine.supplier_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Applies a partial update. Absent fields keep their stored value.
    ///
    /// Concurrent edits are last-writer-wins per field.
    ///
    /// ## Returns
    /// * `Ok(Medicine)` - The updated row
    /// * `Err(DbError::NotFound)` - Medicine doesn't exist
    pub async fn update(&self, id: i64, update: &MedicineUpdate) -> DbResult<Medicine> {
        debug!(id, "Updating medicine");

        let now = Utc::now();

        let updated = sqlx::query_as::<_, Medicine>(&format!(
            r#"
            UPDATE medicines SET
                name = COALESCE(?2, name),
                category = COALESCE(?3, category),
                batch_number = COALESCE(?4, batch_number),
                expiry_date = COALESCE(?5, expiry_date),
                purchase_price_paise = COALESCE(?6, purchase_price_paise),
                selling_price_paise = COALESCE(?7, selling_price_paise),
                gst_percentage = COALESCE(?8, gst_percentage),
                stock_quantity = COALESCE(?9, stock_quantity),
                min_stock_level = COALESCE(?10, min_stock_level),
                supplier_id = COALESCE(?11, supplier_id),
                updated_at = ?12
            WHERE id = ?1
            RETURNING {MEDICINE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.name.as_deref().map(str::trim))
        .bind(update.category)
        .bind(update.batch_number.as_deref().map(str::trim))
        .bind(update.expiry_date)
        .bind(update.purchase_price_paise)
        .bind(update.selling_price_paise)
        .bind(update.gst_percentage)
        .bind(update.stock_quantity)
        .bind(update.min_stock_level)
        .bind(update.supplier_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| DbError::not_found("Medicine", id))
    }

    /// Deletes a medicine.
    ///
    /// Invoice items that sold it keep their snapshot columns.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting medicine");

        let result = sqlx::query("DELETE FROM medicines WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Medicine", id));
        }

        Ok(())
    }

    /// Atomically removes `quantity` units if at least that many are on hand.
    ///
    /// ## Returns
    /// * `Ok(true)` - Stock decremented
    /// * `Ok(false)` - Medicine missing or stock too low; nothing changed
    pub async fn decrement_stock(&self, id: i64, quantity: i64) -> DbResult<bool> {
        let mut conn = self.pool.acquire().await?;
        decrement_stock_on(&mut conn, id, quantity).await
    }

    /// Counts medicines in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Conditional decrement on an existing connection or transaction.
pub(crate) async fn decrement_stock_on(
    conn: &mut SqliteConnection,
    id: i64,
    quantity: i64,
) -> DbResult<bool> {
    debug!(id, quantity, "Decrementing stock");

    let result = sqlx::query(
        r#"
        UPDATE medicines
        SET
            stock_quantity = stock_quantity - ?2,
            updated_at = ?3
        WHERE id = ?1 AND stock_quantity >= ?2
        "#,
    )
    .bind(id)
    .bind(quantity)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

// =============================================================================
// Unit Tests
// =============================================================================
