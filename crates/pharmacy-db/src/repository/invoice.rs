//! # Invoice Repository
//!
//! Atomic invoice commit and invoice reads.
//!
//! ## Commit Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │   ├── INSERT customer ON CONFLICT(mobile_number) DO NOTHING  (if new)  │
//! │   ├── INSERT invoice                                                   │
//! │   ├── for each line, in request order:                                 │
//! │   │     ├── UPDATE medicines SET stock = stock - q                     │
//! │   │     │     WHERE id = ? AND stock >= q                              │
//! │   │     │     └── 0 rows → abort (StockConflict / MedicineMissing)     │
//! │   │     └── INSERT invoice_item (snapshot: rate, batch, expiry)        │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any early return drops the transaction → ROLLBACK                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::customer::{insert_or_get_on, CustomerRepository};
use crate::repository::medicine::decrement_stock_on;
use pharmacy_core::{
    CustomerResolution, Invoice, InvoiceDetails, InvoiceDraft, InvoiceItem, InvoiceLine,
    PricedLine,
};

const INVOICE_COLUMNS: &str = "id, invoice_number, customer_id, date, subtotal_paise, \
     discount_paise, gst_total_paise, grand_total_paise, payment_mode, created_at";

const ITEM_COLUMNS: &str = "id, invoice_id, medicine_id, quantity, rate_paise, \
     gst_amount_paise, total_amount_paise, batch_number, expiry_date";

// =============================================================================
// Commit Error
// =============================================================================

/// Why an invoice commit was rolled back.
#[derive(Debug, Error)]
pub enum CommitError {
    /// Stock fell below a line's quantity between pricing and commit.
    #[error("Insufficient stock for {medicine}: available {available}, requested {requested}")]
    StockConflict {
        medicine_id: i64,
        medicine: String,
        available: i64,
        requested: i64,
    },

    /// The medicine was deleted between pricing and commit.
    #[error("Medicine not found: {0}")]
    MedicineMissing(i64),

    /// Any other database failure.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for CommitError {
    fn from(err: sqlx::Error) -> Self {
        CommitError::Db(err.into())
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Writes the invoice, its items, the stock decrements and (if new) the
    /// customer in one transaction.
    ///
    /// On any error nothing is written.
    pub async fn commit(&self, draft: &InvoiceDraft) -> Result<Invoice, CommitError> {
        debug!(
            invoice_number = %draft.invoice_number,
            lines = draft.lines.len(),
            "Committing invoice"
        );

        let mut tx = self.pool.begin().await?;

        let customer_id = match &draft.customer {
            CustomerResolution::Existing(customer) => customer.id,
            CustomerResolution::New(customer) => insert_or_get_on(&mut *tx, customer).await?.id,
        };

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            INSERT INTO invoices (
                invoice_number, customer_id, date,
                subtotal_paise, discount_paise, gst_total_paise, grand_total_paise,
                payment_mode, created_at
            ) VALUES (
                ?1, ?2, ?3,
                ?4, ?5, ?6, ?7,
                ?8, ?3
            )
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(&draft.invoice_number)
        .bind(customer_id)
        .bind(draft.date)
        .bind(draft.totals.subtotal.paise())
        .bind(draft.totals.discount.paise())
        .bind(draft.totals.gst_total.paise())
        .bind(draft.totals.grand_total.paise())
        .bind(draft.payment_mode)
        .fetch_one(&mut *tx)
        .await?;

        for line in &draft.lines {
            if !decrement_stock_on(&mut *tx, line.medicine_id, line.quantity).await? {
                return Err(stock_failure(&mut *tx, line).await?);
            }
            insert_item_on(&mut *tx, invoice.id, line).await?;
        }

        tx.commit().await?;

        debug!(id = invoice.id, "Invoice committed");
        Ok(invoice)
    }

    /// Gets an invoice by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Gets an invoice by its number.
    pub async fn get_by_number(&self, invoice_number: &str) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE invoice_number = ?1"
        ))
        .bind(invoice_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Lists invoices, newest first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY date DESC, id DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    /// Gets the items of an invoice in the order they were billed.
    pub async fn items(&self, invoice_id: i64) -> DbResult<Vec<InvoiceItem>> {
        let items = sqlx::query_as::<_, InvoiceItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM invoice_items WHERE invoice_id = ?1 ORDER BY id"
        ))
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Invoice with its customer and items joined to the current medicine
    /// name and category.
    ///
    /// Items of deleted medicines are kept, with no name or category.
    pub async fn details(&self, id: i64) -> DbResult<Option<InvoiceDetails>> {
        let Some(invoice) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let customer = match invoice.customer_id {
            Some(customer_id) => {
                CustomerRepository::new(self.pool.clone())
                    .get_by_id(customer_id)
                    .await?
            }
            None => None,
        };

        let items = sqlx::query_as::<_, InvoiceLine>(
            r#"
            SELECT
                ii.id,
                ii.invoice_id,
                ii.medicine_id,
                ii.quantity,
                ii.rate_paise,
                ii.gst_amount_paise,
                ii.total_amount_paise,
                ii.batch_number,
                ii.expiry_date,
                m.name AS medicine_name,
                m.category AS medicine_category
            FROM invoice_items ii
            LEFT JOIN medicines m ON m.id = ii.medicine_id
            WHERE ii.invoice_id = ?1
            ORDER BY ii.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(InvoiceDetails {
            invoice,
            customer,
            items,
        }))
    }

    /// Counts invoices.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn insert_item_on(
    conn: &mut SqliteConnection,
    invoice_id: i64,
    line: &PricedLine,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO invoice_items (
            invoice_id, medicine_id, quantity,
            rate_paise, gst_amount_paise, total_amount_paise,
            batch_number, expiry_date
        ) VALUES (
            ?1, ?2, ?3,
            ?4, ?5, ?6,
            ?7, ?8
        )
        "#,
    )
    .bind(invoice_id)
    .bind(line.medicine_id)
    .bind(line.quantity)
    .bind(line.rate.paise())
    .bind(line.gst.paise())
    .bind(line.total.paise())
    .bind(&line.batch_number)
    .bind(line.expiry_date)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Explains a decrement that touched no rows.
async fn stock_failure(conn: &mut SqliteConnection, line: &PricedLine) -> DbResult<CommitError> {
    let current: Option<(String, i64)> =
        sqlx::query_as("SELECT name, stock_quantity FROM medicines WHERE id = ?1")
            .bind(line.medicine_id)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(match current {
        Some((medicine, available)) => CommitError::StockConflict {
            medicine_id: line.medicine_id,
            medicine,
            available,
            requested: line.quantity,
        },
        None => CommitError::MedicineMissing(line.medicine_id),
    })
}
