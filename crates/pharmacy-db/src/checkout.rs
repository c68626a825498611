//! # Checkout
//!
//! The invoice assembler: validates a cart, prices it, resolves the customer
//! and commits everything in one transaction.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CreateInvoiceRequest                                                   │
//! │       │                                                                 │
//! │       ▼  0. CheckoutInput::from_request          → Validation           │
//! │       ▼  1. find_customer_by_mobile              → Existing | New       │
//! │       ▼  2. per line: find_medicine, price_line  → MedicineNotFound     │
//! │       │                                            InsufficientStock    │
//! │       ▼  3. InvoiceTotals::from_lines            → Validation (discount)│
//! │       ▼  4. InvoiceNumberGenerator::next_number                         │
//! │       ▼  5. commit_invoice (one transaction)     → InsufficientStock    │
//! │       │                                            Commit               │
//! │  Invoice                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 0-4 only read. Nothing is written unless step 5 commits.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
pub use crate::repository::invoice::CommitError;
use pharmacy_core::{
    price_line, CheckoutInput, CoreError, CreateInvoiceRequest, Customer, CustomerResolution,
    Invoice, InvoiceDraft, InvoiceNumberGenerator, InvoiceTotals, Medicine, UuidInvoiceNumbers,
    ValidationError,
};

// =============================================================================
// Errors
// =============================================================================

/// Why an invoice was not created.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Malformed request. Nothing was read or written.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A cart line references an unknown medicine.
    #[error("Medicine not found: {0}")]
    MedicineNotFound(i64),

    /// A cart line asks for more than is on the shelf.
    #[error("Insufficient stock for {medicine}: available {available}, requested {requested}")]
    InsufficientStock {
        medicine: String,
        available: i64,
        requested: i64,
    },

    /// The store failed; the transaction was rolled back.
    #[error("Failed to save invoice: {0}")]
    Commit(#[source] DbError),
}

impl From<CoreError> for CheckoutError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MedicineNotFound(id) => CheckoutError::MedicineNotFound(id),
            CoreError::InsufficientStock {
                medicine,
                available,
                requested,
            } => CheckoutError::InsufficientStock {
                medicine,
                available,
                requested,
            },
            CoreError::Validation(e) => CheckoutError::Validation(e),
            CoreError::InvoiceNotFound(id) => {
                CheckoutError::Commit(DbError::not_found("Invoice", id))
            }
        }
    }
}

impl From<CommitError> for CheckoutError {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::StockConflict {
                medicine,
                available,
                requested,
                ..
            } => CheckoutError::InsufficientStock {
                medicine,
                available,
                requested,
            },
            CommitError::MedicineMissing(id) => CheckoutError::MedicineNotFound(id),
            CommitError::Db(e) => CheckoutError::Commit(e),
        }
    }
}

// =============================================================================
// Store Seam
// =============================================================================

/// What the assembler needs from storage.
///
/// Implemented by [`Database`]; tests can supply an in-memory double.
#[async_trait]
pub trait CheckoutStore: Send + Sync {
    /// Looks a customer up by mobile number.
    async fn find_customer_by_mobile(&self, mobile: &str) -> DbResult<Option<Customer>>;

    /// Reads a medicine's current row.
    async fn find_medicine(&self, id: i64) -> DbResult<Option<Medicine>>;

    /// Atomically writes the draft: customer (if new), invoice, items and
    /// conditional stock decrements. All or nothing.
    async fn commit_invoice(&self, draft: &InvoiceDraft) -> Result<Invoice, CommitError>;
}

#[async_trait]
impl CheckoutStore for Database {
    async fn find_customer_by_mobile(&self, mobile: &str) -> DbResult<Option<Customer>> {
        self.customers().get_by_mobile(mobile).await
    }

    async fn find_medicine(&self, id: i64) -> DbResult<Option<Medicine>> {
        self.medicines().get_by_id(id).await
    }

    async fn commit_invoice(&self, draft: &InvoiceDraft) -> Result<Invoice, CommitError> {
        self.invoices().commit(draft).await
    }
}

// =============================================================================
// Assembler
// =============================================================================

/// Builds and commits invoices against a [`CheckoutStore`].
///
/// ## Usage
/// ```rust,ignore
/// let assembler = InvoiceAssembler::new(db.clone());
/// let invoice = assembler.create_invoice(&request).await?;
/// ```
#[derive(Clone)]
pub struct InvoiceAssembler<S> {
    store: S,
    numbers: Arc<dyn InvoiceNumberGenerator>,
}

impl<S: CheckoutStore> InvoiceAssembler<S> {
    /// Creates an assembler with UUID-based invoice numbers.
    pub fn new(store: S) -> Self {
        Self::with_numbers(store, Arc::new(UuidInvoiceNumbers::default()))
    }

    /// Creates an assembler with a specific invoice number generator.
    pub fn with_numbers(store: S, numbers: Arc<dyn InvoiceNumberGenerator>) -> Self {
        InvoiceAssembler { store, numbers }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates, prices and commits an invoice.
    pub async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<Invoice, CheckoutError> {
        let result = self.try_create_invoice(request).await;

        match &result {
            Ok(invoice) => info!(
                invoice_number = %invoice.invoice_number,
                customer_id = ?invoice.customer_id,
                grand_total = %invoice.grand_total(),
                payment_mode = %invoice.payment_mode,
                "Invoice created"
            ),
            Err(CheckoutError::Commit(e)) => warn!(error = %e, "Invoice commit failed"),
            Err(e) => warn!(
                mobile = %request.customer_mobile,
                reason = %e,
                "Invoice rejected"
            ),
        }

        result
    }

    async fn try_create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<Invoice, CheckoutError> {
        let draft = self.prepare(request).await?;
        let invoice = self.store.commit_invoice(&draft).await?;
        Ok(invoice)
    }

    /// Runs every step short of the commit and returns the draft.
    ///
    /// Reads from the store but never writes.
    pub async fn prepare(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<InvoiceDraft, CheckoutError> {
        let input = CheckoutInput::from_request(request)?;

        let customer = match self
            .store
            .find_customer_by_mobile(&input.customer.mobile_number)
            .await
            .map_err(CheckoutError::Commit)?
        {
            Some(existing) => CustomerResolution::Existing(existing),
            None => CustomerResolution::New(input.customer.clone()),
        };

        // Units already taken by earlier lines of this cart, per medicine.
        let mut allocated: HashMap<i64, i64> = HashMap::new();
        let mut lines = Vec::with_capacity(input.lines.len());

        for cart_line in &input.lines {
            let mut medicine = self
                .store
                .find_medicine(cart_line.medicine_id)
                .await
                .map_err(CheckoutError::Commit)?
                .ok_or(CheckoutError::MedicineNotFound(cart_line.medicine_id))?;

            let taken = allocated.entry(medicine.id).or_insert(0);
            medicine.stock_quantity -= *taken;

            let priced = price_line(&medicine, cart_line.quantity)?;
            *taken += cart_line.quantity;
            lines.push(priced);
        }

        let totals = InvoiceTotals::from_lines(&lines, input.discount)?;

        let date = Utc::now();
        let invoice_number = self.numbers.next_number(date);

        Ok(InvoiceDraft {
            invoice_number,
            date,
            customer,
            lines,
            totals,
            payment_mode: input.payment_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_conflict_maps_to_insufficient_stock() {
        let err: CheckoutError = CommitError::StockConflict {
            medicine_id: 2,
            medicine: "Cough Syrup 100ml".to_string(),
            available: 1,
            requested: 3,
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Insufficient stock for Cough Syrup 100ml: available 1, requested 3"
        );
    }

    #[test]
    fn test_missing_medicine_at_commit_maps_to_not_found() {
        let err: CheckoutError = CommitError::MedicineMissing(9).into();
        assert!(matches!(err, CheckoutError::MedicineNotFound(9)));
    }

    #[test]
    fn test_db_failure_maps_to_commit() {
        let err: CheckoutError = CommitError::Db(DbError::PoolExhausted).into();
        assert!(matches!(err, CheckoutError::Commit(DbError::PoolExhausted)));
    }
}
