//! Shared application state.

use std::sync::Arc;

use pharmacy_core::{InvoiceNumberGenerator, SequentialInvoiceNumbers, UuidInvoiceNumbers};
use pharmacy_db::{Database, InvoiceAssembler};

/// Handle passed to every route.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    db: Database,
    assembler: InvoiceAssembler<Database>,
}

impl AppState {
    /// State with UUID-suffixed invoice numbers under `invoice_prefix`.
    pub fn new(db: Database, invoice_prefix: &str) -> Self {
        Self::with_numbers(db, Arc::new(UuidInvoiceNumbers::new(invoice_prefix)))
    }

    /// State with sequential invoice numbers (tests, demos).
    pub fn sequential(db: Database, invoice_prefix: &str) -> Self {
        Self::with_numbers(db, Arc::new(SequentialInvoiceNumbers::new(invoice_prefix)))
    }

    pub fn with_numbers(db: Database, numbers: Arc<dyn InvoiceNumberGenerator>) -> Self {
        let assembler = InvoiceAssembler::with_numbers(db.clone(), numbers);
        AppState {
            inner: Arc::new(Inner { db, assembler }),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn assembler(&self) -> &InvoiceAssembler<Database> {
        &self.inner.assembler
    }
}
