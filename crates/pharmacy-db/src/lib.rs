//! # pharmacy-db: Database Layer for the Pharmacy POS
//!
//! This crate provides database access for the pharmacy.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pharmacy POS Data Flow                           │
//! │                                                                         │
//! │  HTTP handler (POST /api/invoices)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  pharmacy-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   checkout    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │               │    │               │    │  (embedded)  │  │   │
//! │  │   │ Invoice       │───►│ MedicineRepo  │    │              │  │   │
//! │  │   │ Assembler     │    │ CustomerRepo  │    │ 001_init.sql │  │   │
//! │  │   │ CheckoutStore │    │ InvoiceRepo   │    │              │  │   │
//! │  │   └───────────────┘    │ SupplierRepo  │    └──────────────┘  │   │
//! │  │                        │ StatsRepo     │                       │   │
//! │  │   ┌───────────────┐    └───────┬───────┘                       │   │
//! │  │   │   Database    │◄───────────┘                               │   │
//! │  │   │   (pool.rs)   │                                            │   │
//! │  │   └───────────────┘                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use pharmacy_db::{Database, DbConfig, InvoiceAssembler};
//!
//! let db = Database::new(DbConfig::new("./pharmacy.db")).await?;
//! let assembler = InvoiceAssembler::new(db.clone());
//! let invoice = assembler.create_invoice(&request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutError, CheckoutStore, CommitError, InvoiceAssembler};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::medicine::MedicineRepository;
pub use repository::stats::StatsRepository;
pub use repository::supplier::SupplierRepository;
