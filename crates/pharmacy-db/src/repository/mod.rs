//! # Repository Module
//!
//! Database repository implementations for the pharmacy.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler / InvoiceAssembler                                       │
//! │       │                                                                 │
//! │       │  db.medicines().list(&filter)                                  │
//! │       ▼                                                                 │
//! │  MedicineRepository                                                    │
//! │  ├── get_by_id / list                                                  │
//! │  ├── create / update / delete                                          │
//! │  └── decrement_stock (conditional)                                     │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`MedicineRepository`](medicine::MedicineRepository) - Catalog CRUD, filters, stock
//! - [`SupplierRepository`](supplier::SupplierRepository) - Supplier create/list
//! - [`CustomerRepository`](customer::CustomerRepository) - Find-or-create by mobile
//! - [`InvoiceRepository`](invoice::InvoiceRepository) - Atomic commit and reads
//! - [`StatsRepository`](stats::StatsRepository) - Dashboard counters

pub mod customer;
pub mod invoice;
pub mod medicine;
pub mod stats;
pub mod supplier;
