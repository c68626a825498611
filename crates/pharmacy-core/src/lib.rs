//! # pharmacy-core: Pure Business Logic for the Pharmacy POS
//!
//! This crate contains the billing rules of the pharmacy as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pharmacy POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pharmacy-api (axum)                          │   │
//! │  │    /api/medicines, /api/invoices, /api/stats, ...               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ pharmacy-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  billing  │  │ validation│  │   │
//! │  │   │ Medicine  │  │   Money   │  │ PricedLine│  │   rules   │  │   │
//! │  │   │  Invoice  │  │  GstRate  │  │  Totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                pharmacy-db (Database Layer)                     │   │
//! │  │      SQLite queries, migrations, repositories, checkout         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Medicine, Invoice, Customer, etc.)
//! - [`money`] - Money type with integer paise arithmetic
//! - [`billing`] - Line pricing, GST and invoice totals
//! - [`invoice_number`] - Invoice number generators
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use pharmacy_core::money::Money;
//! use pharmacy_core::types::GstRate;
//!
//! // 2 strips at ₹20.00
//! let line_total = Money::from_paise(2000).multiply_quantity(2);
//!
//! // 12% GST on ₹40.00 = ₹4.80
//! let gst = line_total.calculate_gst(GstRate::from_percent(12));
//! assert_eq!(gst.paise(), 480);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod invoice_number;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use billing::{
    price_line, CheckoutInput, CustomerResolution, InvoiceDraft, InvoiceTotals, PricedLine,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice_number::{InvoiceNumberGenerator, SequentialInvoiceNumbers, UuidInvoiceNumbers};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of lines allowed on a single invoice.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Guards against keying errors at the counter (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 9_999;

/// Highest purchase or selling price of one unit, ₹10,00,000.
///
/// Keeps `price × MAX_ITEM_QUANTITY × MAX_CART_ITEMS` plus GST inside `i64`.
pub const MAX_PRICE_PAISE: i64 = 100_000_000;

/// Minimum stock level applied when a medicine is created without one.
pub const DEFAULT_MIN_STOCK_LEVEL: i64 = 10;

/// Horizon used for the "expiring soon" flag on the dashboard.
pub const EXPIRING_SOON_DAYS: i64 = 30;
