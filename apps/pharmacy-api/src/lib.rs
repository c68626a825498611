//! # Pharmacy API
//!
//! HTTP surface of the pharmacy POS: catalog, suppliers, customers,
//! billing and the dashboard.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Pharmacy API                                   │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  medicines     │  │  invoices      │  │  stats                     ││
//! │  │                │  │                │  │                            ││
//! │  │ • list/filter  │  │ • create       │  │ • dashboard                ││
//! │  │ • get          │  │ • list         │  │                            ││
//! │  │ • create/update│  │ • details      │  └────────────────────────────┘│
//! │  │ • delete       │  └───────┬────────┘                                │
//! │  └───────┬────────┘          │                                         │
//! │          │                   ▼                                         │
//! │          │          ┌────────────────┐   ┌────────────────┐            │
//! │          │          │InvoiceAssembler│   │ suppliers      │            │
//! │          │          └───────┬────────┘   │ customers      │            │
//! │          ▼                  ▼            └───────┬────────┘            │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   Database (SQLite, pharmacy-db)                 │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PHARMACY_HOST` - Bind address (default: 127.0.0.1)
//! - `PHARMACY_PORT` - HTTP port (default: 3000)
//! - `PHARMACY_DB_PATH` - SQLite file (default: platform data dir)
//! - `PHARMACY_DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `PHARMACY_SEED_DEMO` - Seed demo data into an empty catalog (default: false)
//! - `PHARMACY_INVOICE_PREFIX` - Invoice number prefix (default: INV)
//! - `RUST_LOG` - Log filter

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,pharmacy=debug,sqlx=warn";

/// Builds the full router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Installs the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
