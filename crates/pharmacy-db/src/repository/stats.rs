//! # Stats Repository
//!
//! Dashboard counters, computed on demand from the live tables.

use chrono::{Duration, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use pharmacy_core::{DashboardStats, EXPIRING_SOON_DAYS};

/// Repository for dashboard statistics.
#[derive(Debug, Clone)]
pub struct StatsRepository {
    pool: SqlitePool,
}

impl StatsRepository {
    /// Creates a new StatsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StatsRepository { pool }
    }

    /// Dashboard counters as of today (UTC).
    pub async fn dashboard(&self) -> DbResult<DashboardStats> {
        self.dashboard_on(Utc::now().date_naive()).await
    }

    /// Dashboard counters as of `today`.
    ///
    /// - low stock: `stock_quantity <= min_stock_level`
    /// - expiring soon: `expiry_date <= today + 30 days`
    /// - today's sales: Σ grand total of invoices dated `today`
    pub async fn dashboard_on(&self, today: NaiveDate) -> DbResult<DashboardStats> {
        let horizon = today + Duration::days(EXPIRING_SOON_DAYS);

        let total_medicines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
            .fetch_one(&self.pool)
            .await?;

        let low_stock_items: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM medicines WHERE stock_quantity <= min_stock_level",
        )
        .fetch_one(&self.pool)
        .await?;

        let expiring_soon_items: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM medicines WHERE expiry_date <= ?1")
                .bind(horizon)
                .fetch_one(&self.pool)
                .await?;

        // Invoice dates are RFC 3339 text; the first ten characters are the UTC day.
        let todays_sales_paise: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(grand_total_paise), 0) FROM invoices WHERE substr(date, 1, 10) = ?1",
        )
        .bind(today.format("%Y-%m-%d").to_string())
        .fetch_one(&self.pool)
        .await?;

        let total_customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        let stats = DashboardStats {
            total_medicines,
            low_stock_items,
            expiring_soon_items,
            todays_sales_paise,
            total_customers,
        };

        debug!(?stats, "Dashboard stats computed");
        Ok(stats)
    }
}
