//! # Customer Repository
//!
//! Customers are keyed by mobile number. The checkout flow looks them up
//! before pricing and inserts unknown ones inside the commit transaction.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use pharmacy_core::{Customer, NewCustomer};

const CUSTOMER_COLUMNS: &str = "id, name, mobile_number, address, created_at";

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by mobile number.
    pub async fn get_by_mobile(&self, mobile: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE mobile_number = ?1"
        ))
        .bind(mobile.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a customer.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Mobile number already registered
    pub async fn create(&self, customer: &NewCustomer) -> DbResult<Customer> {
        debug!(mobile = %customer.mobile_number, "Inserting customer");

        let created = sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (name, mobile_number, address, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(customer.name.trim())
        .bind(customer.mobile_number.trim())
        .bind(customer.address.as_deref())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => {
                DbError::duplicate(field, customer.mobile_number.trim())
            }
            other => other,
        })?;

        Ok(created)
    }

    /// Lists customers newest first, optionally matching name or mobile.
    pub async fn list(&self, search: Option<&str>) -> DbResult<Vec<Customer>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        debug!(search = ?search, "Listing customers");

        let customers = match search {
            Some(term) => {
                sqlx::query_as::<_, Customer>(&format!(
                    r#"
                    SELECT {CUSTOMER_COLUMNS} FROM customers
                    WHERE name LIKE '%' || ?1 || '%' OR mobile_number LIKE '%' || ?1 || '%'
                    ORDER BY created_at DESC, id DESC
                    "#
                ))
                .bind(term)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Customer>(&format!(
                    "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at DESC, id DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(customers)
    }

    /// Counts registered customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Returns the customer with `customer.mobile_number`, inserting it first if absent.
///
/// An existing row is returned unchanged (first write wins).
pub(crate) async fn insert_or_get_on(
    conn: &mut SqliteConnection,
    customer: &NewCustomer,
) -> DbResult<Customer> {
    let mobile = customer.mobile_number.trim();

    sqlx::query(
        r#"
        INSERT INTO customers (name, mobile_number, address, created_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(mobile_number) DO NOTHING
        "#,
    )
    .bind(customer.name.trim())
    .bind(mobile)
    .bind(customer.address.as_deref())
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    let stored = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE mobile_number = ?1"
    ))
    .bind(mobile)
    .fetch_one(&mut *conn)
    .await?;

    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn asha() -> NewCustomer {
        NewCustomer {
            name: "Asha".to_string(),
            mobile_number: "9876543210".to_string(),
            address: Some("Andheri".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let created = repo.create(&asha()).await.unwrap();
        let by_mobile = repo.get_by_mobile("9876543210").await.unwrap().unwrap();
        assert_eq!(by_mobile.id, created.id);
        assert_eq!(by_mobile.address.as_deref(), Some("Andheri"));

        assert!(repo.get_by_mobile("0000000000").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_mobile_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        repo.create(&asha()).await.unwrap();
        let err = repo.create(&asha()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_insert_or_get_keeps_first_write() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        let first = insert_or_get_on(&mut conn, &asha()).await.unwrap();
        let renamed = NewCustomer {
            name: "Asha K".to_string(),
            ..asha()
        };
        let second = insert_or_get_on(&mut conn, &renamed).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Asha");
    }

    #[tokio::test]
    async fn test_search_name_or_mobile() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        repo.create(&asha()).await.unwrap();
        repo.create(&NewCustomer {
            name: "Ravi".to_string(),
            mobile_number: "9123456780".to_string(),
            address: None,
        })
        .await
        .unwrap();

        assert_eq!(repo.list(None).await.unwrap().len(), 2);
        assert_eq!(repo.list(Some("  ")).await.unwrap().len(), 2);

        let by_name = repo.list(Some("rav")).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Ravi");

        let by_mobile = repo.list(Some("98765")).await.unwrap();
        assert_eq!(by_mobile.len(), 1);
        assert_eq!(by_mobile[0].name, "Asha");
    }
}
