use async_trait::async_trait;
use sqlx::PgPool;

use super::super::customer_read::{rows_to_customers, CustomerReader, CustomerRow, CUSTOMER_COLUMNS};
use crate::backend::database::CUSTOMERS_TABLE;
use crate::error::{AppError, AppResult};
use crate::models::Customer;

/// PostgreSQL-specific implementation of CustomerReader
///
/// The UUID primary key is read back as text to share [`CustomerRow`] with
/// SQLite.
pub struct PostgresCustomerReader {
    pool: PgPool,
}

impl PostgresCustomerReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerReader for PostgresCustomerReader {
    async fn find_customer_by_identifier(&self, identifier: &str) -> AppResult<Option<Customer>> {
        let sql = format!(
            "SELECT id::text AS id, {} FROM {} WHERE identifier = $1",
            CUSTOMER_COLUMNS, CUSTOMERS_TABLE
        );

        let row: Option<CustomerRow> = sqlx::query_as(&sql)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to find customer: {}", e)))?;

        row.map(Customer::try_from).transpose()
    }

    async fn find_all_customers(&self) -> AppResult<Vec<Customer>> {
        let sql = format!(
            "SELECT id::text AS id, {} FROM {} ORDER BY created_at, id",
            CUSTOMER_COLUMNS, CUSTOMERS_TABLE
        );

        let rows: Vec<CustomerRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to list customers: {}", e)))?;

        rows_to_customers(rows)
    }
}
