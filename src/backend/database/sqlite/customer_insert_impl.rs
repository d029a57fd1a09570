use async_trait::async_trait;
use sqlx::SqlitePool;

use super::super::customer_insert::{
    map_database_error, CustomerInsertProcessor, CustomerInserter, PreparedCustomerData,
};
use crate::backend::database::CUSTOMERS_TABLE;
use crate::error::AppResult;
use crate::models::Customer;

/// SQLite-specific implementation of CustomerInserter
pub struct SqliteCustomerInserter {
    pool: SqlitePool,
}

impl SqliteCustomerInserter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerInserter for SqliteCustomerInserter {
    async fn execute_customer_insert(&self, data: PreparedCustomerData) -> AppResult<Customer> {
        let sql = format!(
            "INSERT INTO {} (id, name, contact, representative, email, identifier, person_type, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            CUSTOMERS_TABLE
        );

        sqlx::query(&sql)
            .bind(&data.id)
            .bind(&data.customer.name)
            .bind(&data.customer.contact)
            .bind(&data.customer.representative)
            .bind(&data.customer.email)
            .bind(&data.customer.identifier)
            .bind(data.customer.person_type.as_str())
            .bind(data.timestamp)
            .execute(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "customer"))?;

        Ok(CustomerInsertProcessor::finalize_customer_response(data))
    }
}
