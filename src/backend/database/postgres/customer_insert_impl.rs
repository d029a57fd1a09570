use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::super::customer_insert::{
    map_database_error, CustomerInsertProcessor, CustomerInserter, PreparedCustomerData,
};
use crate::backend::database::CUSTOMERS_TABLE;
use crate::error::{AppError, AppResult};
use crate::models::Customer;

/// PostgreSQL-specific implementation of CustomerInserter
pub struct PostgresCustomerInserter {
    pool: PgPool,
}

impl PostgresCustomerInserter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerInserter for PostgresCustomerInserter {
    async fn execute_customer_insert(&self, data: PreparedCustomerData) -> AppResult<Customer> {
        let id = Uuid::parse_str(&data.id)
            .map_err(|e| AppError::Internal(format!("Invalid customer id {}: {}", data.id, e)))?;

        let sql = format!(
            "INSERT INTO {} (id, name, contact, representative, email, identifier, person_type, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            CUSTOMERS_TABLE
        );

        sqlx::query(&sql)
            .bind(id)
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
