use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use super::super::config::DatabaseBackendConfig;
use super::{PostgresCustomerInserter, PostgresCustomerReader};
use crate::backend::database::{UnifiedCustomerInsertOps, UnifiedCustomerReadOps};
use crate::backend::{Backend, CustomerBackend};
use crate::error::{AppError, AppResult};
use crate::models::{Customer, NewCustomer};

/// PostgreSQL database backend implementation
pub struct PostgresBackend {
    pool: PgPool,
    customer_insert_ops: UnifiedCustomerInsertOps<PostgresCustomerInserter>,
    customer_read_ops: UnifiedCustomerReadOps<PostgresCustomerReader>,
}

impl PostgresBackend {
    /// Create a new PostgreSQL backend instance
    pub fn new(pool: PgPool) -> Self {
        let customer_inserter = PostgresCustomerInserter::new(pool.clone());
        let customer_reader = PostgresCustomerReader::new(pool.clone());

        Self {
            pool,
            customer_insert_ops: UnifiedCustomerInsertOps::new(customer_inserter),
            customer_read_ops: UnifiedCustomerReadOps::new(customer_reader),
        }
    }

    /// Get the connection pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Backend for PostgresBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.connection_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Health check failed: {}", e)))?;

        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        super::schema::init_schema(&self.pool).await
    }

    async fn cleanup(&self) -> AppResult<()> {
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl CustomerBackend for PostgresBackend {
    async fn find_customer_by_identifier(&self, identifier: &str) -> AppResult<Option<Customer>> {
        self.customer_read_ops
            .find_customer_by_identifier(identifier)
            .await
    }

    async fn create_customer(&self, customer: &NewCustomer) -> AppResult<Customer> {
        self.customer_insert_ops.create_customer(customer).await
    }

    async fn find_all_customers(&self) -> AppResult<Vec<Customer>> {
        self.customer_read_ops.find_all_customers().await
    }
}
