use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use super::super::config::DatabaseBackendConfig;
use super::{SqliteCustomerInserter, SqliteCustomerReader};
use crate::backend::database::{UnifiedCustomerInsertOps, UnifiedCustomerReadOps};
use crate::backend::{Backend, CustomerBackend};
use crate::error::{AppError, AppResult};
use crate::models::{Customer, NewCustomer};

/// SQLite database backend implementation
pub struct SqliteBackend {
    pool: SqlitePool,
    customer_insert_ops: UnifiedCustomerInsertOps<SqliteCustomerInserter>,
    customer_read_ops: UnifiedCustomerReadOps<SqliteCustomerReader>,
}

impl SqliteBackend {
    /// Create a new SQLite backend instance
    pub fn new(pool: SqlitePool) -> Self {
        let customer_inserter = SqliteCustomerInserter::new(pool.clone());
        let customer_reader = SqliteCustomerReader::new(pool.clone());

        Self {
            pool,
            customer_insert_ops: UnifiedCustomerInsertOps::new(customer_inserter),
            customer_read_ops: UnifiedCustomerReadOps::new(customer_reader),
        }
    }

    /// Get the connection pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let options = SqliteConnectOptions::from_str(&config.connection_url)
            .map_err(|e| AppError::Configuration(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout));

        // An in-memory database lives only as long as its connection
        if config.is_memory_database() {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to SQLite: {}", e)))?;

        tracing::debug!(url = %config.connection_url, "connected to SQLite");

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
impl CustomerBackend for SqliteBackend {
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
