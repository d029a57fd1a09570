use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Customer, NewCustomer};
use crate::validation::normalize;

/// Prepared customer data for database insertion
#[derive(Debug, Clone)]
pub struct PreparedCustomerData {
    pub id: String,
    pub customer: NewCustomer,
    pub timestamp: DateTime<Utc>,
}

/// Database-specific adapter for customer INSERT operations
#[async_trait]
pub trait CustomerInserter: Send + Sync {
    /// Execute customer insert and return the created record
    async fn execute_customer_insert(&self, data: PreparedCustomerData) -> AppResult<Customer>;
}

/// Shared business logic for customer INSERT operations
pub struct CustomerInsertProcessor;

impl CustomerInsertProcessor {
    /// Prepare customer data for database insertion
    ///
    /// - ID generation (always server-generated)
    /// - Identifier normalization, so the unique column only ever holds digits
    /// - Creation timestamp
    pub fn prepare_customer_for_insert(customer: &NewCustomer) -> PreparedCustomerData {
        let mut customer = customer.clone();
        customer.identifier = normalize(&customer.identifier);

        PreparedCustomerData {
            id: Uuid::new_v4().to_string(),
            customer,
            timestamp: Utc::now(),
        }
    }

    /// Build the stored record from the prepared data
    pub fn finalize_customer_response(data: PreparedCustomerData) -> Customer {
        let PreparedCustomerData {
            id,
            customer,
            timestamp,
        } = data;

        Customer {
            id,
            name: customer.name,
            contact: customer.contact,
            representative: customer.representative,
            email: customer.email,
            identifier: customer.identifier,
            person_type: customer.person_type,
            created_at: timestamp,
        }
    }
}

/// Unified customer INSERT operations using the adapter pattern
pub struct UnifiedCustomerInsertOps<T: CustomerInserter> {
    inserter: T,
}

impl<T: CustomerInserter> UnifiedCustomerInsertOps<T> {
    pub fn new(inserter: T) -> Self {
        Self { inserter }
    }

    /// Create a new customer using shared logic and database-specific execution
    pub async fn create_customer(&self, customer: &NewCustomer) -> AppResult<Customer> {
        let prepared_data = CustomerInsertProcessor::prepare_customer_for_insert(customer);
        self.inserter.execute_customer_insert(prepared_data).await
    }
}

/// Map an INSERT failure to AppError
///
/// Uniqueness violations are recognised from the driver's error kind, never
/// from the message text. SQLite does not report constraint names, so the
/// identifier column is assumed; it is the only unique data column.
pub fn map_database_error(error: sqlx::Error, resource_type: &str) -> AppError {
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation() {
            let constraint = db_error
                .constraint()
                .unwrap_or("customers.identifier")
                .to_string();
            return AppError::UniqueViolation(constraint);
        }
    }
    AppError::Database(format!("Failed to create {}: {}", resource_type, error))
}
