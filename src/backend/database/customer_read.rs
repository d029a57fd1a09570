//! Customer read operations
//!
//! Common interfaces for customer lookups shared by the database backends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::models::Customer;

/// Column list selected by every customer query
pub const CUSTOMER_COLUMNS: &str =
    "name, contact, representative, email, identifier, person_type, created_at";

/// Raw customer row as stored in either database
#[derive(Debug, sqlx::FromRow)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub representative: Option<String>,
    pub email: String,
    pub identifier: String,
    pub person_type: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = AppError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let person_type = row.person_type.parse().map_err(|e| {
            AppError::Database(format!("Corrupt customer row {}: {}", row.id, e))
        })?;

        Ok(Customer {
            id: row.id,
            name: row.name,
            contact: row.contact,
            representative: row.representative,
            email: row.email,
            identifier: row.identifier,
            person_type,
            created_at: row.created_at,
        })
    }
}

/// Trait for customer read operations
#[async_trait]
pub trait CustomerReader: Send + Sync {
    /// Find a customer by normalized identifier
    async fn find_customer_by_identifier(&self, identifier: &str) -> AppResult<Option<Customer>>;

    /// Find all customers in insertion order
    async fn find_all_customers(&self) -> AppResult<Vec<Customer>>;
}

/// Unified customer read operations
pub struct UnifiedCustomerReadOps<T: CustomerReader> {
    reader: T,
}

impl<T: CustomerReader> UnifiedCustomerReadOps<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }

    pub async fn find_customer_by_identifier(
        &self,
        identifier: &str,
    ) -> AppResult<Option<Customer>> {
        self.reader.find_customer_by_identifier(identifier).await
    }

    pub async fn find_all_customers(&self) -> AppResult<Vec<Customer>> {
        self.reader.find_all_customers().await
    }
}

/// Convert fetched rows, failing on the first corrupt one
pub fn rows_to_customers(rows: Vec<CustomerRow>) -> AppResult<Vec<Customer>> {
    rows.into_iter().map(Customer::try_from).collect()
}
