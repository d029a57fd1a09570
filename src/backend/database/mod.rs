//! Database abstraction layer for the customer registry
//!
//! Shared insert/read logic lives in `customer_insert` and `customer_read`;
//! each database supplies thin adapters for its SQL dialect.
//!
//! # Architecture
//!
//! ```text
//! Common Logic (customer_insert.rs, customer_read.rs)
//!     ↓
//! Database-specific implementations
//!     ├── postgres/ (PostgreSQL-specific code)
//!     └── sqlite/   (SQLite-specific code)
//! ```

pub mod config;
pub mod customer_insert;
pub mod customer_read;
pub mod postgres;
pub mod sqlite;

/// Table holding customer records
pub const CUSTOMERS_TABLE: &str = "customers";

pub use config::DatabaseBackendConfig;

pub use customer_insert::UnifiedCustomerInsertOps;

pub use customer_read::UnifiedCustomerReadOps;
