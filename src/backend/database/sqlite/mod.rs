pub mod backend_impl;
pub mod customer_insert_impl;
pub mod customer_read_impl;
pub mod schema;

pub use backend_impl::SqliteBackend;
pub use customer_insert_impl::SqliteCustomerInserter;
pub use customer_read_impl::SqliteCustomerReader;
