use crate::backend::database::CUSTOMERS_TABLE;
use crate::error::{AppError, AppResult};
use sqlx::SqlitePool;

/// Initialize the customer schema for SQLite
///
/// `identifier` carries the UNIQUE constraint the registration workflow
/// relies on to settle concurrent registrations.
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    let customers_sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            contact TEXT NOT NULL,
            representative TEXT,
            email TEXT NOT NULL,
            identifier TEXT NOT NULL UNIQUE,
            person_type TEXT NOT NULL CHECK (person_type IN ('individual', 'organization')),
            created_at TEXT NOT NULL
        )
        "#,
        CUSTOMERS_TABLE
    );

    sqlx::query(&customers_sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create customers table: {}", e)))?;

    let index_sql = format!(
        "CREATE INDEX IF NOT EXISTS idx_{0}_created_at ON {0} (created_at)",
        CUSTOMERS_TABLE
    );

    sqlx::query(&index_sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create index: {}", e)))?;

    Ok(())
}

/// Drop the customer schema (for cleanup/testing)
pub async fn drop_schema(pool: &SqlitePool) -> AppResult<()> {
    let sql = format!("DROP TABLE IF EXISTS {}", CUSTOMERS_TABLE);
    sqlx::query(&sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to drop table {}: {}", CUSTOMERS_TABLE, e)))?;

    Ok(())
}
