use crate::backend::database::CUSTOMERS_TABLE;
use crate::error::{AppError, AppResult};
use sqlx::PgPool;

/// Initialize the customer schema for PostgreSQL
///
/// The identifier constraint is named explicitly so that violations report
/// `customers_identifier_key`.
pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    let customers_sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {0} (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            contact TEXT NOT NULL,
            representative TEXT,
            email TEXT NOT NULL,
            identifier TEXT NOT NULL,
            person_type TEXT NOT NULL CHECK (person_type IN ('individual', 'organization')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT {0}_identifier_key UNIQUE (identifier)
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
