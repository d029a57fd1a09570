use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tracing::info;

use crate::backend::{BackendFactory, CustomerBackend};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::logging::logging_middleware;
use crate::resource::{self, customer};

/// Connect the configured store and make sure its schema exists
pub async fn setup_backend(config: &AppConfig) -> AppResult<Arc<dyn CustomerBackend>> {
    let backend_config = config
        .database
        .to_backend_config()
        .map_err(AppError::Configuration)?;

    info!(
        database = %config.database.db_type,
        max_connections = backend_config.max_connections,
        "connecting customer store"
    );

    let backend = BackendFactory::create(&backend_config).await?;
    backend.init_schema().await?;

    Ok(backend)
}

/// Build the HTTP router around a ready backend
pub fn build_router(backend: Arc<dyn CustomerBackend>, config: &AppConfig) -> Router {
    let app = Router::new()
        .route("/health", get(resource::health))
        .route(
            "/customers",
            get(customer::list_customers).post(customer::register_customer),
        )
        .route("/customers/search", get(customer::search_customers))
        .route("/customers/{identifier}", get(customer::get_customer))
        .with_state(backend);

    if config.logging.access_log {
        app.layer(middleware::from_fn(logging_middleware))
    } else {
        app
    }
}
