use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use customer_registry::config::AppConfig;
use customer_registry::logging::init_tracing;
use customer_registry::startup::{build_router, setup_backend};

#[derive(Parser, Debug)]
#[command(name = "customer-registry")]
#[command(about = "Customer registration service with tax identifier validation")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long)]
    host: Option<String>,

    /// Database URL (overrides config file; the database type follows the URL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let using_defaults =
        args.config == "config.yaml" && !std::path::Path::new("config.yaml").exists();
    let mut app_config = if using_defaults {
        AppConfig::default_config()
    } else {
        AppConfig::load_from_file(&args.config)
            .map_err(|e| format!("Failed to load configuration: {}", e))?
    };

    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = args.host {
        app_config.server.host = host;
    }
    if let Some(url) = args.database_url {
        app_config.database.override_url(url);
    }

    init_tracing(&app_config.logging);

    if using_defaults {
        warn!("no config.yaml found, using in-memory SQLite defaults");
    } else {
        info!(path = %args.config, "configuration loaded");
    }

    let backend = setup_backend(&app_config).await?;
    let app = build_router(backend, &app_config);

    let host: std::net::IpAddr = app_config.server.host.parse().unwrap_or_else(|_| {
        warn!(host = %app_config.server.host, "invalid host address, using 127.0.0.1");
        [127, 0, 0, 1].into()
    });
    let addr = SocketAddr::from((host, app_config.server.port));

    info!(%addr, database = %app_config.database.db_type, "customer registry listening");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
