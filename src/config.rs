use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::backend::database::config::{DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_POOL_SIZE};
use crate::backend::database::DatabaseBackendConfig;
use crate::backend::DatabaseType;

lazy_static! {
    /// `${VAR}` or `${VAR:-default}`
    static ref ENV_VAR_PATTERN: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var pattern must compile");
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub db_type: String,
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

fn default_max_connections() -> u32 {
    DEFAULT_POOL_SIZE
}

fn default_connection_timeout() -> u64 {
    DEFAULT_ACQUIRE_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit one `access_log` line per HTTP request
    #[serde(default = "default_access_log")]
    pub access_log: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_access_log() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            access_log: default_access_log(),
        }
    }
}

impl DatabaseConfig {
    /// Point the store at `url`, switching `type` to the database the URL
    /// names
    ///
    /// A URL without a recognisable scheme keeps the configured type and is
    /// rejected later by [`DatabaseConfig::to_backend_config`].
    pub fn override_url(&mut self, url: String) {
        if let Some(database_type) = DatabaseType::from_url(&url) {
            self.db_type = database_type.as_str().to_string();
        }
        self.url = url;
    }

    /// Convert to the backend configuration, checking the database type
    pub fn to_backend_config(&self) -> Result<DatabaseBackendConfig, String> {
        let database_type: DatabaseType = self.db_type.parse()?;
        let config = DatabaseBackendConfig::new(database_type, self.url.clone())
            .with_max_connections(self.max_connections)
            .with_connection_timeout(self.connection_timeout);
        config.validate()?;
        Ok(config)
    }
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, String> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(format!("Configuration file not found: {}", path.display()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        Self::from_yaml(&content)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))
    }

    /// Parse configuration from YAML text after environment expansion
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let expanded_content = Self::expand_env_vars(content)?;
        let app_config: AppConfig =
            serde_yaml::from_str(&expanded_content).map_err(|e| e.to_string())?;

        app_config.database.to_backend_config()?;

        Ok(app_config)
    }

    /// Create default configuration for in-memory SQLite
    pub fn default_config() -> Self {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                db_type: "sqlite".to_string(),
                url: ":memory:".to_string(),
                max_connections: 1,
                connection_timeout: default_connection_timeout(),
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Expand environment variables in format ${VAR_NAME} or ${VAR_NAME:-default}
    fn expand_env_vars(content: &str) -> Result<String, String> {
        let mut missing = Vec::new();

        let expanded = ENV_VAR_PATTERN.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            match (std::env::var(var_name), caps.get(2)) {
                (Ok(value), _) => value,
                (Err(_), Some(default)) => default.as_str().to_string(),
                (Err(_), None) => {
                    missing.push(var_name.to_string());
                    String::new()
                }
            }
        });

        if let Some(var_name) = missing.first() {
            return Err(format!(
                "Environment variable {} not found and no default provided",
                var_name
            ));
        }

        Ok(expanded.into_owned())
    }
}
