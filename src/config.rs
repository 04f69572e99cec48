//! Configuration management for Libris server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Relational store holding the book catalog (SQLite, file-based by default)
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Document store holding accounts and reservations (MongoDB)
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AccountsConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret used to sign the session cookie. The default is insecure and
    /// meant to be overridden through `SECRET_KEY`.
    pub secret_key: String,
    pub admin_username: String,
    pub admin_password: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub accounts: AccountsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix LIBRIS_)
            .add_source(
                Environment::with_prefix("LIBRIS")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override catalog URL from DATABASE_URL env var if present
            .set_override_option("catalog.url", env::var("DATABASE_URL").ok())?
            // Override document store URI from MONGO_URI env var if present
            .set_override_option("accounts.uri", env::var("MONGO_URI").ok())?
            // Override cookie-signing secret from SECRET_KEY env var if present
            .set_override_option("auth.secret_key", env::var("SECRET_KEY").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 1000,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:books.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "library".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: "your_default_secret_key".to_string(),
            admin_username: "my".to_string(),
            admin_password: "5".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
