use crate::core::timezone::platform_offset;
use crate::core::{AppError, Result};
use chrono::FixedOffset;
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub revenue: RevenueConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// Reporting settings shared by the revenue, dashboard and transaction services
#[derive(Debug, Clone, Deserialize)]
pub struct RevenueConfig {
    /// Whole-hour UTC offset of the platform's local calendar (Manila = 8)
    pub utc_offset_hours: i32,
    pub query_timeout_secs: u64,
}

impl RevenueConfig {
    pub fn offset(&self) -> Result<FixedOffset> {
        platform_offset(self.utc_offset_hours)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Argon2 PHC string of the admin API key
    pub admin_api_key_hash: String,
}

fn parse_var<T: std::str::FromStr>(name: &str, default: &str) -> Result<T> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid {}", name)))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            revenue: RevenueConfig {
                utc_offset_hours: parse_var("PLATFORM_UTC_OFFSET_HOURS", "8")?,
                query_timeout_secs: parse_var("QUERY_TIMEOUT_SECS", "10")?,
            },
            security: SecurityConfig {
                admin_api_key_hash: env::var("ADMIN_API_KEY_HASH").map_err(|_| {
                    AppError::Configuration("ADMIN_API_KEY_HASH not set".to_string())
                })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.revenue.offset()?;

        if self.revenue.query_timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Query timeout must be greater than 0".to_string(),
            ));
        }

        if self.database.max_connections < self.database.pool_size {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must not be below DATABASE_POOL_SIZE".to_string(),
            ));
        }

        if !self.security.admin_api_key_hash.starts_with("$argon2") {
            return Err(AppError::Configuration(
                "ADMIN_API_KEY_HASH must be an argon2 PHC string".to_string(),
            ));
        }

        Ok(())
    }
}
