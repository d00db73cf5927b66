use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod remote;
pub mod server;
pub mod storage;

pub use remote::RemoteConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Main application configuration.
///
/// Built once at startup and passed into the pipeline; the city table and
/// remote path templates are configuration, not code.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub remote: RemoteConfig,
    pub storage: StorageConfig,
    pub cities: Vec<CityConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// One feed city: the code used in remote file names and the display name
/// used in report rows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CityConfig {
    pub code: String,
    pub name: String,
}

/// Default city table of the chain; overridable through the CITIES variable.
const DEFAULT_CITIES: &[(&str, &str)] = &[
    ("khar", "Kharkiv"),
    ("kiev", "Kyiv"),
    ("dnepr", "Dnipro"),
    ("bel", "Bila Tserkva"),
];

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            server: ServerConfig::from_env()?,
            remote: RemoteConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            cities: parse_city_table(env::var("CITIES").ok().as_deref())?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.cities.is_empty() {
            return Err(AppError::Configuration(
                "City table must contain at least one city".to_string(),
            ));
        }

        if self.remote.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Remote timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve a requested city selector against the configured table.
    /// An empty selector means every configured city.
    pub fn select_cities(&self, selector: &[String]) -> Vec<CityConfig> {
        if selector.is_empty() {
            return self.cities.clone();
        }
        self.cities
            .iter()
            .filter(|city| {
                selector
                    .iter()
                    .any(|wanted| wanted == &city.code || wanted == &city.name)
            })
            .cloned()
            .collect()
    }
}

/// Parse `CITIES` in `code:Name,code:Name` form; None falls back to the
/// built-in table.
fn parse_city_table(raw: Option<&str>) -> Result<Vec<CityConfig>> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_CITIES
            .iter()
            .map(|(code, name)| CityConfig {
                code: (*code).to_string(),
                name: (*name).to_string(),
            })
            .collect());
    };

    let mut cities = Vec::new();
    for entry in raw.split(',').filter(|e| !e.trim().is_empty()) {
        let (code, name) = entry.split_once(':').ok_or_else(|| {
            AppError::Configuration(format!(
                "Invalid CITIES entry '{}'. Expected code:Name",
                entry
            ))
        })?;
        cities.push(CityConfig {
            code: code.trim().to_string(),
            name: name.trim().to_string(),
        });
    }
    Ok(cities)
}
