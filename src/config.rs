//! Configuration management for the Biblioteca client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Root URL of the Biblioteca Digital REST API
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoanConfig {
    /// Loan duration used when a form does not carry one
    pub default_days: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of loans shown in the recent activity panel
    pub recent_activity: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub loans: LoanConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // BIBLIOTECA_API__BASE_URL, BIBLIOTECA_LOGGING__LEVEL, ...
            .add_source(
                Environment::with_prefix("BIBLIOTECA")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", env::var("BIBLIOTECA_API_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            user_agent: concat!("biblioteca-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self { default_days: 7 }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { recent_activity: 5 }
    }
}
