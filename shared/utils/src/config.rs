use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate]
    pub server: ServerConfig,
    #[validate]
    pub analysis: AnalysisConfig,
    #[validate]
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    pub port: u16,
    #[validate(range(min = 1024))]
    pub max_request_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Products per page in product listings.
    #[validate(range(min = 1, max = 500))]
    pub page_size: usize,
    #[validate(length(min = 1))]
    pub allowed_extensions: Vec<String>,
    #[validate(range(min = 1))]
    pub max_upload_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ExportConfig {
    #[validate(length(min = 1, max = 100))]
    pub filename_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("SHELFWATCH").separator("__"));

        config.build()?.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_request_size: 32 * 1024 * 1024, // 32MB
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            allowed_extensions: vec!["csv".to_string(), "xlsx".to_string(), "xls".to_string()],
            max_upload_bytes: 25 * 1024 * 1024, // 25MB
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_prefix: "expiry_report".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file_path: None,
        }
    }
}
