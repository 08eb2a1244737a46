//! Client configuration
//!
//! Values come from `INVOICE_*` environment variables, after a `.env` file
//! (if any) has been loaded into the environment.
//!
//! | Variable                        | Default                      |
//! |---------------------------------|------------------------------|
//! | `INVOICE_API_BASE_URL`          | `http://localhost:8080/api`  |
//! | `INVOICE_REQUEST_TIMEOUT_SECS`  | `30`                         |
//! | `INVOICE_LOG_LEVEL`             | `info`                       |
//! | `INVOICE_LOG_JSON`              | `false`                      |

use serde::Deserialize;
use std::time::Duration;

use infra_http::HttpClientConfig;

const ENV_PREFIX: &str = "INVOICE";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Base URL of the invoicing API
    pub api_base_url: String,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    /// Emit JSON log lines instead of plain text
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_secs: 30,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if present) and then the environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load(source: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .add_source(source.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// HTTP client settings derived from this configuration
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::new(self.api_base_url.clone()).timeout(self.request_timeout())
    }
}
