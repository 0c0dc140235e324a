use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use tracing::info;

/// Default values for configuration
const DEFAULT_ENV: &str = "development";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORAGE_BACKEND: &str = "rest";
const CONFIG_DIR: &str = "config";

/// Application configuration structure
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Application environment
    pub environment: String,

    /// Logging level
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Storage backend selection ("rest" or "memory")
    pub storage_backend: String,

    /// Endpoint URL of the managed database (REST backend)
    #[serde(default)]
    pub storage_url: Option<String>,

    /// Service credential for the managed database (REST backend)
    #[serde(default)]
    pub storage_service_key: Option<String>,
}

impl AppConfig {
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Both REST credentials, when present and non-empty. `None` is not a
    /// startup failure; the caller warns and serves anyway.
    pub fn rest_credentials(&self) -> Option<(&str, &str)> {
        match (
            self.storage_url.as_deref(),
            self.storage_service_key.as_deref(),
        ) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Some((url, key)),
            _ => None,
        }
    }
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::fmt;

    let default_directive = format!("sepatu_wash_api={level},tower_http=debug");
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt().with_env_filter(filter_directive).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter_directive).try_init();
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Default config (config/default.toml)
/// 2. Environment-specific config (config/{env}.toml)
/// 3. Environment variables (APP__*)
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .set_default("host", "0.0.0.0")?
        .set_default("port", DEFAULT_PORT as i64)?
        .set_default("environment", DEFAULT_ENV)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .set_default("storage_backend", DEFAULT_STORAGE_BACKEND)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    info!("Configuration loaded successfully");
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            environment: "test".to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
            storage_backend: DEFAULT_STORAGE_BACKEND.to_string(),
            storage_url: None,
            storage_service_key: None,
        }
    }

    #[test]
    fn rest_credentials_require_both_values() {
        let mut cfg = base_config();
        assert_eq!(cfg.rest_credentials(), None);

        cfg.storage_url = Some("https://db.example.com".to_string());
        assert_eq!(cfg.rest_credentials(), None);

        cfg.storage_service_key = Some("service-key".to_string());
        assert_eq!(
            cfg.rest_credentials(),
            Some(("https://db.example.com", "service-key"))
        );
    }

    #[test]
    fn rest_credentials_treat_empty_strings_as_absent() {
        let mut cfg = base_config();
        cfg.storage_url = Some(String::new());
        cfg.storage_service_key = Some("service-key".to_string());
        assert_eq!(cfg.rest_credentials(), None);
    }
}
