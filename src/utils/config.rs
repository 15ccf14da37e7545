use dotenv::dotenv;
use std::env;
use std::sync::OnceLock;

use crate::utils::errors::AppError;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

const DEFAULT_DATABASE_NAME: &str = "pawfect_care";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub secret_key: String,
    pub token_ttl_minutes: i64,
    pub log_level: String,
}

impl AppConfig {

    /// Reads the configuration from the process environment, loading `.env` first.
    pub fn from_env() -> Result<AppConfig, AppError> {
        dotenv().ok();

        let token_ttl_minutes = match env::var("TOKEN_TTL_MINUTES") {
            Ok(raw) => raw.trim().parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or_else(|| AppError::Config(format!("TOKEN_TTL_MINUTES must be a positive integer, got '{}'", raw)))?,
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };

        Ok(AppConfig {
            database_url: required("DATABASE_URL")?,
            database_name: optional("DATABASE_NAME", DEFAULT_DATABASE_NAME),
            secret_key: required("SECRET_KEY")?,
            token_ttl_minutes,
            log_level: optional("LOG_LEVEL", DEFAULT_LOG_LEVEL),
        })
    }

    /// Process-wide configuration for the binary shell.
    pub fn global() -> Result<&'static AppConfig, AppError> {
        if let Some(config) = CONFIG.get() {
            return Ok(config);
        }
        let config = Self::from_env()?;
        Ok(CONFIG.get_or_init(|| config))
    }
}

fn required(key: &str) -> Result<String, AppError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Config(format!("{} environment variable must be set", key))),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
