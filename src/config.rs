//! Environment configuration, optionally seeded from a `.env` file.

use crate::error::ConfigError;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_OPERATOR_EMAIL: &str = "admin@local.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `PRIMARY_STORE=offline` starts with the primary store disconnected.
    pub store_online: bool,
    pub fallback_dir: Option<PathBuf>,
    pub serverless: bool,
    pub admin_token: Option<String>,
    pub operator_email: String,
    pub notify_webhook_url: Option<String>,
    pub cors_origin: String,
    pub seed_catalog: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store_online: true,
            fallback_dir: None,
            serverless: false,
            admin_token: None,
            operator_email: DEFAULT_OPERATOR_EMAIL.to_string(),
            notify_webhook_url: None,
            cors_origin: "*".to_string(),
            seed_catalog: true,
            log_format: LogFormat::Compact,
        }
    }
}

impl AppConfig {
    /// Reads the process environment after loading `.env`, if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
            })?,
            None => defaults.port,
        };

        let store_online = match get("PRIMARY_STORE").map(|v| v.to_ascii_lowercase()) {
            None => true,
            Some(v) if v == "online" => true,
            Some(v) if v == "offline" => false,
            Some(value) => {
                return Err(ConfigError::Invalid {
                    key: "PRIMARY_STORE",
                    value,
                })
            }
        };

        let serverless = parse_flag("SERVERLESS", get("SERVERLESS"))?.unwrap_or(false)
            || get("VERCEL").is_some();

        let log_format = match get("LOG_FORMAT").map(|v| v.to_ascii_lowercase()) {
            None => LogFormat::Compact,
            Some(v) if v == "json" => LogFormat::Json,
            Some(v) if v == "compact" => LogFormat::Compact,
            Some(value) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    value,
                })
            }
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            store_online,
            fallback_dir: get("FALLBACK_DIR").map(PathBuf::from),
            serverless,
            admin_token: get("ADMIN_TOKEN"),
            operator_email: get("OPERATOR_EMAIL").unwrap_or(defaults.operator_email),
            notify_webhook_url: get("NOTIFY_WEBHOOK_URL"),
            cors_origin: get("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            seed_catalog: parse_flag("SEED_CATALOG", get("SEED_CATALOG"))?.unwrap_or(true),
            log_format,
        })
    }
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}
