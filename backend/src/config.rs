//! Process configuration, read once at start-up from environment variables.
//!
//! | variable                      | default           |
//! |-------------------------------|-------------------|
//! | `TEMPLATE_BUILDER_HOST`       | `127.0.0.1`       |
//! | `TEMPLATE_BUILDER_PORT`       | `8080`            |
//! | `TEMPLATE_BUILDER_STORE`      | `sqlite`          |
//! | `TEMPLATE_BUILDER_DB`         | `templify.sqlite` |
//! | `TEMPLATE_BUILDER_JSON_LIMIT` | `10485760` (10 MB) |
//! | `TEMPLATE_BUILDER_SESSION_TTL_SECS` | `3600` |
//!
//! `TEMPLATE_BUILDER_STORE` selects the template store strategy: `sqlite`
//! persists to the database file, `memory` keeps templates in process memory.
//! Editing sessions idle for longer than `TEMPLATE_BUILDER_SESSION_TTL_SECS`
//! are dropped.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "templify.sqlite";
const DEFAULT_JSON_LIMIT: usize = 10 * 1024 * 1024;
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which [`TemplateStore`](crate::storage::TemplateStore) backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
    pub db_path: PathBuf,
    pub json_limit: usize,
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store: StoreKind::Sqlite,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            json_limit: DEFAULT_JSON_LIMIT,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset keys keep their default;
    /// set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("TEMPLATE_BUILDER_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("TEMPLATE_BUILDER_PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "TEMPLATE_BUILDER_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(store) = lookup("TEMPLATE_BUILDER_STORE") {
            config.store = match store.trim().to_ascii_lowercase().as_str() {
                "sqlite" => StoreKind::Sqlite,
                "memory" => StoreKind::Memory,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "TEMPLATE_BUILDER_STORE",
                        value: store,
                    })
                }
            };
        }
        if let Some(path) = lookup("TEMPLATE_BUILDER_DB") {
            config.db_path = PathBuf::from(path);
        }
        if let Some(limit) = lookup("TEMPLATE_BUILDER_JSON_LIMIT") {
            config.json_limit = limit.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "TEMPLATE_BUILDER_JSON_LIMIT",
                value: limit.clone(),
            })?;
        }

        if let Some(ttl) = lookup("TEMPLATE_BUILDER_SESSION_TTL_SECS") {
            let secs = ttl
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "TEMPLATE_BUILDER_SESSION_TTL_SECS",
                    value: ttl.clone(),
                })?;
            config.session_ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// How often idle sessions are looked for: the TTL, capped to a minute.
    pub fn session_sweep_period(&self) -> Duration {
        self.session_ttl.min(Duration::from_secs(60))
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
