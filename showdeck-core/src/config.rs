use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "http://thetvdb.com/api";
pub const DEFAULT_BANNER_BASE: &str = "http://thetvdb.com/banners";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// Connection settings for the external metadata provider. The API key is
/// static configuration, never user input.
#[derive(Debug, Clone)]
pub struct TvdbConfig {
    pub api_key: String,
    pub api_base: String,
    pub banner_base: String,
    /// Upper bound applied to every provider request.
    pub request_timeout: Duration,
}

impl TvdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            banner_base: DEFAULT_BANNER_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Load from the environment (`.env` honored): `TVDB_API_KEY` is
    /// required; `TVDB_API_BASE`, `TVDB_BANNER_BASE` and
    /// `TVDB_REQUEST_TIMEOUT_SECS` override the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("TVDB_API_KEY")
            .map_err(|_| ConfigError::MissingVar("TVDB_API_KEY"))?;

        let mut config = Self::new(api_key);
        if let Ok(base) = std::env::var("TVDB_API_BASE") {
            config.api_base = base;
        }
        if let Ok(base) = std::env::var("TVDB_BANNER_BASE") {
            config.banner_base = base;
        }
        if let Ok(secs) = std::env::var("TVDB_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| ConfigError::InvalidVar("TVDB_REQUEST_TIMEOUT_SECS", secs))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

/// Storage connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        Ok(Self { url })
    }
}
