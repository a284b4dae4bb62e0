use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoutConfig {
    pub agent: AgentApiConfig,
    pub prices: PricesConfig,
    pub logging: LoggingConfig,
    pub display: DisplayConfig,
}

/// Where the remote assistant lives and how long we wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentApiConfig {
    #[serde(default = "default_agent_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricesConfig {
    #[serde(default = "default_prices_base_url")]
    pub base_url: String,

    #[serde(default = "default_chain_id")]
    pub chain_id: u32,

    /// Freshness window for the quote cache. Quotes older than this trigger
    /// a refetch on the next read.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// How often the background ticker re-reads the cache.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Quote token for chart requests (wrapped native by default).
    #[serde(default = "default_quote_token")]
    pub quote_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json_format: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,

    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
}

impl ScoutConfig {
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_from_paths(get_config_paths())
    }

    pub fn load_from_paths(paths: Vec<PathBuf>) -> Result<Self, ConfigLoadError> {
        load_dotenv_files();

        let mut builder = ConfigBuilder::builder();

        for path in paths {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("SCOUT")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;

        let mut scout_config: ScoutConfig = config.try_deserialize().unwrap_or_default();

        if let Ok(url) = std::env::var("SCOUT_AGENT_BASE_URL") {
            scout_config.agent.base_url = url;
        }

        if let Ok(url) = std::env::var("SCOUT_PRICES_BASE_URL") {
            scout_config.prices.base_url = url;
        }

        if let Ok(level) = std::env::var("SCOUT_LOG_LEVEL") {
            scout_config.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            scout_config.logging.level = level;
        }

        scout_config.validate()?;

        Ok(scout_config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.agent.base_url.is_empty() {
            return Err(ConfigLoadError::MissingRequired(
                "agent.base_url".to_string(),
            ));
        }

        if !self.agent.base_url.starts_with("http://")
            && !self.agent.base_url.starts_with("https://")
        {
            return Err(ConfigLoadError::InvalidValue {
                key: "agent.base_url".to_string(),
                message: "Must be an http:// or https:// URL".to_string(),
            });
        }

        if !self.prices.base_url.starts_with("http://")
            && !self.prices.base_url.starts_with("https://")
        {
            return Err(ConfigLoadError::InvalidValue {
                key: "prices.base_url".to_string(),
                message: "Must be an http:// or https:// URL".to_string(),
            });
        }

        if self.prices.cache_ttl_secs == 0 {
            return Err(ConfigLoadError::InvalidValue {
                key: "prices.cache_ttl_secs".to_string(),
                message: "Must be greater than zero".to_string(),
            });
        }

        if self.prices.refresh_interval_secs == 0 {
            return Err(ConfigLoadError::InvalidValue {
                key: "prices.refresh_interval_secs".to_string(),
                message: "Must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn log_level(&self) -> &str {
        &self.logging.level
    }
}

fn default_agent_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_prices_base_url() -> String {
    "https://api.wagmi.com".to_string()
}

fn default_chain_id() -> u32 {
    146
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_refresh_interval() -> u64 {
    60
}

fn default_quote_token() -> String {
    "0x29219dd400f2Bf60E5a23d13Be72B486D4038894".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_datetime_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for AgentApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_agent_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self {
            base_url: default_prices_base_url(),
            chain_id: default_chain_id(),
            cache_ttl_secs: default_cache_ttl(),
            refresh_interval_secs: default_refresh_interval(),
            quote_token: default_quote_token(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            datetime_format: default_datetime_format(),
        }
    }
}

fn load_dotenv_files() {
    let current_dir = std::env::current_dir().ok();

    let env_paths = [
        current_dir.as_ref().map(|d| d.join(".env")),
        current_dir.as_ref().map(|d| d.join(".env.local")),
        dirs::config_dir().map(|d| d.join("scout").join(".env")),
    ];

    for path in env_paths.iter().flatten() {
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(config_dir) = get_config_dir() {
        paths.push(config_dir.join("scout.toml"));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("scout.toml"));
    }

    paths
}

pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("scout"))
}

pub fn get_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("scout"))
}

pub fn get_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("scout"))
}

pub fn ensure_config_dir() -> Result<PathBuf, std::io::Error> {
    let config_dir = get_config_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine config directory",
        )
    })?;

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn ensure_data_dir() -> Result<PathBuf, std::io::Error> {
    let data_dir = get_data_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine data directory",
        )
    })?;

    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
    }

    Ok(data_dir)
}

pub fn ensure_cache_dir() -> Result<PathBuf, std::io::Error> {
    let cache_dir = get_cache_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine cache directory",
        )
    })?;

    if !cache_dir.exists() {
        std::fs::create_dir_all(&cache_dir)?;
    }

    Ok(cache_dir)
}
