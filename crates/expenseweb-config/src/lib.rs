//! Configuration management for expenseweb
//!
//! This module handles loading, validation, and management of
//! expenseweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Upstream expense backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the expense REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Table rows per page
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
        }
    }
}

fn default_items_per_page() -> u64 {
    6
}

/// Chart and aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Lookback window applied when the request does not name one
    #[serde(default)]
    pub default_range: RangeWindow,
    /// Maximum number of transactions fetched per aggregation cycle
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u64,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            default_range: RangeWindow::default(),
            fetch_limit: default_fetch_limit(),
        }
    }
}

fn default_fetch_limit() -> u64 {
    1000
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// ==================== Lookback Windows ====================

/// Supported chart lookback windows
///
/// Filter state arriving from the URL must name one of these; anything
/// else falls back to the configured default window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeWindow {
    /// Last 7 days
    #[serde(rename = "7d")]
    Week,
    /// Last 30 days
    #[serde(rename = "30d")]
    Month,
    /// Last 90 days
    #[serde(rename = "90d")]
    Quarter,
    /// Last 180 days
    #[serde(rename = "180d")]
    HalfYear,
    /// Last 365 days
    #[serde(rename = "365d")]
    Year,
}

impl RangeWindow {
    /// Number of calendar days in this window
    pub fn days(&self) -> i64 {
        match self {
            RangeWindow::Week => 7,
            RangeWindow::Month => 30,
            RangeWindow::Quarter => 90,
            RangeWindow::HalfYear => 180,
            RangeWindow::Year => 365,
        }
    }
}

impl Default for RangeWindow {
    fn default() -> Self {
        RangeWindow::Month
    }
}

impl std::str::FromStr for RangeWindow {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(RangeWindow::Week),
            "30d" => Ok(RangeWindow::Month),
            "90d" => Ok(RangeWindow::Quarter),
            "180d" => Ok(RangeWindow::HalfYear),
            "365d" => Ok(RangeWindow::Year),
            _ => Err(format!("Unsupported range window: {}", s)),
        }
    }
}

impl std::fmt::Display for RangeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeWindow::Week => write!(f, "7d"),
            RangeWindow::Month => write!(f, "30d"),
            RangeWindow::Quarter => write!(f, "90d"),
            RangeWindow::HalfYear => write!(f, "180d"),
            RangeWindow::Year => write!(f, "365d"),
        }
    }
}

// ==================== Main Configuration ====================

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream backend settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Chart settings
    #[serde(default)]
    pub charts: ChartsConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|_| ConfigError::IoError {
            path: path.to_string_lossy().to_string(),
        })?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::InvalidYaml {
                message: e.to_string(),
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".to_string(),
                reason: "Base URL must use the http or https scheme".to_string(),
            });
        }

        if self.pagination.items_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.items_per_page".to_string(),
                reason: "Items per page must be greater than 0".to_string(),
            });
        }

        if self.charts.fetch_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "charts.fetch_limit".to_string(),
                reason: "Fetch limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}
