// Purpose: Centralized runtime configuration for the logging pipeline.
// Layered: serialized defaults, then structlog.toml, then STRUCTLOG_* env.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::errors::{LogError, Result};
use crate::level::LogLevel;

/// Default rotation threshold, 10 MiB
const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_level")]
    pub level: LogLevel,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_backup_count")]
    pub backup_count: usize,
    #[serde(default = "default_true")]
    pub terminal_output: bool,
    #[serde(default = "default_true")]
    pub json_output: bool,
}

fn default_app_name() -> String {
    "structlog".to_string()
}

fn default_level() -> LogLevel {
    LogLevel::Info
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_BYTES
}

fn default_backup_count() -> usize {
    5
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            level: default_level(),
            log_dir: default_log_dir(),
            max_bytes: default_max_bytes(),
            backup_count: default_backup_count(),
            terminal_output: true,
            json_output: true,
        }
    }
}

impl LogConfig {
    /// Load configuration from defaults, `structlog.toml`, and `STRUCTLOG_*`
    /// environment variables, later layers winning.
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(LogConfig::default()))
            .merge(Toml::file("structlog.toml"))
            .merge(Env::prefixed("STRUCTLOG_"));
        Self::load_from(figment)
    }

    /// Extract and validate a configuration from an assembled figment
    pub fn load_from(figment: Figment) -> Result<Self> {
        let config: LogConfig = figment
            .extract()
            .map_err(|e| LogError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Canonical validator shared by every construction path
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(LogError::config("app_name cannot be empty"));
        }
        if self.json_output && self.log_dir.trim().is_empty() {
            return Err(LogError::config("log_dir cannot be empty"));
        }
        Ok(())
    }
}
