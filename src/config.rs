//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::checkin::{Vocabulary, VocabularyError};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub vocabulary: Vocabulary,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Record store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("moodpulse")
                .join("moodpulse.db")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./moodpulse.db".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Analysis windows and limits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisConfig {
    /// Window for analysis requests without `days`
    #[serde(default = "default_days")]
    pub default_days: u32,

    /// Window for raw entry listings without `days`
    #[serde(default = "default_entries_days")]
    pub entries_default_days: u32,

    /// Largest accepted window; larger requests are clamped
    #[serde(default = "default_max_days")]
    pub max_days: u32,

    /// Fixed window of the support snapshot
    #[serde(default = "default_days")]
    pub snapshot_days: u32,

    /// Newest records echoed in an analysis
    #[serde(default = "default_recent_entries")]
    pub recent_entries: usize,

    /// Context lines in a snapshot
    #[serde(default = "default_snapshot_contexts")]
    pub snapshot_contexts: usize,

    /// Intensity used when a check-in omits it
    #[serde(default = "default_intensity")]
    pub default_intensity: u8,
}

fn default_days() -> u32 {
    7
}

fn default_entries_days() -> u32 {
    30
}

fn default_max_days() -> u32 {
    365
}

fn default_recent_entries() -> usize {
    10
}

fn default_snapshot_contexts() -> usize {
    5
}

fn default_intensity() -> u8 {
    5
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_days: default_days(),
            entries_default_days: default_entries_days(),
            max_days: default_max_days(),
            snapshot_days: default_days(),
            recent_entries: default_recent_entries(),
            snapshot_contexts: default_snapshot_contexts(),
            default_intensity: default_intensity(),
        }
    }
}

impl AnalysisConfig {
    /// Clamp a requested window into `1..=max_days`
    pub fn clamp_days(&self, days: i64) -> u32 {
        days.clamp(1, self.max_days.max(1) as i64) as u32
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;

        config.vocabulary = config.vocabulary.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("moodpulse").join("config.toml")),
            Some(PathBuf::from("/etc/moodpulse/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("MOODPULSE_DATABASE") {
            self.storage.database_path = path;
        }

        if let Ok(host) = std::env::var("MOODPULSE_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("MOODPULSE_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(level) = std::env::var("MOODPULSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MOODPULSE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# MoodPulse Configuration
#
# Environment variables override these settings:
# - MOODPULSE_DATABASE
# - MOODPULSE_HOST
# - MOODPULSE_PORT
# - MOODPULSE_LOG_LEVEL
# - MOODPULSE_LOG_FORMAT

[storage]
# SQLite database file (default: <data dir>/moodpulse/moodpulse.db)
# database_path = "./moodpulse.db"

[api]
# API server host
host = "127.0.0.1"

# API server port
port = 5000

[analysis]
# Window (days) for analysis requests that don't specify one
default_days = 7

# Window (days) for raw entry listings that don't specify one
entries_default_days = 30

# Larger windows are clamped to this
max_days = 365

# Fixed window of the support snapshot
snapshot_days = 7

# Newest check-ins echoed back in an analysis
recent_entries = 10

# Context lines shown in a snapshot
snapshot_contexts = 5

# Intensity used when a check-in omits it (clamped to 1-10)
default_intensity = 5

[vocabulary]
moods = ["happy", "sad", "anxious", "calm", "energetic", "tired", "frustrated", "content"]

context_tags = [
    "alone", "with_friends", "with_family", "at_work", "social_event",
    "one_on_one", "group_setting", "helping_someone", "received_support",
    "conflict", "positive_interaction", "online_interaction",
]

# Context tags that mean "with other people"
interaction_tags = [
    "with_friends", "with_family", "social_event", "one_on_one",
    "group_setting", "positive_interaction", "helping_someone", "received_support",
]

# Context tag that means "by myself"
alone_tag = "alone"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
