use caltrack_core::lookup::DEFAULT_BASE_URL;
use caltrack_core::DEFAULT_CALORIE_GOAL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the calorie log
    pub data_dir: ConfigValue<PathBuf>,
    /// Base URL of the product database
    pub lookup_url: ConfigValue<String>,
    /// Calorie goal for newly created days
    pub calorie_goal: ConfigValue<f64>,
    /// Optional request timeout for product lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_timeout_secs: Option<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    lookup_url: Option<String>,
    calorie_goal: Option<f64>,
    lookup_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut lookup_url =
            ConfigValue::new(DEFAULT_BASE_URL.to_string(), ConfigSource::Default);
        let mut calorie_goal = ConfigValue::new(DEFAULT_CALORIE_GOAL, ConfigSource::Default);
        let mut lookup_timeout_secs = None;
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(url) = file_config.lookup_url {
                lookup_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(goal) = file_config.calorie_goal {
                calorie_goal = ConfigValue::new(
                    Self::validate_goal(goal, "calorie_goal")?,
                    ConfigSource::File,
                );
            }
            lookup_timeout_secs = file_config.lookup_timeout_secs;
        }

        if let Ok(dir) = std::env::var("CALTRACK_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("CALTRACK_LOOKUP_URL") {
            lookup_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(raw) = std::env::var("CALTRACK_CALORIE_GOAL") {
            let goal = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CALTRACK_CALORIE_GOAL", raw.clone()))?;
            calorie_goal = ConfigValue::new(
                Self::validate_goal(goal, "CALTRACK_CALORIE_GOAL")?,
                ConfigSource::Environment,
            );
        }

        Ok(Self {
            data_dir,
            lookup_url,
            calorie_goal,
            lookup_timeout_secs,
            config_file,
        })
    }

    fn validate_goal(goal: f64, name: &'static str) -> Result<f64, ConfigError> {
        if goal.is_finite() && goal > 0.0 {
            Ok(goal)
        } else {
            Err(ConfigError::InvalidValue(name, goal.to_string()))
        }
    }

    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.lookup_timeout_secs.map(Duration::from_secs)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/caltrack/
    /// - macOS: ~/Library/Application Support/caltrack/
    /// - Windows: %APPDATA%/caltrack/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("caltrack")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/caltrack/
    /// - macOS: ~/Library/Application Support/caltrack/
    /// - Windows: %APPDATA%/caltrack/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("caltrack")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(name, value) => {
                write!(
                    f,
                    "Invalid value '{}' for {}: expected a positive number",
                    value, name
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
