use crate::core::WeightParams;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Weight decay parameters for random decisions
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_decay")]
    pub decay_per_recent_selection: f64,
    #[serde(default = "default_floor")]
    pub floor: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            decay_per_recent_selection: default_decay(),
            floor: default_floor(),
        }
    }
}

fn default_window_days() -> u32 { 30 }
fn default_decay() -> f64 { 0.5 }
fn default_floor() -> f64 { 0.1 }

impl From<&EngineSettings> for WeightParams {
    fn from(settings: &EngineSettings) -> Self {
        Self {
            window_days: settings.window_days,
            decay_per_recent_selection: settings.decay_per_recent_selection,
            floor: settings.floor,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn env_source() -> Environment {
    // e.g., TABLEVOTE__ENGINE__WINDOW_DAYS -> engine.window_days
    Environment::with_prefix("TABLEVOTE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TABLEVOTE__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    pub fn weight_params(&self) -> WeightParams {
        WeightParams::from(&self.engine)
    }
}
