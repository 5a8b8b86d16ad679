use crate::models::AssignmentPolicy;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
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

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Manager capacity ceiling used by the load component
    #[serde(default = "default_load_cap")]
    pub load_cap: u32,
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    /// Tie-break policy for bulk auto-assignment
    #[serde(default)]
    pub policy: AssignmentPolicy,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            load_cap: default_load_cap(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            policy: AssignmentPolicy::default(),
        }
    }
}

fn default_load_cap() -> u32 {
    50
}
fn default_limit() -> u16 {
    20
}
fn default_max_limit() -> u16 {
    100
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_needs_weight")]
    pub needs: f64,
    #[serde(default = "default_hobbies_weight")]
    pub hobbies: f64,
    #[serde(default = "default_load_weight")]
    pub load: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            needs: default_needs_weight(),
            hobbies: default_hobbies_weight(),
            load: default_load_weight(),
        }
    }
}

fn default_needs_weight() -> f64 {
    60.0
}
fn default_hobbies_weight() -> f64 {
    30.0
}
fn default_load_weight() -> f64 {
    10.0
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

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CRM_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CRM_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CRM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CRM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.needs, 60.0);
        assert_eq!(weights.hobbies, 30.0);
        assert_eq!(weights.load, 10.0);
    }

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.load_cap, 50);
        assert_eq!(matching.default_limit, 20);
        assert_eq!(matching.max_limit, 100);
        assert_eq!(matching.policy, AssignmentPolicy::BestFit);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
