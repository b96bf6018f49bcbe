//! Configuration Management
//!
//! Loads the user configuration for azd.

use crate::azure::client::DEFAULT_MANAGEMENT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kinds described at the same time when no concurrency is configured
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Output format of the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// User configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Subscription to describe
    #[serde(default)]
    pub subscription_id: Option<String>,
    /// ARM endpoint, for sovereign clouds
    #[serde(default)]
    pub management_endpoint: Option<String>,
    /// Kinds described at the same time
    #[serde(default)]
    pub concurrency: Option<usize>,
    #[serde(default)]
    pub output: Option<OutputFormat>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("azd").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse a config document; a broken file falls back to the defaults
    fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid config file: {}", e);
            Self::default()
        })
    }

    /// Get effective subscription (CLI > config > AZURE_SUBSCRIPTION_ID > az default)
    pub fn effective_subscription(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| self.subscription_id.clone())
            .or_else(crate::azure::auth::get_default_subscription)
    }

    pub fn effective_endpoint(&self) -> &str {
        self.management_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_MANAGEMENT_ENDPOINT)
    }

    pub fn effective_concurrency(&self, cli: Option<usize>) -> usize {
        cli.or(self.concurrency).unwrap_or(DEFAULT_CONCURRENCY).max(1)
    }

    pub fn effective_output(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.output).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse(r#"{"concurrency": 8, "output": "yaml"}"#);
        assert_eq!(config.concurrency, Some(8));
        assert_eq!(config.output, Some(OutputFormat::Yaml));
        assert!(config.subscription_id.is_none());
    }

    #[test]
    fn test_parse_invalid_config_uses_defaults() {
        let config = Config::parse("{not json");
        assert!(config.subscription_id.is_none());
        assert_eq!(config.effective_endpoint(), DEFAULT_MANAGEMENT_ENDPOINT);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config {
            subscription_id: Some("11111111-1111-1111-1111-111111111111".to_string()),
            concurrency: Some(2),
            output: Some(OutputFormat::Yaml),
            ..Default::default()
        };

        assert_eq!(
            config
                .effective_subscription(Some("22222222-2222-2222-2222-222222222222"))
                .as_deref(),
            Some("22222222-2222-2222-2222-222222222222")
        );
        assert_eq!(
            config.effective_subscription(None).as_deref(),
            Some("11111111-1111-1111-1111-111111111111")
        );
        assert_eq!(config.effective_concurrency(Some(6)), 6);
        assert_eq!(config.effective_concurrency(None), 2);
        assert_eq!(config.effective_output(Some(OutputFormat::Json)), OutputFormat::Json);
        assert_eq!(config.effective_output(None), OutputFormat::Yaml);
    }

    #[test]
    fn test_concurrency_is_at_least_one() {
        let config = Config::default();
        assert_eq!(config.effective_concurrency(Some(0)), 1);
        assert_eq!(config.effective_concurrency(None), DEFAULT_CONCURRENCY);
    }
}
