//! Configuration management for the leadboard dashboard

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote lead source configuration
    #[serde(default)]
    pub source: SourceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote lead source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Webhook returning the lead list
    #[serde(default = "default_source_url")]
    pub url: String,

    /// User agent sent with the request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_source_url() -> String {
    "https://smart-seahorse-57.hooks.n8n.cloud/webhook/getLeads".to_string()
}

fn default_user_agent() -> String {
    concat!("leadboard/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            user_agent: default_user_agent(),
        }
    }
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
    /// Load configuration from an optional `leadboard.*` file in the working
    /// directory and `LEADBOARD__`-prefixed environment variables, e.g.
    /// `LEADBOARD__SOURCE__URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or does not deserialize.
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("leadboard").required(false))
            .add_source(
                config::Environment::with_prefix("LEADBOARD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load configuration from a single file; the format follows the
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or does not deserialize.
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert!(config.source.url.ends_with("/webhook/getLeads"));
        assert!(config.source.url.starts_with("https://"));
        assert!(config.source.user_agent.starts_with("leadboard/"));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "source": {"url": "http://localhost:5678/webhook/getLeads"},
            "logging": {}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.source.url, "http://localhost:5678/webhook/getLeads");
        assert_eq!(config.source.user_agent, default_user_agent());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[source]\nurl = \"http://127.0.0.1:9000/leads\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.source.url, "http://127.0.0.1:9000/leads");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_file(dir.path().join("absent.toml"));

        assert!(matches!(result, Err(crate::Error::Configuration { .. })));
    }

    #[test]
    fn test_load_without_file_falls_back_to_defaults() {
        // No leadboard.* file lives next to the crate manifest.
        let config = Config::load().unwrap();
        assert_eq!(config.logging.level, Config::default().logging.level);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();

        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, config);
    }
}
